use num_traits::Float;

use crate::BreaksErr;

/// Round `value` to `digits` decimal places, halfway cases towards +∞ (like JavaScript's
/// `Math.round`).
///
/// A precision finer than `value` can represent leaves it untouched.
///
/// ```
/// use classbreaks::round_to;
///
/// assert_eq!(round_to(2.345f64, 1).unwrap(), 2.3);
/// assert_eq!(round_to(-1.25f64, 1).unwrap(), -1.2);
/// ```
pub fn round_to<T: Float>(value: T, digits: i32) -> Result<T, BreaksErr> {
    let p = T::from(10.0).ok_or(BreaksErr::ConversionError)?.powi(digits);
    let scaled = value * p;
    if !scaled.is_finite() || scaled.floor() == scaled {
        return Ok(value);
    }
    let floor = scaled.floor();
    let half = T::from(0.5).ok_or(BreaksErr::ConversionError)?;
    let rounded = if scaled - floor >= half {
        floor + T::one()
    } else {
        floor
    };
    Ok(rounded / p)
}

/// [`round_to`] applied to every value
pub fn round_values<T: Float>(values: &[T], digits: i32) -> Result<Vec<T>, BreaksErr> {
    values.iter().map(|&v| round_to(v, digits)).collect()
}
