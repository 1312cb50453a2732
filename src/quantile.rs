//! Quantile breaks: class limits placed at evenly spaced empirical quantiles, so
//! that every class holds roughly the same number of values.

use num_traits::Float;
use std::fmt::Debug;
use tracing::{debug, trace};

use crate::{
    BreaksErr, QuantileOptions, finite_values, numeric_sort, round_values, validate_nb,
    validate_precision,
};

/// The `q`-th quantile of **sorted** data, interpolating linearly between order
/// statistics (Hyndman & Fan type 7, the default of R and NumPy).
///
/// Returns `None` if `sorted` is empty or `q` lies outside `[0, 1]`.
///
/// ```
/// use classbreaks::quantile_at;
///
/// let sorted = [10.0f64, 20.0, 30.0, 40.0];
/// assert_eq!(quantile_at(&sorted, 0.5), Some(25.0));
/// assert_eq!(quantile_at(&sorted, 1.0), Some(40.0));
/// ```
pub fn quantile_at<T: Float>(sorted: &[T], q: f64) -> Option<T> {
    let n = sorted.len();
    if n == 0 || !(0.0..=1.0).contains(&q) {
        return None;
    }
    let h = (n - 1) as f64 * q;
    let j = h.floor() as usize;
    if j + 1 >= n {
        return Some(sorted[n - 1]);
    }
    let g = T::from(h - h.floor())?;
    Some(sorted[j] + g * (sorted[j + 1] - sorted[j]))
}

/// Breaks at the quantiles `0, 1/nb, 2/nb, …, 1` of the finite values of `data`.
///
/// The `nb + 1` breaks are sorted, rounded to `options.precision` digits unless it
/// is `None`, and stripped of the minimum and maximum when `options.minmax` is
/// `false`.
///
/// # Errors
/// - [`BreaksErr::InvalidNumberOfClasses`] if `options.nb < 2`
/// - [`BreaksErr::InvalidPrecision`] if `options.precision` is negative
/// - [`BreaksErr::TooFewValues`] if there are fewer finite values than `options.nb`
///
/// # Example
///
/// ```
/// use classbreaks::{QuantileOptions, quantile_breaks};
///
/// let options = QuantileOptions::default().with_nb(4).with_precision(Some(0));
/// let breaks = quantile_breaks(&[50.0f64, 10.0, 40.0, 20.0, 30.0], &options).unwrap();
/// assert_eq!(breaks, vec![10.0, 20.0, 30.0, 40.0, 50.0]);
/// ```
pub fn quantile_breaks<T: Float + Debug>(
    data: &[T],
    options: &QuantileOptions,
) -> Result<Vec<T>, BreaksErr> {
    let data = finite_values(data);
    let nb = validate_nb(options.nb)?;
    let precision = validate_precision(options.precision)?;
    if nb > data.len() {
        debug!(nb, len = data.len(), "quantile breaks: too few values");
        return Err(BreaksErr::TooFewValues {
            nb,
            len: data.len(),
        });
    }

    trace!(nb, len = data.len(), "computing quantile breaks");
    let sorted = numeric_sort(&data);
    let step = 1.0 / nb as f64;
    let quantiles = (0..=nb)
        .map(|i| quantile_at(&sorted, (step * i as f64).min(1.0)))
        .collect::<Option<Vec<T>>>()
        .ok_or(BreaksErr::ConversionError)?;

    let mut breaks = numeric_sort(&quantiles);
    if let Some(digits) = precision {
        breaks = round_values(&breaks, digits)?;
    }
    if !options.minmax {
        breaks = breaks[1..breaks.len() - 1].to_vec();
    }
    Ok(breaks)
}
