//! Options accepted by [`quantile_breaks`](crate::quantile_breaks), and the checks applied to them.

use tracing::debug;

use crate::BreaksErr;

/// Options for [`quantile_breaks`](crate::quantile_breaks)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuantileOptions {
    /// Number of classes
    pub nb: usize,
    /// Decimal digits kept in the breaks; `None` disables rounding
    pub precision: Option<i32>,
    /// Keep the minimum and maximum as first and last break
    pub minmax: bool,
}

impl Default for QuantileOptions {
    fn default() -> Self {
        QuantileOptions {
            nb: 5,
            precision: Some(2),
            minmax: true,
        }
    }
}

impl QuantileOptions {
    pub fn with_nb(mut self, nb: usize) -> Self {
        self.nb = nb;
        self
    }

    pub fn with_precision(mut self, precision: Option<i32>) -> Self {
        self.precision = precision;
        self
    }

    pub fn with_minmax(mut self, minmax: bool) -> Self {
        self.minmax = minmax;
        self
    }
}

/// A class count must be at least 2
pub fn validate_nb(nb: usize) -> Result<usize, BreaksErr> {
    if nb < 2 {
        debug!(nb, "rejected number of classes");
        return Err(BreaksErr::InvalidNumberOfClasses(nb));
    }
    Ok(nb)
}

/// A precision is either absent or a non-negative number of digits
pub fn validate_precision(precision: Option<i32>) -> Result<Option<i32>, BreaksErr> {
    match precision {
        Some(digits) if digits < 0 => {
            debug!(digits, "rejected precision");
            Err(BreaksErr::InvalidPrecision(digits))
        }
        _ => Ok(precision),
    }
}
