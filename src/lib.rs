//! Class breaks split a numeric dataset into a requested number of ordered classes,
//! which is the first step of most choropleth maps and many histograms.
//!
//! Two methods are provided:
//!
//! - [`jenks`]: natural breaks, the
//!   [Jenks optimal classification](https://en.wikipedia.org/wiki/Jenks_natural_breaks_optimization).
//!   A [dynamic programming](https://en.wikipedia.org/wiki/Dynamic_programming) approach
//!   finds the contiguous partition of the sorted data with the least within-group
//!   sum-of-squared-deviations.
//! - [`quantile_breaks`]: breaks placed at evenly spaced empirical quantiles.
//!
//! Both return `k + 1` values: the minimum, the `k - 1` internal breaks, and the maximum.

use num_traits::{Num, NumCast};
use std::cmp::Ordering;
use std::fmt::Debug;

#[cfg(not(target_arch = "wasm32"))]
mod ffi;
#[cfg(not(target_arch = "wasm32"))]
pub use crate::ffi::{ExternalArray, InternalArray, drop_jenks_result, jenks_ffi};

#[cfg(target_arch = "wasm32")]
mod wasm;
#[cfg(target_arch = "wasm32")]
pub use crate::wasm::{jenks_wasm, quantile_wasm};

mod errors;
pub use crate::errors::BreaksErr;

mod jenks;
pub use crate::jenks::{jenks, jenks_classes};

mod params;
pub use crate::params::{QuantileOptions, validate_nb, validate_precision};

mod quantile;
pub use crate::quantile::{quantile_at, quantile_breaks};

mod rounding;
pub use crate::rounding::{round_to, round_values};

/// A trait that encompasses most common numeric types (integer **and** floating point)
pub trait BreaksNum: Num + Copy + NumCast + PartialOrd + Debug {}
impl<T: Num + Copy + NumCast + PartialOrd + Debug> BreaksNum for T {}

/// Keep only the values that are finite once seen as `f64`, in their original order.
///
/// Integers always pass; `NaN` and infinities are dropped.
///
/// ```
/// use classbreaks::finite_values;
///
/// let cleaned = finite_values(&[1.0, f64::NAN, 3.0, f64::INFINITY]);
/// assert_eq!(cleaned, vec![1.0, 3.0]);
/// ```
pub fn finite_values<T: BreaksNum>(data: &[T]) -> Vec<T> {
    data.iter()
        .copied()
        .filter(|x| x.to_f64().is_some_and(f64::is_finite))
        .collect()
}

/// return a sorted **copy** of the input. Only call on [`finite_values`] output:
/// incomparable values are treated as equal.
pub(crate) fn numeric_sort<T: BreaksNum>(arr: &[T]) -> Vec<T> {
    let mut xs = arr.to_vec();
    xs.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
    xs
}

/// Assumes sorted input (so be sure only to use on `numeric_sort` output!)
pub(crate) fn unique_count_sorted<T: BreaksNum>(input: &[T]) -> usize {
    if input.is_empty() {
        0
    } else {
        1 + input.windows(2).filter(|win| win[0] != win[1]).count()
    }
}
