//! Natural breaks: the Jenks optimal classification, computed by the classic
//! Fisher / Jenks dynamic program over two `nvalues × nclasses` matrices.

use std::iter::once;

use tracing::{debug, trace};

use crate::{BreaksNum, finite_values, numeric_sort, unique_count_sorted};

/// Values whose magnitude lies outside `2^±SCALE_EXPONENT_LIMIT` are rescaled before the fill
const SCALE_EXPONENT_LIMIT: i32 = 400;

fn make_matrix<V: Copy>(rows: usize, columns: usize, fill: V) -> Vec<Vec<V>> {
    (0..rows).map(|_| vec![fill; columns]).collect()
}

/// A power of two bringing the largest magnitude in `data` near 1, or 1 when squares
/// and sums can't overflow or underflow. Multiplying by a power of two is exact, so
/// every comparison in the fill is unchanged.
fn scale_factor(data: &[f64]) -> f64 {
    let largest = data.iter().fold(0.0f64, |acc, x| acc.max(x.abs()));
    if largest == 0.0 {
        return 1.0;
    }
    let exponent = largest.log2().ceil() as i32;
    if exponent.abs() <= SCALE_EXPONENT_LIMIT {
        1.0
    } else {
        2f64.powi(-exponent.clamp(-1000, 1000))
    }
}

/// Fill the lower class limits and variance combinations matrices.
///
/// Row `l` describes the first `l + 1` sorted values, column `j` a split into `j + 1`
/// classes. `lower_class_limits[l][j]` is the start of the last of those classes,
/// stored **1-based**; `variance_combinations[l][j]` is the least total
/// sum-of-squared-deviations reachable for that split.
///
/// Sums are taken around the median value to avoid cancellation on data far from 0.
fn fill_matrices(data: &[f64], nclasses: usize) -> (Vec<Vec<usize>>, Vec<Vec<f64>>) {
    let nvalues = data.len();
    let shift = data.get(nvalues / 2).copied().unwrap_or(0.0);
    let mut lower_class_limits = make_matrix(nvalues, nclasses, 0usize);
    let mut variance_combinations = make_matrix(nvalues, nclasses, f64::INFINITY);
    if let Some(first_row) = lower_class_limits.first_mut() {
        first_row.fill(1);
    }

    for l in 0..nvalues {
        let mut sum = 0.0;
        let mut sum_squares = 0.0;
        let mut w = 0.0;
        let mut variance = 0.0;
        // grow the candidate last class backwards from `l`
        for m in 0..=l {
            let lower_class_limit = l - m;
            let val = data[lower_class_limit] - shift;
            w += 1.0;
            sum += val;
            sum_squares += val * val;
            variance = sum_squares - (sum * sum) / w;
            if lower_class_limit > 0 {
                let i4 = lower_class_limit - 1;
                for j in 1..nclasses {
                    let temp_val = variance + variance_combinations[i4][j - 1];
                    // `<=`: among equal costs the last candidate (earliest start) wins
                    if temp_val <= variance_combinations[l][j] {
                        lower_class_limits[l][j] = lower_class_limit + 1;
                        variance_combinations[l][j] = temp_val;
                    }
                }
            }
        }
        // the loop ended with the single class [0, l]
        lower_class_limits[l][0] = 1;
        variance_combinations[l][0] = variance;
    }
    (lower_class_limits, variance_combinations)
}

/// Walk the lower class limits back from the bottom-right corner, returning the
/// 0-based index at which each class starts, in ascending order.
///
/// Returns `None` if the matrix points outside the data, which a fully filled
/// matrix for a feasible class count never does.
fn class_starts(lower_class_limits: &[Vec<usize>], nclasses: usize) -> Option<Vec<usize>> {
    let mut starts = vec![0; nclasses];
    let mut row = lower_class_limits.len();
    for class in (1..nclasses).rev() {
        let limit = *lower_class_limits.get(row.checked_sub(1)?)?.get(class)?;
        // undo the 1-based bias; a class other than the first can't start at 0
        let start = limit.checked_sub(1).filter(|&start| start > 0)?;
        starts[class] = start;
        row = start;
    }
    Some(starts)
}

/// Sort the finite values of `data` and locate the optimal class starts.
fn optimal_partition<T: BreaksNum>(data: &[T], nclasses: usize) -> Option<(Vec<T>, Vec<usize>)> {
    let sorted = numeric_sort(&finite_values(data));
    let nvalues = sorted.len();
    if nclasses == 0 || nclasses > nvalues {
        debug!(nclasses, nvalues, "natural breaks not computable: too few values");
        return None;
    }
    let unique_count = unique_count_sorted(&sorted);
    if nclasses > unique_count {
        debug!(
            nclasses,
            unique_count, "natural breaks not computable: too few distinct values"
        );
        return None;
    }
    let mut values = sorted
        .iter()
        .map(|x| x.to_f64())
        .collect::<Option<Vec<f64>>>()?;
    let scale = scale_factor(&values);
    if scale != 1.0 {
        trace!(scale, "rescaling values before the fill");
        values.iter_mut().for_each(|x| *x *= scale);
    }

    trace!(nvalues, nclasses, "filling natural breaks matrices");
    let (lower_class_limits, _) = fill_matrices(&values, nclasses);
    let starts = class_starts(&lower_class_limits, nclasses)?;
    Some((sorted, starts))
}

/// Natural breaks minimise the sum, over all classes, of the squared deviations
/// from each class mean. Classes are therefore **optimally homogeneous** inside
/// and as distinct as possible from one another, which suits choropleth legends.
///
/// The result holds `nclasses + 1` values: the minimum, the upper bound (the
/// largest member) of every class but the last, and the maximum.
///
/// Non-finite values are ignored and the input needn't be sorted. `None` means
/// the breaks are not computable: `nclasses` is `0`, larger than the number of
/// values, or larger than the number of **distinct** values. Checking for it is
/// left to the caller.
///
/// When several partitions are equally good, the one whose upper classes start
/// earliest (the candidate found last while scanning) is reported.
///
/// # Complexity
/// O(n² · k) time and O(n · k) memory.
///
/// # References
/// 1. Jenks, G. F. (1977). Optimal data classification for choropleth maps.
///    Occasional paper No. 2, Department of Geography, University of Kansas.
/// 2. <https://observablehq.com/@visionscarto/natural-breaks>
///
/// # Example
///
/// ```
/// use classbreaks::jenks;
///
/// let input = vec![4.0f64, 9.0, 1.0, 7.0, 2.0, 5.0, 8.0, 3.0, 6.0];
/// assert_eq!(jenks(&input, 3), Some(vec![1.0, 3.0, 6.0, 9.0]));
///
/// // one distinct value can't be split in two
/// assert_eq!(jenks(&[5, 5, 5], 2), None);
/// ```
pub fn jenks<T: BreaksNum>(data: &[T], nclasses: usize) -> Option<Vec<T>> {
    let (sorted, starts) = optimal_partition(data, nclasses)?;
    let mut breaks = Vec::with_capacity(nclasses + 1);
    breaks.push(sorted[0]);
    // the value preceding each class start: `data[limit - 2]` in 1-based limits
    breaks.extend(starts[1..].iter().map(|&start| sorted[start - 1]));
    breaks.push(sorted[sorted.len() - 1]);
    Some(breaks)
}

/// The classes chosen by [`jenks`], as contiguous runs of the sorted input.
///
/// The last member of every class but the final one is the matching internal break.
///
/// # Example
///
/// ```
/// use classbreaks::jenks_classes;
///
/// let input = vec![1, 2, 30, 31, 32, 90];
/// let expected = vec![vec![1, 2], vec![30, 31, 32], vec![90]];
/// assert_eq!(jenks_classes(&input, 3), Some(expected));
/// ```
pub fn jenks_classes<T: BreaksNum>(data: &[T], nclasses: usize) -> Option<Vec<Vec<T>>> {
    let (sorted, starts) = optimal_partition(data, nclasses)?;
    let ends = starts.iter().skip(1).copied().chain(once(sorted.len()));
    let classes = starts
        .iter()
        .zip(ends)
        .map(|(&start, end)| sorted[start..end].to_vec())
        .collect();
    Some(classes)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn ssd(class: &[f64]) -> f64 {
        let mean = class.iter().sum::<f64>() / class.len() as f64;
        class.iter().map(|x| (x - mean) * (x - mean)).sum()
    }

    /// Least total squared deviation over every contiguous split of `sorted` into `k` classes.
    fn brute_force(sorted: &[f64], k: usize) -> f64 {
        if k == 1 {
            return ssd(sorted);
        }
        (k - 1..sorted.len())
            .map(|start| brute_force(&sorted[..start], k - 1) + ssd(&sorted[start..]))
            .fold(f64::INFINITY, f64::min)
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(300))]

        #[test]
        fn breaks_are_well_formed(
            data in proptest::collection::vec(-1000i32..1000, 1..=40),
            k in 1usize..=6,
        ) {
            match jenks(&data, k) {
                Some(breaks) => {
                    prop_assert_eq!(breaks.len(), k + 1);
                    prop_assert!(breaks.windows(2).all(|w| w[0] <= w[1]));
                    prop_assert_eq!(breaks[0], *data.iter().min().unwrap());
                    prop_assert_eq!(breaks[k], *data.iter().max().unwrap());
                }
                None => {
                    let sorted = numeric_sort(&data);
                    prop_assert!(k > data.len() || k > unique_count_sorted(&sorted));
                }
            }
        }

        #[test]
        fn classes_match_breaks(
            data in proptest::collection::vec(-100.0f64..100.0, 2..=30),
            k in 2usize..=5,
        ) {
            let breaks = jenks(&data, k);
            let classes = jenks_classes(&data, k);
            prop_assert_eq!(breaks.is_some(), classes.is_some());
            if let (Some(breaks), Some(classes)) = (breaks, classes) {
                prop_assert_eq!(classes.len(), k);
                prop_assert!(classes.iter().all(|class| !class.is_empty()));
                prop_assert_eq!(classes.iter().map(Vec::len).sum::<usize>(), data.len());
                for (class, upper) in classes.iter().zip(&breaks[1..k]) {
                    prop_assert_eq!(class.last(), Some(upper));
                }
            }
        }

        #[test]
        fn partition_is_optimal(
            data in proptest::collection::vec(-50i32..50, 2..=8),
            offset in prop_oneof![Just(0.0f64), Just(1e6), Just(1e9), Just(-1e12)],
            k in 2usize..=4,
        ) {
            // integers plus a large offset stay exact, so deviations can be taken around 0
            let shifted: Vec<f64> = data.iter().map(|&x| f64::from(x) + offset).collect();
            if let Some(classes) = jenks_classes(&shifted, k) {
                let found: f64 = classes
                    .iter()
                    .map(|class| ssd(&class.iter().map(|x| x - offset).collect::<Vec<f64>>()))
                    .sum();
                let sorted: Vec<f64> = numeric_sort(&data).iter().map(|&x| f64::from(x)).collect();
                let best = brute_force(&sorted, k);
                prop_assert!(found <= best + 1e-6, "found {} best {}", found, best);
            } else {
                prop_assert!(k > unique_count_sorted(&numeric_sort(&data)));
            }
        }

        #[test]
        fn fractional_partition_is_optimal(
            data in proptest::collection::vec(-1e3f64..1e3, 2..=8),
            k in 2usize..=4,
        ) {
            if let Some(classes) = jenks_classes(&data, k) {
                let found: f64 = classes.iter().map(|class| ssd(class)).sum();
                let best = brute_force(&numeric_sort(&data), k);
                prop_assert!(found <= best + 1e-6 * best.max(1.0), "found {} best {}", found, best);
            }
        }

        #[test]
        fn repeated_calls_agree(
            data in proptest::collection::vec(-1e6f64..1e6, 1..=30),
            k in 2usize..=5,
        ) {
            prop_assert_eq!(jenks(&data, k), jenks(&data, k));
        }
    }
}
