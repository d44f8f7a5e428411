//! Percentile and mean calculations for measurement samples.
//!
//! All functions return `None` on empty input instead of panicking; callers
//! decide how an empty series is reported.

use std::cmp::Ordering;

/// Calculate percentile value from a slice of f64 samples.
///
/// Uses linear interpolation between nearest ranks, i.e. the rank of `p` is
/// `p / 100 * (n - 1)` in the sorted samples.
///
/// # Arguments
///
/// * `samples` - Slice of samples (will be sorted internally)
/// * `p` - Percentile to calculate (0.0 to 100.0)
///
/// # Returns
///
/// * `Some(value)` - The percentile value
/// * `None` - If samples is empty or p is invalid
///
/// # Examples
///
/// ```
/// use bench_average::stats::percentiles::percentile;
///
/// let data = vec![1.0, 2.0, 3.0, 4.0, 5.0];
/// assert_eq!(percentile(&data, 50.0), Some(3.0));
/// ```
pub fn percentile(samples: &[f64], p: f64) -> Option<f64> {
    if samples.is_empty() || !(0.0..=100.0).contains(&p) {
        return None;
    }

    let mut sorted = samples.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));

    Some(percentile_of_sorted(&sorted, p))
}

/// Percentile of data that is already sorted ascending and non-empty.
pub(crate) fn percentile_of_sorted(sorted: &[f64], p: f64) -> f64 {
    if sorted.len() == 1 {
        return sorted[0];
    }

    let rank = (p / 100.0) * (sorted.len() - 1) as f64;
    let lower_index = rank.floor() as usize;
    let upper_index = rank.ceil() as usize;

    if lower_index == upper_index {
        sorted[lower_index]
    } else {
        let lower_value = sorted[lower_index];
        let upper_value = sorted[upper_index];
        let fraction = rank - lower_index as f64;
        lower_value + fraction * (upper_value - lower_value)
    }
}

/// Arithmetic mean of the samples.
///
/// # Examples
///
/// ```
/// use bench_average::stats::percentiles::mean;
///
/// assert_eq!(mean(&[1.0, 2.0, 3.0, 4.0]), Some(2.5));
/// assert_eq!(mean(&[]), None);
/// ```
pub fn mean(samples: &[f64]) -> Option<f64> {
    if samples.is_empty() {
        return None;
    }

    let sum: f64 = samples.iter().sum();
    Some(sum / samples.len() as f64)
}

/// Round to a fixed number of decimal places.
///
/// Rounds the exact binary value, so exact ties go to the even digit and a
/// value stored just below a half rounds down.
///
/// ```
/// use bench_average::stats::percentiles::round_to;
///
/// assert_eq!(round_to(100.125, 2), 100.12);
/// assert_eq!(round_to(4.005, 2), 4.0);
/// ```
pub fn round_to(value: f64, decimals: u32) -> f64 {
    if !value.is_finite() {
        return value;
    }
    format!("{:.*}", decimals as usize, value)
        .parse()
        .unwrap_or(value)
}
