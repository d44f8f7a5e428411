//! Outlier detection for measurement samples.
//!
//! This module provides utilities for detecting and filtering outliers
//! using the Interquartile Range (IQR) method.

use super::percentiles::percentile_of_sorted;
use std::cmp::Ordering;

/// Default IQR multiplier for the fences.
pub const DEFAULT_IQR_FACTOR: f64 = 1.5;

/// Outlier detection using Interquartile Range (IQR) method.
///
/// A sample is kept when it lies strictly inside
/// (Q1 - k*IQR, Q3 + k*IQR), where IQR = Q3 - Q1. When the IQR is zero the
/// fences collapse onto [Q1, Q3] and become inclusive, so a constant series
/// is kept whole.
#[derive(Debug, Clone)]
pub struct OutlierResult {
    /// Indices of detected outliers in the original sample array
    pub outlier_indices: Vec<usize>,
    /// Lower fence (Q1 - k*IQR)
    pub lower_fence: f64,
    /// Upper fence (Q3 + k*IQR)
    pub upper_fence: f64,
    /// First quartile (25th percentile)
    pub q1: f64,
    /// Third quartile (75th percentile)
    pub q3: f64,
    /// Interquartile range (Q3 - Q1)
    pub iqr: f64,
}

impl OutlierResult {
    /// Detect outliers with the standard 1.5 IQR multiplier.
    ///
    /// # Returns
    ///
    /// * `Some(result)` - Outlier detection results
    /// * `None` - If samples is empty
    ///
    /// # Examples
    ///
    /// ```
    /// use bench_average::stats::outliers::OutlierResult;
    ///
    /// let data = vec![1.0, 2.0, 3.0, 4.0, 5.0, 100.0]; // 100.0 is an outlier
    /// let result = OutlierResult::detect(&data).unwrap();
    /// assert!(result.has_outliers());
    /// assert_eq!(result.outlier_indices, vec![5]);
    /// ```
    pub fn detect(samples: &[f64]) -> Option<Self> {
        Self::detect_with_factor(samples, DEFAULT_IQR_FACTOR)
    }

    /// Detect outliers using `factor` as the IQR multiplier.
    pub fn detect_with_factor(samples: &[f64], factor: f64) -> Option<Self> {
        if samples.is_empty() {
            return None;
        }

        let mut sorted = samples.to_vec();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));

        let q1 = percentile_of_sorted(&sorted, 25.0);
        let q3 = percentile_of_sorted(&sorted, 75.0);
        let iqr = q3 - q1;

        let lower_fence = q1 - factor * iqr;
        let upper_fence = q3 + factor * iqr;

        let mut result = OutlierResult {
            outlier_indices: Vec::new(),
            lower_fence,
            upper_fence,
            q1,
            q3,
            iqr,
        };

        result.outlier_indices = samples
            .iter()
            .enumerate()
            .filter_map(|(i, &value)| if result.is_within(value) { None } else { Some(i) })
            .collect();

        Some(result)
    }

    /// Whether `value` falls inside the fences.
    pub fn is_within(&self, value: f64) -> bool {
        if self.iqr == 0.0 {
            value >= self.lower_fence && value <= self.upper_fence
        } else {
            value > self.lower_fence && value < self.upper_fence
        }
    }

    /// Get the clean samples (outliers removed), in original order.
    ///
    /// # Examples
    ///
    /// ```
    /// use bench_average::stats::outliers::OutlierResult;
    ///
    /// let data = vec![1.0, 2.0, 3.0, 4.0, 5.0, 100.0];
    /// let result = OutlierResult::detect(&data).unwrap();
    /// let clean = result.clean_samples(&data);
    /// assert_eq!(clean.len(), 5); // 100.0 removed
    /// ```
    pub fn clean_samples(&self, samples: &[f64]) -> Vec<f64> {
        self.retain(samples)
    }

    /// Apply the detected mask to a sequence parallel to the analysed one.
    ///
    /// Lets integer samples be filtered without a round trip through `f64`.
    pub fn retain<T: Copy>(&self, samples: &[T]) -> Vec<T> {
        samples
            .iter()
            .enumerate()
            .filter_map(|(i, &value)| {
                if self.outlier_indices.binary_search(&i).is_ok() {
                    None
                } else {
                    Some(value)
                }
            })
            .collect()
    }

    /// Check if any outliers were detected.
    pub fn has_outliers(&self) -> bool {
        !self.outlier_indices.is_empty()
    }
}

/// Remove outliers from `samples` with the standard 1.5 IQR fences.
///
/// Returns `None` for an empty slice.
///
/// # Examples
///
/// ```
/// use bench_average::stats::outliers::remove_outliers;
///
/// assert_eq!(remove_outliers(&[5.0, 5.0, 5.0, 5.0]), Some(vec![5.0, 5.0, 5.0, 5.0]));
/// ```
pub fn remove_outliers(samples: &[f64]) -> Option<Vec<f64>> {
    OutlierResult::detect(samples).map(|result| result.clean_samples(samples))
}
