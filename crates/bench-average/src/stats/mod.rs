//! Statistical analysis of measurement samples
//!
//! This module provides the statistical primitives the batch averager is
//! built on: percentiles, arithmetic mean, rounding and IQR outlier removal.
//!
//! # Examples
//!
//! ```
//! use bench_average::stats::{mean, round_to, OutlierResult};
//!
//! let runtimes = vec![100.0, 110.0, 105.0, 4000.0, 104.0];
//!
//! let outliers = OutlierResult::detect(&runtimes).unwrap();
//! let filtered = outliers.clean_samples(&runtimes);
//!
//! let average = round_to(mean(&filtered).unwrap(), 2);
//! assert_eq!(average, 104.75);
//! ```

pub mod outliers;
pub mod percentiles;

// Re-export main types and functions
pub use outliers::{remove_outliers, OutlierResult, DEFAULT_IQR_FACTOR};
pub use percentiles::{mean, percentile, round_to};
