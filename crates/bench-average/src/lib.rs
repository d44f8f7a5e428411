//! Aggregation of per-instance benchmark measurements
//!
//! This crate turns a directory of measurement CSV files (one per TSP/ATSP
//! instance, one row per solver run) into a single summary table holding the
//! average runtime and average relative error of every instance.
//!
//! # Features
//!
//! - **Loader**: positional CSV parsing with a vertex-count consistency check
//! - **Outlier Filter**: IQR fences, applied per series behind an explicit flag
//! - **Averager**: arithmetic mean rounded to a fixed number of decimals
//! - **Writer**: fixed-header summary CSV
//! - **Per-instance isolation**: failing instances are reported, not fatal
//!
//! # Example
//!
//! ```no_run
//! use bench_average::{Config, runner::BatchAverager, reporter::{Reporter, OutputFormat}};
//!
//! # fn example() -> anyhow::Result<()> {
//! let config = Config::from_file("bench-average.toml")?;
//!
//! let report = BatchAverager::new(config.clone()).run()?;
//! Reporter::new(OutputFormat::Console).report(&report)?;
//!
//! bench_average::writer::write_summary_file(&config.output_path, &report.rows)?;
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration
//!
//! ```toml
//! results_dir = "./results"
//! output_path = "./results_average.csv"
//! instances = ["burma14.tsp", "ftv33.atsp"]
//!
//! [outliers]
//! enabled = true
//! target = "runtime"
//! iqr_factor = 1.5
//! ```

pub mod config;
pub mod error;
pub mod loader;
pub mod reporter;
pub mod runner;
pub mod stats;
pub mod writer;

// Re-export main types for convenience
pub use config::{Config, OutlierConfig, OutlierTarget};
pub use error::{AverageError, Series};
pub use loader::Measurements;
pub use reporter::{OutputFormat, Reporter};
pub use runner::{BatchAverager, BatchReport, InstanceFailure, InstanceOutcome, ResultRow};
