//! Batch orchestration
//!
//! This module walks the configured instance list, loads each measurement
//! file, optionally removes outliers, averages both sample series and
//! collects one outcome per instance.
//!
//! ```text
//! instances ──► Measurements::load ──► OutlierResult (optional) ──► mean ──► ResultRow
//!                      │                                               │
//!                      └────────────── InstanceFailure ◄───────────────┘
//! ```
//!
//! A failing instance does not stop the batch unless `fail_fast` is set; the
//! failure is recorded in the report and the remaining instances still run.
//!
//! # Example
//!
//! ```no_run
//! use bench_average::{Config, runner::BatchAverager};
//!
//! # fn example() -> anyhow::Result<()> {
//! let config = Config::from_file("bench-average.toml")?;
//! let report = BatchAverager::new(config).run()?;
//!
//! for row in &report.rows {
//!     println!("{}: {} ns", row.instance_name, row.average_time_ns);
//! }
//! # Ok(())
//! # }
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::{debug, info, instrument, warn};

use crate::config::{Config, OutlierConfig};
use crate::error::{AverageError, Series};
use crate::loader::Measurements;
use crate::stats::{mean, round_to, OutlierResult};

/// One line of the summary table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultRow {
    /// Instance name, including its `.tsp`/`.atsp` suffix
    pub instance_name: String,
    /// Number of vertices of the instance
    pub vertex_count: usize,
    /// Mean runtime in nanoseconds, rounded
    pub average_time_ns: f64,
    /// Mean relative error in percent, rounded
    pub average_error_pct: f64,
}

/// Per-instance sample accounting
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstanceStats {
    /// Name of the instance
    pub instance_name: String,
    /// Data rows read from the measurement file
    pub samples: usize,
    /// Runtime samples dropped by the outlier filter
    pub runtime_outliers_removed: usize,
    /// Error samples dropped by the outlier filter
    pub error_outliers_removed: usize,
}

/// An instance that could not be averaged
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstanceFailure {
    /// Name of the instance
    pub instance_name: String,
    /// Human-readable cause
    pub reason: String,
}

/// Result of processing a single instance
#[derive(Debug, Clone)]
pub enum InstanceOutcome {
    Averaged { row: ResultRow, stats: InstanceStats },
    Failed(InstanceFailure),
}

/// Results from a complete batch run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchReport {
    /// Summary rows in instance-list order (failed instances omitted)
    pub rows: Vec<ResultRow>,
    /// Sample accounting for every averaged instance
    pub instance_stats: Vec<InstanceStats>,
    /// Instances that failed, in instance-list order
    pub failures: Vec<InstanceFailure>,
    /// Outlier settings used for the run
    pub outliers: OutlierConfig,
    /// Timestamp when the run started
    pub started_at: String,
    /// Total duration of the run
    pub total_duration_ms: u64,
}

impl BatchReport {
    /// Whether every instance produced a row
    pub fn passed(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Filtered view of one series
struct Filtered<T> {
    samples: Vec<T>,
    removed: usize,
}

fn filter_series<T: Copy>(
    samples: &[T],
    as_f64: &[f64],
    enabled: bool,
    factor: f64,
    series: Series,
) -> Filtered<T> {
    if !enabled {
        return Filtered {
            samples: samples.to_vec(),
            removed: 0,
        };
    }

    match OutlierResult::detect_with_factor(as_f64, factor) {
        Some(result) => {
            debug!(
                %series,
                q1 = result.q1,
                q3 = result.q3,
                lower_fence = result.lower_fence,
                upper_fence = result.upper_fence,
                removed = result.outlier_indices.len(),
                "Applied IQR outlier filter"
            );
            Filtered {
                samples: result.retain(samples),
                removed: result.outlier_indices.len(),
            }
        }
        None => Filtered {
            samples: Vec::new(),
            removed: 0,
        },
    }
}

/// Average the samples of one instance into a summary row.
///
/// # Errors
///
/// Returns [`AverageError::EmptySamples`] when a series has no samples left
/// to average.
pub fn average_measurements(
    instance_name: &str,
    measurements: &Measurements,
    outliers: &OutlierConfig,
    decimals: u32,
) -> std::result::Result<(ResultRow, InstanceStats), AverageError> {
    let empty = |series: Series| AverageError::EmptySamples {
        instance: instance_name.to_string(),
        series,
    };

    let vertex_count = measurements.vertex_count.ok_or_else(|| empty(Series::Runtime))?;

    let runtimes = filter_series(
        &measurements.runtimes_ns,
        &measurements.runtimes_f64(),
        outliers.filters_runtime(),
        outliers.iqr_factor,
        Series::Runtime,
    );
    let errors = filter_series(
        &measurements.errors_pct,
        &measurements.errors_pct,
        outliers.filters_error(),
        outliers.iqr_factor,
        Series::Error,
    );

    let runtimes_f64: Vec<f64> = runtimes.samples.iter().map(|&r| r as f64).collect();
    let average_time = mean(&runtimes_f64).ok_or_else(|| empty(Series::Runtime))?;
    let average_error = mean(&errors.samples).ok_or_else(|| empty(Series::Error))?;

    let row = ResultRow {
        instance_name: instance_name.to_string(),
        vertex_count,
        average_time_ns: round_to(average_time, decimals),
        average_error_pct: round_to(average_error, decimals),
    };
    let stats = InstanceStats {
        instance_name: instance_name.to_string(),
        samples: measurements.len(),
        runtime_outliers_removed: runtimes.removed,
        error_outliers_removed: errors.removed,
    };

    Ok((row, stats))
}

/// The batch averager
pub struct BatchAverager {
    config: Config,
}

impl BatchAverager {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Load and average a single instance
    pub fn average_instance(
        &self,
        instance_name: &str,
    ) -> std::result::Result<(ResultRow, InstanceStats), AverageError> {
        let measurements = Measurements::from_path(self.config.path_for(instance_name))?;
        average_measurements(
            instance_name,
            &measurements,
            &self.config.outliers,
            self.config.decimals,
        )
    }

    /// Process one instance, turning errors into a recorded failure
    pub fn process_instance(&self, instance_name: &str) -> InstanceOutcome {
        match self.average_instance(instance_name) {
            Ok((row, stats)) => InstanceOutcome::Averaged { row, stats },
            Err(e) => InstanceOutcome::Failed(InstanceFailure {
                instance_name: instance_name.to_string(),
                reason: e.to_string(),
            }),
        }
    }

    /// Run the whole batch.
    ///
    /// # Errors
    ///
    /// Only fails when `fail_fast` is set and an instance fails; otherwise
    /// failures are collected in [`BatchReport::failures`].
    #[instrument(skip(self), fields(instances = self.config.instances.len()))]
    pub fn run(&self) -> Result<BatchReport> {
        let start_time = Instant::now();
        let started_at = chrono::Utc::now().to_rfc3339();

        info!(
            results_dir = %self.config.results_dir.display(),
            outlier_filter = self.config.outliers.enabled,
            "Starting batch"
        );

        let mut rows = Vec::with_capacity(self.config.instances.len());
        let mut instance_stats = Vec::with_capacity(self.config.instances.len());
        let mut failures = Vec::new();

        for instance_name in &self.config.instances {
            if self.config.fail_fast {
                let (row, stats) = self
                    .average_instance(instance_name)
                    .with_context(|| format!("Instance {} failed", instance_name))?;
                info!(instance = %instance_name, samples = stats.samples, "Averaged instance");
                rows.push(row);
                instance_stats.push(stats);
                continue;
            }

            match self.process_instance(instance_name) {
                InstanceOutcome::Averaged { row, stats } => {
                    info!(instance = %instance_name, samples = stats.samples, "Averaged instance");
                    rows.push(row);
                    instance_stats.push(stats);
                }
                InstanceOutcome::Failed(failure) => {
                    warn!(instance = %instance_name, reason = %failure.reason, "Instance failed");
                    failures.push(failure);
                }
            }
        }

        let total_duration_ms = start_time.elapsed().as_millis() as u64;

        info!(
            averaged = rows.len(),
            failed = failures.len(),
            duration_ms = total_duration_ms,
            "Batch complete"
        );

        Ok(BatchReport {
            rows,
            instance_stats,
            failures,
            outliers: self.config.outliers.clone(),
            started_at,
            total_duration_ms,
        })
    }
}
