//! Console reporter for batch results
//!
//! Provides human-readable output with an ASCII table and status indicators.

use anyhow::Result;
use std::fmt::Write;

use crate::config::OutlierTarget;
use crate::runner::BatchReport;
use crate::writer::format_value;

/// Console format reporter
pub struct ConsoleReporter;

impl ConsoleReporter {
    /// Format a batch report for console output
    pub fn format(report: &BatchReport) -> Result<String> {
        let mut output = String::new();

        writeln!(output)?;
        writeln!(output, "╔══════════════════════════════════════════════════════════════════════╗")?;
        writeln!(output, "║                          AVERAGED RESULTS                            ║")?;
        writeln!(output, "╚══════════════════════════════════════════════════════════════════════╝")?;
        writeln!(output)?;

        writeln!(output, "Started:   {}", report.started_at)?;
        writeln!(output, "Duration:  {}ms", report.total_duration_ms)?;
        let filter = if report.outliers.enabled {
            let target = match report.outliers.target {
                OutlierTarget::Runtime => "runtime",
                OutlierTarget::Error => "error",
                OutlierTarget::Both => "runtime + error",
            };
            format!("IQR x{} on {}", report.outliers.iqr_factor, target)
        } else {
            "off".to_string()
        };
        writeln!(output, "Outliers:  {}", filter)?;
        writeln!(output)?;

        writeln!(output, "  ┌──────────────────┬──────────┬──────────────────┬──────────────┬──────────┐")?;
        writeln!(output, "  │ Instance         │ Vertices │ Avg time [ns]    │ Avg error [%]│ Removed  │")?;
        writeln!(output, "  ├──────────────────┼──────────┼──────────────────┼──────────────┼──────────┤")?;

        for row in &report.rows {
            let removed = report
                .instance_stats
                .iter()
                .find(|s| s.instance_name == row.instance_name)
                .map(|s| s.runtime_outliers_removed + s.error_outliers_removed)
                .unwrap_or(0);

            writeln!(
                output,
                "  │ {:<16} │ {:>8} │ {:>16} │ {:>12} │ {:>8} │",
                row.instance_name,
                row.vertex_count,
                format_value(row.average_time_ns),
                format_value(row.average_error_pct),
                removed
            )?;
        }

        writeln!(output, "  └──────────────────┴──────────┴──────────────────┴──────────────┴──────────┘")?;
        writeln!(output)?;

        writeln!(output, "────────────────────────────────────────────────────────────────────────")?;
        let status_symbol = if report.passed() { "✓" } else { "✗" };
        writeln!(
            output,
            "Averaged: {} {}   Failed: {}",
            status_symbol,
            report.rows.len(),
            report.failures.len()
        )?;

        if !report.failures.is_empty() {
            writeln!(output)?;
            writeln!(output, "Failures:")?;
            for failure in &report.failures {
                writeln!(output, "  • {}: {}", failure.instance_name, failure.reason)?;
            }
        }

        writeln!(output)?;
        Ok(output)
    }
}
