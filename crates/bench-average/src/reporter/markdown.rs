//! Markdown reporter for batch results

use anyhow::Result;
use std::fmt::Write;

use crate::runner::BatchReport;
use crate::writer::{format_value, SUMMARY_HEADER};

/// Markdown format reporter
pub struct MarkdownReporter;

impl MarkdownReporter {
    /// Format a batch report as a Markdown document with one summary table
    pub fn format(report: &BatchReport) -> Result<String> {
        let mut output = String::new();

        writeln!(output, "# Averaged Results")?;
        writeln!(output)?;
        writeln!(output, "_Started {} ({}ms)_", report.started_at, report.total_duration_ms)?;
        writeln!(output)?;

        writeln!(output, "| {} |", SUMMARY_HEADER.join(" | "))?;
        writeln!(output, "|---|---:|---:|---:|")?;
        for row in &report.rows {
            writeln!(
                output,
                "| {} | {} | {} | {} |",
                row.instance_name,
                row.vertex_count,
                format_value(row.average_time_ns),
                format_value(row.average_error_pct)
            )?;
        }

        if !report.failures.is_empty() {
            writeln!(output)?;
            writeln!(output, "## Failures")?;
            writeln!(output)?;
            for failure in &report.failures {
                writeln!(output, "- `{}`: {}", failure.instance_name, failure.reason)?;
            }
        }

        Ok(output)
    }
}
