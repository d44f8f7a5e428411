//! Batch report rendering
//!
//! This module prints the in-memory summary table before it is written to
//! CSV, in one of several formats.
//!
//! # Output Formats
//!
//! - **JSON**: Machine-readable format for scripting
//! - **Console**: Human-readable table with a failure list
//! - **Markdown**: Pipe table for pasting into reports
//!
//! # Example
//!
//! ```no_run
//! use bench_average::reporter::{Reporter, OutputFormat};
//! use bench_average::runner::BatchReport;
//!
//! # fn example(report: BatchReport) -> anyhow::Result<()> {
//! Reporter::new(OutputFormat::Console).report(&report)?;
//! # Ok(())
//! # }
//! ```

mod console;
mod json;
mod markdown;

use anyhow::Result;
use std::io::{self, Write};
use std::str::FromStr;

use crate::runner::BatchReport;

pub use console::ConsoleReporter;
pub use json::JsonReporter;
pub use markdown::MarkdownReporter;

/// Output format for batch reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// JSON format for machine parsing
    Json,
    /// Pretty-printed JSON
    JsonPretty,
    /// Console table
    #[default]
    Console,
    /// Markdown table
    Markdown,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "json-pretty" | "json_pretty" => Ok(OutputFormat::JsonPretty),
            "console" => Ok(OutputFormat::Console),
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            other => Err(format!(
                "unknown format '{}', expected console, json, json-pretty or markdown",
                other
            )),
        }
    }
}

/// Reporter for batch results
pub struct Reporter {
    format: OutputFormat,
}

impl Reporter {
    /// Create a new reporter with the specified output format
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Report results to stdout
    pub fn report(&self, report: &BatchReport) -> Result<()> {
        let output = self.format_report(report)?;
        let mut stdout = io::stdout().lock();
        write!(stdout, "{}", output)?;
        stdout.flush()?;
        Ok(())
    }

    /// Format results as a string
    pub fn format_report(&self, report: &BatchReport) -> Result<String> {
        match self.format {
            OutputFormat::Json => JsonReporter::format(report, false),
            OutputFormat::JsonPretty => JsonReporter::format(report, true),
            OutputFormat::Console => ConsoleReporter::format(report),
            OutputFormat::Markdown => MarkdownReporter::format(report),
        }
    }
}

impl Default for Reporter {
    fn default() -> Self {
        Self::new(OutputFormat::default())
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::sample_report;
    use super::*;

    #[test]
    fn test_reporter_json_format() {
        let output = Reporter::new(OutputFormat::Json)
            .format_report(&sample_report())
            .unwrap();

        assert!(output.contains("burma14.tsp"));
        assert!(output.contains("103.33"));
    }

    #[test]
    fn test_reporter_console_format() {
        let output = Reporter::new(OutputFormat::Console)
            .format_report(&sample_report())
            .unwrap();

        assert!(output.contains("burma14.tsp"));
        assert!(output.contains("ftv33.atsp"));
    }

    #[test]
    fn test_reporter_markdown_format() {
        let output = Reporter::new(OutputFormat::Markdown)
            .format_report(&sample_report())
            .unwrap();

        assert!(output.contains("| instance name"));
    }

    #[test]
    fn test_default_format() {
        let reporter = Reporter::default();
        assert_eq!(reporter.format, OutputFormat::Console);
    }

    #[test]
    fn test_parse_format() {
        assert_eq!("json".parse::<OutputFormat>(), Ok(OutputFormat::Json));
        assert_eq!("JSON-Pretty".parse::<OutputFormat>(), Ok(OutputFormat::JsonPretty));
        assert_eq!("md".parse::<OutputFormat>(), Ok(OutputFormat::Markdown));
        assert!("xml".parse::<OutputFormat>().is_err());
    }
}
