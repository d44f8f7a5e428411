//! JSON reporter for batch results

use crate::runner::BatchReport;
use anyhow::Result;

/// JSON format reporter
pub struct JsonReporter;

impl JsonReporter {
    /// Format a batch report as JSON, optionally pretty-printed
    pub fn format(report: &BatchReport, pretty: bool) -> Result<String> {
        let mut output = if pretty {
            serde_json::to_string_pretty(report)?
        } else {
            serde_json::to_string(report)?
        };
        output.push('\n');
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reporter::test_support::sample_report;

    #[test]
    fn test_json_format_compact() {
        let output = JsonReporter::format(&sample_report(), false).unwrap();

        // single line plus trailing newline
        assert_eq!(output.lines().count(), 1);
        assert!(output.contains("\"instance_name\":\"burma14.tsp\""));
    }

    #[test]
    fn test_json_format_pretty() {
        let output = JsonReporter::format(&sample_report(), true).unwrap();

        assert!(output.lines().count() > 1);
        assert!(output.contains("  "));
    }

    #[test]
    fn test_json_roundtrip() {
        let report = sample_report();
        let json = JsonReporter::format(&report, false).unwrap();
        let parsed: BatchReport = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.rows, report.rows);
        assert_eq!(parsed.instance_stats, report.instance_stats);
        assert_eq!(parsed.started_at, report.started_at);
    }
}
