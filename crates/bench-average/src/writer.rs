//! Summary CSV output

use std::fs::File;
use std::io::Write;
use std::path::Path;

use csv::{QuoteStyle, Terminator, WriterBuilder};
use tracing::info;

use crate::error::{AverageError, Result};
use crate::runner::ResultRow;

/// Fixed header of the summary table
pub const SUMMARY_HEADER: [&str; 4] = [
    "instance name",
    "number of vertices",
    "average time [ns]",
    "average error [%]",
];

/// Format a float the way the summary table stores it: shortest round-trip
/// representation, always with a decimal point (`0.0`, `103.33`).
pub fn format_value(value: f64) -> String {
    format!("{:?}", value)
}

/// Write the summary table to any writer.
///
/// The header is emitted even when `rows` is empty. Records end with `\r\n`.
pub fn write_summary<W: Write>(
    writer: W,
    rows: &[ResultRow],
) -> std::result::Result<(), csv::Error> {
    let mut wtr = WriterBuilder::new()
        .quote_style(QuoteStyle::Necessary)
        .terminator(Terminator::CRLF)
        .from_writer(writer);

    wtr.write_record(SUMMARY_HEADER)?;
    for row in rows {
        wtr.write_record([
            row.instance_name.clone(),
            row.vertex_count.to_string(),
            format_value(row.average_time_ns),
            format_value(row.average_error_pct),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

/// Write the summary table to `path`, replacing any existing file.
pub fn write_summary_file<P: AsRef<Path>>(path: P, rows: &[ResultRow]) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|source| AverageError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    write_summary(file, rows).map_err(|e| AverageError::from_csv(path, e))?;

    info!(path = %path.display(), rows = rows.len(), "Wrote summary table");
    Ok(())
}
