//! Loading per-instance measurement files
//!
//! A measurement file is a CSV with one header row followed by one row per
//! benchmark run. Columns are positional:
//!
//! ```text
//! <ignored>, vertex_count, runtime_ns, error_pct
//! ```
//!
//! Every row of a file must report the same vertex count.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use csv::{ReaderBuilder, StringRecord, Trim};
use tracing::debug;

use crate::error::{AverageError, Result};

/// Column holding the number of vertices of the instance
pub const VERTEX_COUNT_COLUMN: usize = 1;
/// Column holding the measured runtime in nanoseconds
pub const RUNTIME_COLUMN: usize = 2;
/// Column holding the relative error in percent
pub const ERROR_COLUMN: usize = 3;

/// Samples read from one measurement file
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Measurements {
    /// Vertex count shared by all rows, `None` when the file has no data rows
    pub vertex_count: Option<usize>,
    /// Runtime samples in nanoseconds, in file order
    pub runtimes_ns: Vec<u64>,
    /// Error samples in percent, in file order
    pub errors_pct: Vec<f64>,
}

impl Measurements {
    /// Load `file_name` from `dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened, has no header row, a
    /// data row is short or non-numeric, or rows disagree on the vertex count.
    pub fn load<P: AsRef<Path>>(dir: P, file_name: &str) -> Result<Self> {
        Self::from_path(dir.as_ref().join(file_name))
    }

    /// Load a measurement file from an explicit path.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| AverageError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let measurements = Self::from_reader(file, path)?;

        debug!(
            path = %path.display(),
            rows = measurements.len(),
            "Loaded measurement file"
        );
        Ok(measurements)
    }

    /// Parse measurements from any reader; `path` is only used in errors.
    pub fn from_reader<R: Read>(reader: R, path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .trim(Trim::All)
            .from_reader(reader);

        let mut record = StringRecord::new();

        // header
        let has_header = reader
            .read_record(&mut record)
            .map_err(|e| AverageError::from_csv(&path, e))?;
        if !has_header {
            return Err(AverageError::EmptyFile { path });
        }

        let mut measurements = Measurements::default();

        while reader
            .read_record(&mut record)
            .map_err(|e| AverageError::from_csv(&path, e))?
        {
            let line = record.position().map(|p| p.line()).unwrap_or(0);

            let vertex_count: usize = parse_field(&record, VERTEX_COUNT_COLUMN, &path, line)?;
            let runtime: u64 = parse_field(&record, RUNTIME_COLUMN, &path, line)?;
            let error: f64 = parse_field(&record, ERROR_COLUMN, &path, line)?;

            match measurements.vertex_count {
                Some(expected) if expected != vertex_count => {
                    return Err(AverageError::InconsistentVertexCount {
                        path,
                        line,
                        expected,
                        found: vertex_count,
                    });
                }
                Some(_) => {}
                None => measurements.vertex_count = Some(vertex_count),
            }

            measurements.runtimes_ns.push(runtime);
            measurements.errors_pct.push(error);
        }

        Ok(measurements)
    }

    /// Number of data rows
    pub fn len(&self) -> usize {
        self.runtimes_ns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.runtimes_ns.is_empty()
    }

    /// Runtime samples widened to `f64` for the statistics functions
    pub fn runtimes_f64(&self) -> Vec<f64> {
        self.runtimes_ns.iter().map(|&r| r as f64).collect()
    }
}

fn parse_field<T: FromStr>(
    record: &StringRecord,
    column: usize,
    path: &Path,
    line: u64,
) -> Result<T> {
    let raw = record.get(column).ok_or_else(|| AverageError::MissingColumn {
        path: path.to_path_buf(),
        line,
        column,
        found: record.len(),
    })?;

    raw.parse().map_err(|_| AverageError::InvalidNumber {
        path: path.to_path_buf(),
        line,
        column,
        value: raw.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(input: &str) -> Result<Measurements> {
        Measurements::from_reader(input.as_bytes(), "test.csv")
    }

    #[test]
    fn test_parse_burma14_rows() {
        let input = "\
run,vertices,time,error
0,14,100,0.0
1,14,110,0.0
2,14,105,0.0
";
        let m = parse(input).unwrap();

        assert_eq!(m.vertex_count, Some(14));
        assert_eq!(m.runtimes_ns, vec![100, 110, 105]);
        assert_eq!(m.errors_pct, vec![0.0, 0.0, 0.0]);
        assert_eq!(m.len(), 3);
    }

    #[test]
    fn test_first_column_is_ignored() {
        let input = "a,b,c,d\nwhatever,17,2000,1.25\n";
        let m = parse(input).unwrap();

        assert_eq!(m.vertex_count, Some(17));
        assert_eq!(m.runtimes_ns, vec![2000]);
        assert_eq!(m.errors_pct, vec![1.25]);
    }

    #[test]
    fn test_extra_columns_are_ignored() {
        let input = "a,b,c,d,e\n0,17,2000,1.25,extra\n";
        let m = parse(input).unwrap();

        assert_eq!(m.runtimes_ns, vec![2000]);
    }

    #[test]
    fn test_whitespace_is_trimmed() {
        let input = "a, b, c, d\n0, 21, 300 , 0.5\n";
        let m = parse(input).unwrap();

        assert_eq!(m.vertex_count, Some(21));
        assert_eq!(m.runtimes_ns, vec![300]);
    }

    #[test]
    fn test_header_only_file() {
        let m = parse("a,b,c,d\n").unwrap();

        assert!(m.is_empty());
        assert_eq!(m.vertex_count, None);
    }

    #[test]
    fn test_empty_file() {
        let err = parse("").unwrap_err();
        assert!(matches!(err, AverageError::EmptyFile { .. }));
    }

    #[test]
    fn test_short_row() {
        let err = parse("a,b,c,d\n0,14,100\n").unwrap_err();

        match err {
            AverageError::MissingColumn {
                line,
                column,
                found,
                ..
            } => {
                assert_eq!(line, 2);
                assert_eq!(column, ERROR_COLUMN);
                assert_eq!(found, 3);
            }
            other => panic!("Expected MissingColumn, got {other:?}"),
        }
    }

    #[test]
    fn test_non_numeric_runtime() {
        let err = parse("a,b,c,d\n0,14,100,0.0\n1,14,fast,0.0\n").unwrap_err();

        match err {
            AverageError::InvalidNumber {
                line,
                column,
                value,
                ..
            } => {
                assert_eq!(line, 3);
                assert_eq!(column, RUNTIME_COLUMN);
                assert_eq!(value, "fast");
            }
            other => panic!("Expected InvalidNumber, got {other:?}"),
        }
    }

    #[test]
    fn test_fractional_runtime_is_rejected() {
        let err = parse("a,b,c,d\n0,14,100.5,0.0\n").unwrap_err();
        assert!(matches!(err, AverageError::InvalidNumber { column: 2, .. }));
    }

    #[test]
    fn test_negative_runtime_is_rejected() {
        let err = parse("a,b,c,d\n0,14,-100,0.0\n").unwrap_err();
        assert!(matches!(err, AverageError::InvalidNumber { line: 2, column: 2, .. }));
    }

    #[test]
    fn test_inconsistent_vertex_count() {
        let err = parse("a,b,c,d\n0,14,100,0.0\n1,15,100,0.0\n").unwrap_err();

        match err {
            AverageError::InconsistentVertexCount {
                line,
                expected,
                found,
                ..
            } => {
                assert_eq!(line, 3);
                assert_eq!(expected, 14);
                assert_eq!(found, 15);
            }
            other => panic!("Expected InconsistentVertexCount, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = Measurements::load("/nonexistent/results", "burma14.tsp.csv").unwrap_err();

        assert!(err.is_io());
        assert!(err.to_string().contains("burma14.tsp.csv"));
    }

    #[test]
    fn test_runtimes_f64() {
        let m = parse("a,b,c,d\n0,14,100,0.0\n1,14,250,0.0\n").unwrap();
        assert_eq!(m.runtimes_f64(), vec![100.0, 250.0]);
    }
}
