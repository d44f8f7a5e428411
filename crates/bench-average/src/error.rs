//! Error types for loading, averaging and writing measurement tables

use std::path::PathBuf;
use thiserror::Error;

/// Which sample series of a measurement file an error refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Series {
    Runtime,
    Error,
}

impl std::fmt::Display for Series {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Series::Runtime => f.write_str("runtime"),
            Series::Error => f.write_str("error"),
        }
    }
}

#[derive(Error, Debug)]
pub enum AverageError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error in {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("{path} is empty, expected a header row")]
    EmptyFile { path: PathBuf },

    #[error("{path}:{line}: missing column {column} (row has {found} columns)")]
    MissingColumn {
        path: PathBuf,
        line: u64,
        column: usize,
        found: usize,
    },

    #[error("{path}:{line}: column {column} is not a valid number: {value:?}")]
    InvalidNumber {
        path: PathBuf,
        line: u64,
        column: usize,
        value: String,
    },

    #[error("{path}:{line}: vertex count {found} disagrees with {expected} from earlier rows")]
    InconsistentVertexCount {
        path: PathBuf,
        line: u64,
        expected: usize,
        found: usize,
    },

    #[error("instance {instance} has no {series} samples to average")]
    EmptySamples { instance: String, series: Series },
}

impl AverageError {
    /// Wrap a CSV error, surfacing the inner I/O error as [`AverageError::Io`].
    pub(crate) fn from_csv(path: impl Into<PathBuf>, source: csv::Error) -> Self {
        let path = path.into();
        if source.is_io_error() {
            AverageError::Io {
                path,
                source: source.into(),
            }
        } else {
            AverageError::Csv { path, source }
        }
    }

    /// Whether this error came from the filesystem rather than the file contents
    pub fn is_io(&self) -> bool {
        matches!(self, AverageError::Io { .. })
    }
}

pub type Result<T> = std::result::Result<T, AverageError>;
