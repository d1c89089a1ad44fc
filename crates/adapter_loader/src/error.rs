//! Loader and writer errors.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while reading positions or writing reports.
#[derive(Debug, Error)]
pub enum LoaderError {
    /// File could not be opened, created or flushed
    #[error("IO error on {path}: {source}")]
    Io {
        /// File involved
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Malformed CSV or a field that does not deserialize
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Audit serialization failure
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Record parsed but carries an unusable value
    #[error("Invalid record at line {line}: {reason}")]
    InvalidRecord {
        /// 1-based file line, header included
        line: usize,
        /// What was wrong
        reason: String,
    },
}

impl LoaderError {
    /// Create an IO error for `path`
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create an invalid record error
    pub fn invalid_record(line: usize, reason: impl Into<String>) -> Self {
        Self::InvalidRecord {
            line,
            reason: reason.into(),
        }
    }
}
