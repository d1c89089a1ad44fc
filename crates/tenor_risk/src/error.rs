//! Expansion error types.

use tenor_core::TenorError;
use thiserror::Error;

/// Errors that abort a position expansion run.
///
/// Row numbers are 1-based positions in the input sequence.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ExpansionError {
    /// The row's tenor is structurally invalid (e.g. a malformed spread).
    #[error("Row {row}: {source}")]
    Tenor {
        /// 1-based input row.
        row: usize,
        /// Underlying parse failure.
        #[source]
        source: TenorError,
    },

    /// Strict mode: a compound tenor missed its mapping table.
    #[error("Row {row}: unmapped tenor '{tenor}' (lookup key '{normalized}') outside the configured horizon")]
    UnmappedTenor {
        /// 1-based input row.
        row: usize,
        /// Raw compound code.
        tenor: String,
        /// Normalised lookup key.
        normalized: String,
    },
}

impl ExpansionError {
    /// 1-based input row of the failure.
    pub fn row(&self) -> usize {
        match self {
            ExpansionError::Tenor { row, .. } | ExpansionError::UnmappedTenor { row, .. } => *row,
        }
    }
}
