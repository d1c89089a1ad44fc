//! Error types for tenor parsing.

use thiserror::Error;

/// Structural tenor errors.
///
/// Lookup misses against the mapping tables are not errors; they surface as
/// [`Resolution::Unmapped`](crate::mapping::Resolution::Unmapped).
///
/// # Examples
/// ```
/// use tenor_core::TenorError;
///
/// let err = TenorError::InvalidSpreadFormat { tenor: "Z6/Z7/F8".to_string(), legs: 3 };
/// assert_eq!(
///     format!("{}", err),
///     "Invalid spread format: 'Z6/Z7/F8' has 3 legs, expected 2 non-empty legs"
/// );
/// ```
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TenorError {
    /// A `/`-joined tenor that does not split into exactly two non-empty legs.
    #[error("Invalid spread format: '{tenor}' has {legs} legs, expected 2 non-empty legs")]
    InvalidSpreadFormat {
        /// The raw spread string.
        tenor: String,
        /// Number of parts after splitting on `/`.
        legs: usize,
    },

    /// Not a `<letter><digit>` contract-month code.
    #[error("Invalid contract month: '{0}'")]
    InvalidContractMonth(String),
}
