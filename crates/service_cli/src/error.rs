//! Error types for the tenorx CLI.

use adapter_loader::LoaderError;
use infra_config::ConfigError;
use tenor_core::TenorError;
use tenor_risk::ExpansionError;
use thiserror::Error;

/// CLI error type
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Input or output file error
    #[error("{0}")]
    Loader(#[from] LoaderError),

    /// Expansion aborted on a row
    #[error("Expansion failed: {0}")]
    Expansion(#[from] ExpansionError),

    /// Tenor given on the command line did not parse
    #[error("Tenor error: {0}")]
    Tenor(#[from] TenorError),

    /// Input file missing
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// Invalid command-line argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Create a file not found error
    pub fn file_not_found(path: impl Into<String>) -> Self {
        Self::FileNotFound(path.into())
    }

    /// Create an invalid argument error
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }
}

/// CLI result type
pub type Result<T> = std::result::Result<T, CliError>;
