//! CLI error types

use thiserror::Error;

use crate::http_server::ConfigError;

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

/// CLI errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// I/O failure reading input or serving
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A document file that does not parse as the wire format
    #[error("Invalid document file: {0}")]
    InvalidDocument(#[from] serde_json::Error),

    /// Configuration loading failure
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}
