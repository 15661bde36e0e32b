//! CLI error types.

use thiserror::Error;

use tgkit_core::{ByteSizeError, DateTimeError, LinkError};

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

/// Errors that can occur in the CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// The link could not be decoded.
    #[error("invalid link: {0}")]
    Link(#[from] LinkError),

    /// The byte size could not be formatted.
    #[error(transparent)]
    ByteSize(#[from] ByteSizeError),

    /// The date/time output format is not usable.
    #[error(transparent)]
    DateTime(#[from] DateTimeError),

    /// JSON output could not be produced.
    #[error("serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    /// Input that no helper could make sense of.
    #[error("invalid input: {0}")]
    InvalidInput(String),
}
