use std::io;

use thiserror::Error;

/// Library-wide error type for brillianse operations.
#[derive(Debug, Error)]
pub enum AppError {
    /// Underlying I/O failure.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// Configuration or environment issue.
    #[error("{0}")]
    Configuration(String),

    /// Configuration values failed validation.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Response sequence has the wrong length or contains an unrecognised answer.
    #[error("Invalid response vector: {0}")]
    InvalidResponseVector(String),

    /// User identifier is invalid.
    #[error("Invalid user identifier '{0}': must be alphanumeric with hyphens or underscores")]
    InvalidUserId(String),

    /// Group name is not part of the configured table.
    #[error("Unknown group '{name}'. Available: {available}")]
    UnknownGroup { name: String, available: String },

    /// Generation API errored or returned malformed or incomplete output.
    #[error("Generation failed: {reason}")]
    GenerationFailure { reason: String, status: Option<u16> },

    /// Headline source unreachable or returned a non-success status.
    #[error("Headline fetch failed: {0}")]
    UpstreamFetchFailure(String),

    /// Persistence layer unreachable or temporarily refusing requests.
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    /// Persistence layer rejected the request.
    #[error("Store request failed ({status}): {message}")]
    StoreRequestFailed { status: u16, message: String },

    /// An archive for the date already exists with different content.
    #[error("Archive for {date} already exists with different content")]
    ArchiveConflict { date: String },

    /// A stored archive cannot be republished as the day's batch.
    #[error("Archive for {date} is unusable: {reason}")]
    InvalidArchive { date: String, reason: String },
}

impl AppError {
    pub fn config_error<S: Into<String>>(message: S) -> Self {
        AppError::Configuration(message.into())
    }

    pub fn generation<S: Into<String>>(reason: S) -> Self {
        AppError::GenerationFailure { reason: reason.into(), status: None }
    }
}
