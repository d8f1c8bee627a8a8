//! Configuration errors.

use super::error_code::{self, ErrorCode};

/// Errors raised while building conditions and actions from configuration.
///
/// These always surface at construction time, never during a walk.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config file not found: {path}")]
    FileNotFound { path: String },

    #[error("Config parse error in {path}: {message}")]
    ParseError { path: String, message: String },

    #[error("Config validation failed for {field}: {message}")]
    ValidationFailed { field: String, message: String },

    #[error("Invalid config value for {field}: {message}")]
    InvalidValue { field: String, message: String },

    #[error("Text cannot be parsed to a duration: '{text}' ({reason})")]
    InvalidDuration { text: String, reason: String },

    #[error("Text cannot be parsed to a file size: '{text}'")]
    InvalidFileSize { text: String },

    #[error("Invalid pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    #[error("{condition} requires a glob or a regex pattern")]
    MissingPattern { condition: String },

    #[error("{condition} requires a child condition")]
    MissingChild { condition: String },
}

impl ErrorCode for ConfigError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidDuration { .. } => error_code::INVALID_DURATION,
            Self::InvalidFileSize { .. } => error_code::INVALID_FILE_SIZE,
            Self::InvalidPattern { .. } | Self::MissingPattern { .. } => {
                error_code::INVALID_PATTERN
            }
            _ => error_code::CONFIG_ERROR,
        }
    }
}
