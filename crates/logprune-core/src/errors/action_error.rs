//! Action errors.

use std::path::PathBuf;

use super::error_code::{self, ErrorCode};
use super::{ConfigError, WalkError};

/// Errors that can occur while executing an action.
/// Aggregates subsystem errors via `From` conversions.
#[derive(Debug, thiserror::Error)]
pub enum ActionError {
    #[error("Walk error: {0}")]
    Walk(#[from] WalkError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Cannot resolve base path '{path}': {source}")]
    BasePath {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Action panicked: {message}")]
    Panicked { message: String },
}

impl ErrorCode for ActionError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Walk(e) => e.error_code(),
            Self::Config(e) => e.error_code(),
            Self::BasePath { .. } => error_code::BASE_PATH_ERROR,
            Self::Panicked { .. } => error_code::ACTION_PANICKED,
        }
    }
}
