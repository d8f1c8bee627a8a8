//! File tree walk errors.

use std::path::PathBuf;

use super::error_code::{self, ErrorCode};

/// Errors that abort a file tree walk.
///
/// A vanished file is never one of these: visitors skip it and the walk goes on.
#[derive(Debug, thiserror::Error)]
pub enum WalkError {
    #[error("IO error visiting {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("File system loop detected at {path}")]
    Loop { path: PathBuf },

    #[error("Failed to delete {path}: {source}")]
    Delete {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to update attributes of {path}: {source}")]
    Attributes {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl WalkError {
    /// The underlying I/O error, when there is one.
    pub fn io_error(&self) -> Option<&std::io::Error> {
        match self {
            Self::Io { source, .. }
            | Self::Delete { source, .. }
            | Self::Attributes { source, .. } => Some(source),
            Self::Loop { .. } => None,
        }
    }
}

impl ErrorCode for WalkError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Io { .. } => error_code::WALK_ERROR,
            Self::Loop { .. } => error_code::SYMLINK_LOOP,
            Self::Delete { .. } => error_code::DELETE_FAILED,
            Self::Attributes { .. } => error_code::ATTRIBUTE_UPDATE_FAILED,
        }
    }
}
