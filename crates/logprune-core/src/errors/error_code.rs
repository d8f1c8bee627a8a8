//! ErrorCode trait for structured diagnostics.

/// Stable, machine-readable code for an error.
///
/// Diagnostics sinks receive the code alongside the rendered message so they can
/// aggregate failures without parsing text.
pub trait ErrorCode {
    /// Returns the error code string (e.g., "WALK_ERROR").
    fn error_code(&self) -> &'static str;

    /// Returns the formatted diagnostic string: `[ERROR_CODE] message`.
    fn coded_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const INVALID_DURATION: &str = "INVALID_DURATION";
pub const INVALID_FILE_SIZE: &str = "INVALID_FILE_SIZE";
pub const INVALID_PATTERN: &str = "INVALID_PATTERN";
pub const WALK_ERROR: &str = "WALK_ERROR";
pub const SYMLINK_LOOP: &str = "SYMLINK_LOOP";
pub const DELETE_FAILED: &str = "DELETE_FAILED";
pub const ATTRIBUTE_UPDATE_FAILED: &str = "ATTRIBUTE_UPDATE_FAILED";
pub const BASE_PATH_ERROR: &str = "BASE_PATH_ERROR";
pub const ACTION_PANICKED: &str = "ACTION_PANICKED";
