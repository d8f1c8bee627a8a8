//! Error handling for logprune.
//! One error enum per subsystem, `thiserror` only.

pub mod action_error;
pub mod config_error;
pub mod error_code;
pub mod walk_error;

pub use action_error::ActionError;
pub use config_error::ConfigError;
pub use error_code::ErrorCode;
pub use walk_error::WalkError;
