//! Event payload types.

use std::path::PathBuf;

/// Payload for `on_walk_started`.
#[derive(Debug, Clone)]
pub struct WalkStartedEvent {
    pub action_kind: &'static str,
    /// Base path as configured, before substitution
    pub configured_base: String,
    /// Resolved absolute base path
    pub base: PathBuf,
    pub test_mode: bool,
}

/// Payload for `on_walk_complete`.
#[derive(Debug, Clone)]
pub struct WalkCompleteEvent {
    pub action_kind: &'static str,
    pub base: PathBuf,
    pub visited: usize,
    pub selected: usize,
    pub duration_ms: u64,
}

/// Payload for `on_file_deleted`.
#[derive(Debug, Clone)]
pub struct FileDeletedEvent {
    pub path: PathBuf,
    pub size: u64,
}

/// Payload for `on_dry_run_match`: a file that would have been acted on.
#[derive(Debug, Clone)]
pub struct DryRunMatchEvent {
    pub path: PathBuf,
    pub size: u64,
}

/// Payload for `on_file_vanished`.
#[derive(Debug, Clone)]
pub struct FileVanishedEvent {
    pub path: PathBuf,
}

/// Payload for `on_action_failed`: the structured warning record for a failed run.
#[derive(Debug, Clone)]
pub struct ActionFailedEvent {
    pub action_kind: &'static str,
    pub error_code: &'static str,
    pub cause: String,
}
