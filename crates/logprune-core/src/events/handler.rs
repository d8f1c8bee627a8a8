//! RetentionEventHandler trait, all methods with no-op defaults.

use super::types::*;

/// Trait for observing retention actions.
///
/// Handlers only override the events they care about. `Send + Sync` so a
/// handler can be shared between the actions of several appenders.
pub trait RetentionEventHandler: Send + Sync {
    // ---- Walk lifecycle ----
    fn on_walk_started(&self, _event: &WalkStartedEvent) {}
    fn on_walk_complete(&self, _event: &WalkCompleteEvent) {}

    // ---- Per-file outcomes ----
    fn on_file_deleted(&self, _event: &FileDeletedEvent) {}
    fn on_dry_run_match(&self, _event: &DryRunMatchEvent) {}
    fn on_file_vanished(&self, _event: &FileVanishedEvent) {}

    // ---- Errors ----
    fn on_action_failed(&self, _event: &ActionFailedEvent) {}
}
