//! EventDispatcher: synchronous event dispatch with zero overhead when empty.

use std::sync::Arc;

use super::handler::RetentionEventHandler;
use super::types::*;

/// Synchronous event dispatcher wrapping a list of handlers.
///
/// Cloning is cheap and shares the registered handlers.
#[derive(Clone, Default)]
pub struct EventDispatcher {
    handlers: Vec<Arc<dyn RetentionEventHandler>>,
}

impl EventDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an event handler.
    pub fn register(&mut self, handler: Arc<dyn RetentionEventHandler>) {
        self.handlers.push(handler);
    }

    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }

    /// Emit an event to all registered handlers.
    /// A panicking handler is logged and does not stop the others.
    fn emit<F: Fn(&dyn RetentionEventHandler)>(&self, f: F) {
        for handler in &self.handlers {
            let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                f(handler.as_ref());
            }));
            if result.is_err() {
                tracing::warn!("retention event handler panicked; continuing");
            }
        }
    }

    // ---- Walk lifecycle ----
    pub fn emit_walk_started(&self, event: &WalkStartedEvent) {
        self.emit(|h| h.on_walk_started(event));
    }

    pub fn emit_walk_complete(&self, event: &WalkCompleteEvent) {
        self.emit(|h| h.on_walk_complete(event));
    }

    // ---- Per-file outcomes ----
    pub fn emit_file_deleted(&self, event: &FileDeletedEvent) {
        self.emit(|h| h.on_file_deleted(event));
    }

    pub fn emit_dry_run_match(&self, event: &DryRunMatchEvent) {
        self.emit(|h| h.on_dry_run_match(event));
    }

    pub fn emit_file_vanished(&self, event: &FileVanishedEvent) {
        self.emit(|h| h.on_file_vanished(event));
    }

    // ---- Errors ----
    pub fn emit_action_failed(&self, event: &ActionFailedEvent) {
        self.emit(|h| h.on_action_failed(event));
    }
}

impl std::fmt::Debug for EventDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventDispatcher")
            .field("handlers", &self.handlers.len())
            .finish()
    }
}
