//! Actions run after a rollover.
//!
//! `execute` does the work and may fail; `run` is the boundary the appender calls
//! and never lets an error or a panic escape.

mod composite;
mod delete;
mod path_action;
#[cfg(unix)]
mod posix;
mod script;

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

pub use composite::CompositeAction;
pub use delete::{DeleteAction, DeleteActionBuilder};
pub use path_action::PathAction;
#[cfg(unix)]
pub use posix::{parse_permissions, PosixAttributeAction, PosixAttributes};
pub use script::{DeletionSelector, ScriptSelect};

use crate::errors::{ActionError, ErrorCode};
use crate::events::{ActionFailedEvent, EventDispatcher};

/// A unit of post-rollover work.
pub trait Action: Send {
    /// Short name used in diagnostics.
    fn kind(&self) -> &'static str;

    /// Performs the action. `Ok(false)` means it ran but did not succeed.
    fn execute(&mut self) -> Result<bool, ActionError>;

    /// Runs the action, reporting any error or panic instead of returning it.
    /// Does nothing once the action is closed.
    fn run(&mut self) -> bool;

    /// Prevents any further runs.
    fn close(&mut self);

    /// True once a run has finished, successfully or not.
    fn is_complete(&self) -> bool;
}

/// Calls `f`, turning errors and panics into `false` plus a diagnostic.
///
/// Every failure is logged and handed to `events` as an `ActionFailedEvent`.
pub fn guarded_run<F>(kind: &'static str, events: &EventDispatcher, f: F) -> bool
where
    F: FnOnce() -> Result<bool, ActionError>,
{
    let outcome = panic::catch_unwind(AssertUnwindSafe(f)).unwrap_or_else(|payload| {
        Err(ActionError::Panicked {
            message: panic_message(payload.as_ref()),
        })
    });

    match outcome {
        Ok(succeeded) => succeeded,
        Err(error) => {
            report_failure(kind, events, &error);
            false
        }
    }
}

pub(crate) fn report_failure(kind: &'static str, events: &EventDispatcher, error: &ActionError) {
    tracing::warn!(
        action = kind,
        code = error.error_code(),
        error = %error,
        "exception reported by action"
    );
    events.emit_action_failed(&ActionFailedEvent {
        action_kind: kind,
        error_code: error.error_code(),
        cause: error.to_string(),
    });
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
