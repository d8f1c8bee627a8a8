//! Runs several actions in sequence.

use super::{guarded_run, report_failure, Action};
use crate::errors::ActionError;
use crate::events::EventDispatcher;

const KIND: &str = "CompositeAction";

/// Executes child actions in order.
///
/// With `stop_on_error` the first failing or unsuccessful child ends the run.
/// Otherwise every child runs; the result is false if any failed, and the first
/// error is returned after the rest have executed.
pub struct CompositeAction {
    actions: Vec<Box<dyn Action>>,
    stop_on_error: bool,
    events: EventDispatcher,
    complete: bool,
    closed: bool,
}

impl CompositeAction {
    pub fn new(actions: Vec<Box<dyn Action>>, stop_on_error: bool) -> Self {
        Self {
            actions,
            stop_on_error,
            events: EventDispatcher::new(),
            complete: false,
            closed: false,
        }
    }

    pub fn with_events(mut self, events: EventDispatcher) -> Self {
        self.events = events;
        self
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

impl Action for CompositeAction {
    fn kind(&self) -> &'static str {
        KIND
    }

    fn execute(&mut self) -> Result<bool, ActionError> {
        if self.stop_on_error {
            for action in &mut self.actions {
                if !action.execute()? {
                    return Ok(false);
                }
            }
            return Ok(true);
        }

        let mut status = true;
        let mut first_error = None;
        for action in &mut self.actions {
            match action.execute() {
                Ok(succeeded) => status &= succeeded,
                Err(error) => {
                    status = false;
                    if first_error.is_none() {
                        first_error = Some(error);
                    } else {
                        report_failure(action.kind(), &self.events, &error);
                    }
                }
            }
        }
        match first_error {
            Some(error) => Err(error),
            None => Ok(status),
        }
    }

    fn run(&mut self) -> bool {
        if self.closed {
            return false;
        }
        let events = self.events.clone();
        let succeeded = guarded_run(KIND, &events, || self.execute());
        self.complete = true;
        succeeded
    }

    fn close(&mut self) {
        self.closed = true;
        for action in &mut self.actions {
            action.close();
        }
    }

    fn is_complete(&self) -> bool {
        self.complete
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::WalkError;

    struct Scripted {
        outcome: fn() -> Result<bool, ActionError>,
        executions: usize,
        closed: bool,
    }

    impl Scripted {
        fn boxed(outcome: fn() -> Result<bool, ActionError>) -> Box<dyn Action> {
            Box::new(Self {
                outcome,
                executions: 0,
                closed: false,
            })
        }
    }

    impl Action for Scripted {
        fn kind(&self) -> &'static str {
            "Scripted"
        }

        fn execute(&mut self) -> Result<bool, ActionError> {
            self.executions += 1;
            (self.outcome)()
        }

        fn run(&mut self) -> bool {
            self.execute().unwrap_or(false)
        }

        fn close(&mut self) {
            self.closed = true;
        }

        fn is_complete(&self) -> bool {
            self.executions > 0
        }
    }

    fn fails() -> Result<bool, ActionError> {
        Err(WalkError::Loop {
            path: "/logs".into(),
        }
        .into())
    }

    #[test]
    fn test_stop_on_error_stops_at_first_false() {
        let mut composite = CompositeAction::new(
            vec![Scripted::boxed(|| Ok(true)), Scripted::boxed(|| Ok(false)), Scripted::boxed(fails)],
            true,
        );
        assert!(!composite.execute().unwrap());
        assert!(!composite.actions[2].is_complete());
    }

    #[test]
    fn test_continue_runs_all_and_returns_first_error() {
        let mut composite = CompositeAction::new(
            vec![Scripted::boxed(fails), Scripted::boxed(|| Ok(true))],
            false,
        );
        assert!(matches!(composite.execute(), Err(ActionError::Walk(WalkError::Loop { .. }))));
        assert!(composite.actions[1].is_complete());
    }

    #[test]
    fn test_run_converts_error_to_false() {
        let mut composite = CompositeAction::new(vec![Scripted::boxed(fails)], false);
        assert!(!composite.run());
        assert!(composite.is_complete());
    }

    #[test]
    fn test_close_propagates() {
        let mut composite = CompositeAction::new(vec![Scripted::boxed(|| Ok(true))], false);
        composite.close();
        assert!(!composite.run());
    }
}
