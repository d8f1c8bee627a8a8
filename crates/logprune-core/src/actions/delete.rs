//! Delete action: the retention step run after each rollover.
//!
//! 1. Resolve the base path (property substitution, then absolute)
//! 2. Reset every condition's accumulated state
//! 3. Walk: straight into the deleting visitor, or collect + sort first, or
//!    collect + sort + filter + selector when a script is configured
//! 4. Report success; failures become `false` at the `run` boundary

use std::sync::Arc;
use std::time::Instant;

use super::path_action::PathAction;
use super::script::ScriptSelect;
use super::{guarded_run, Action};
use crate::conditions::PathCondition;
use crate::config::Substitutor;
use crate::errors::{ActionError, ConfigError};
use crate::events::{EventDispatcher, RetentionEventHandler, WalkCompleteEvent, WalkStartedEvent};
use crate::walker::{
    walk_file_tree, DeletingVisitor, DeletionReport, FileVisitor, PathSorter, SortingVisitor,
    WalkOptions,
};

const KIND: &str = "DeleteAction";

/// Deletes the files under a base directory that the root conditions accept.
///
/// All root conditions must accept a file for it to be deleted. In test mode the
/// accepted files are only reported.
#[derive(Debug)]
pub struct DeleteAction {
    path: PathAction,
    sorter: Option<PathSorter>,
    script: ScriptSelect,
    test_mode: bool,
    events: EventDispatcher,
    last_report: Option<DeletionReport>,
    complete: bool,
    closed: bool,
}

impl DeleteAction {
    pub fn builder(base_path: impl Into<String>) -> DeleteActionBuilder {
        DeleteActionBuilder::new(base_path)
    }

    pub fn path_action(&self) -> &PathAction {
        &self.path
    }

    pub fn sorter(&self) -> Option<PathSorter> {
        self.sorter
    }

    pub fn script(&self) -> &ScriptSelect {
        &self.script
    }

    pub fn is_test_mode(&self) -> bool {
        self.test_mode
    }

    /// Report of the most recent successful execution.
    pub fn last_report(&self) -> Option<&DeletionReport> {
        self.last_report.as_ref()
    }

    /// Runs one retention pass and returns what it did.
    pub fn execute_with_report(&mut self) -> Result<DeletionReport, ActionError> {
        let base = self.path.resolve_base_path()?;
        let options = self.path.walk_options(base);
        self.path.reset_conditions();

        tracing::debug!(
            configured = self.path.configured_base(),
            base = %options.base.display(),
            max_depth = options.max_depth,
            follow_links = options.follow_links,
            test_mode = self.test_mode,
            "starting delete walk"
        );
        self.events.emit_walk_started(&WalkStartedEvent {
            action_kind: KIND,
            configured_base: self.path.configured_base().to_string(),
            base: options.base.clone(),
            test_mode: self.test_mode,
        });

        let start = Instant::now();
        let report = if self.script.is_enabled() {
            self.delete_selected(&options)?
        } else if let Some(sorter) = self.sorter {
            self.delete_sorted(&options, sorter)?
        } else {
            self.delete_unsorted(&options)?
        };
        let duration_ms = start.elapsed().as_millis() as u64;

        tracing::debug!(
            base = %options.base.display(),
            visited = report.visited,
            selected = report.selected(),
            duration_ms,
            "delete walk complete"
        );
        self.events.emit_walk_complete(&WalkCompleteEvent {
            action_kind: KIND,
            base: options.base.clone(),
            visited: report.visited,
            selected: report.selected(),
            duration_ms,
        });

        self.last_report = Some(report.clone());
        Ok(report)
    }

    fn delete_unsorted(&mut self, options: &WalkOptions) -> Result<DeletionReport, ActionError> {
        let mut visitor = DeletingVisitor::new(
            &options.base,
            self.path.conditions_mut(),
            self.test_mode,
            &self.events,
        );
        walk_file_tree(options, &mut visitor)?;
        Ok(visitor.into_report())
    }

    fn delete_sorted(
        &mut self,
        options: &WalkOptions,
        sorter: PathSorter,
    ) -> Result<DeletionReport, ActionError> {
        let mut sorting = SortingVisitor::new();
        walk_file_tree(options, &mut sorting)?;
        let vanished = sorting.take_vanished();
        let entries = sorting.into_sorted(sorter);
        tracing::trace!(count = entries.len(), ?sorter, "sorted paths");

        let mut visitor = DeletingVisitor::new(
            &options.base,
            self.path.conditions_mut(),
            self.test_mode,
            &self.events,
        );
        for path in &vanished {
            visitor.record_vanished(path);
        }
        for entry in entries {
            visitor.visit_file(entry)?;
        }
        Ok(visitor.into_report())
    }

    fn delete_selected(&mut self, options: &WalkOptions) -> Result<DeletionReport, ActionError> {
        let mut sorting = SortingVisitor::new();
        walk_file_tree(options, &mut sorting)?;
        let vanished = sorting.take_vanished();
        let entries = sorting.into_sorted(self.sorter.unwrap_or_default());

        let mut visitor = DeletingVisitor::new(
            &options.base,
            self.path.conditions_mut(),
            self.test_mode,
            &self.events,
        );
        for path in &vanished {
            visitor.record_vanished(path);
        }
        let candidates: Vec<_> = entries
            .into_iter()
            .filter(|entry| visitor.accepts(entry))
            .collect();

        let selected = self.script.select(&options.base, candidates);
        tracing::trace!(count = selected.len(), "paths selected for deletion");
        for entry in &selected {
            visitor.delete(entry)?;
        }
        Ok(visitor.into_report())
    }
}

impl Action for DeleteAction {
    fn kind(&self) -> &'static str {
        KIND
    }

    fn execute(&mut self) -> Result<bool, ActionError> {
        self.execute_with_report().map(|_| true)
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
    }

    fn is_complete(&self) -> bool {
        self.complete
    }
}

/// Builder for [`DeleteAction`]. Validation happens in [`build`](Self::build).
#[derive(Debug)]
pub struct DeleteActionBuilder {
    base_path: String,
    substitutor: Substitutor,
    max_depth: usize,
    follow_links: bool,
    conditions: Vec<Box<dyn PathCondition>>,
    sorter: Option<PathSorter>,
    script: ScriptSelect,
    test_mode: bool,
    events: EventDispatcher,
}

impl DeleteActionBuilder {
    pub fn new(base_path: impl Into<String>) -> Self {
        Self {
            base_path: base_path.into(),
            substitutor: Substitutor::default(),
            max_depth: 1,
            follow_links: false,
            conditions: Vec::new(),
            sorter: None,
            script: ScriptSelect::disabled(),
            test_mode: false,
            events: EventDispatcher::new(),
        }
    }

    pub fn substitutor(mut self, substitutor: Substitutor) -> Self {
        self.substitutor = substitutor;
        self
    }

    /// Directory levels to visit below the base (default 1: direct children).
    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn follow_links(mut self, follow_links: bool) -> Self {
        self.follow_links = follow_links;
        self
    }

    pub fn condition(mut self, condition: impl PathCondition + 'static) -> Self {
        self.conditions.push(Box::new(condition));
        self
    }

    pub fn conditions(mut self, conditions: Vec<Box<dyn PathCondition>>) -> Self {
        self.conditions.extend(conditions);
        self
    }

    pub fn sorter(mut self, sorter: PathSorter) -> Self {
        self.sorter = Some(sorter);
        self
    }

    pub fn script(mut self, script: ScriptSelect) -> Self {
        self.script = script;
        self
    }

    pub fn test_mode(mut self, test_mode: bool) -> Self {
        self.test_mode = test_mode;
        self
    }

    pub fn events(mut self, events: EventDispatcher) -> Self {
        self.events = events;
        self
    }

    pub fn event_handler(mut self, handler: Arc<dyn RetentionEventHandler>) -> Self {
        self.events.register(handler);
        self
    }

    pub fn build(self) -> Result<DeleteAction, ConfigError> {
        if self.base_path.trim().is_empty() {
            return Err(ConfigError::ValidationFailed {
                field: "base_path".to_string(),
                message: "no base path provided".to_string(),
            });
        }
        if self.conditions.is_empty() && !self.script.is_enabled() {
            return Err(ConfigError::ValidationFailed {
                field: "conditions".to_string(),
                message: "at least one path condition or an enabled script is required"
                    .to_string(),
            });
        }

        let path = PathAction::new(self.base_path)
            .with_substitutor(self.substitutor)
            .with_max_depth(self.max_depth)
            .with_follow_links(self.follow_links)
            .with_conditions(self.conditions);

        Ok(DeleteAction {
            path,
            sorter: self.sorter,
            script: self.script,
            test_mode: self.test_mode,
            events: self.events,
            last_report: None,
            complete: false,
            closed: false,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conditions::NameMatch;

    #[test]
    fn test_build_requires_base_path() {
        let err = DeleteAction::builder("  ")
            .condition(NameMatch::glob("*.gz").unwrap())
            .build()
            .unwrap_err();
        assert!(matches!(err, ConfigError::ValidationFailed { ref field, .. } if field == "base_path"));
    }

    #[test]
    fn test_build_refuses_unconditional_delete() {
        let err = DeleteAction::builder("/logs").build().unwrap_err();
        assert!(matches!(err, ConfigError::ValidationFailed { ref field, .. } if field == "conditions"));

        let err = DeleteAction::builder("/logs")
            .script(ScriptSelect::disabled())
            .build()
            .unwrap_err();
        assert!(matches!(err, ConfigError::ValidationFailed { .. }));
    }

    #[test]
    fn test_closed_action_does_not_run() {
        let dir = tempfile::TempDir::new().unwrap();
        let file = dir.path().join("app.log.gz");
        std::fs::write(&file, "x").unwrap();

        let mut action = DeleteAction::builder(dir.path().display().to_string())
            .condition(NameMatch::glob("*.gz").unwrap())
            .build()
            .unwrap();
        action.close();

        assert!(!action.run());
        assert!(file.exists());
        assert!(!action.is_complete());
    }

    #[test]
    fn test_run_marks_complete() {
        let dir = tempfile::TempDir::new().unwrap();
        let mut action = DeleteAction::builder(dir.path().display().to_string())
            .condition(NameMatch::glob("*.gz").unwrap())
            .build()
            .unwrap();

        assert!(action.run());
        assert!(action.is_complete());
        assert_eq!(action.last_report().map(|r| r.visited), Some(0));
    }
}
