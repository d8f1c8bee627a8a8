//! Shared core of actions that walk a base directory and filter with conditions.

use std::path::PathBuf;

use crate::conditions::{self, PathCondition};
use crate::config::Substitutor;
use crate::errors::ActionError;
use crate::walker::WalkOptions;

/// Base path, traversal settings and root conditions of a path-based action.
///
/// The base path is kept as configured (possibly containing `${...}`
/// references) and resolved on every run.
#[derive(Debug)]
pub struct PathAction {
    configured_base: String,
    substitutor: Substitutor,
    max_depth: usize,
    follow_links: bool,
    conditions: Vec<Box<dyn PathCondition>>,
}

impl PathAction {
    pub fn new(configured_base: impl Into<String>) -> Self {
        Self {
            configured_base: configured_base.into(),
            substitutor: Substitutor::default(),
            max_depth: 1,
            follow_links: false,
            conditions: Vec::new(),
        }
    }

    pub fn with_substitutor(mut self, substitutor: Substitutor) -> Self {
        self.substitutor = substitutor;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_follow_links(mut self, follow_links: bool) -> Self {
        self.follow_links = follow_links;
        self
    }

    pub fn with_conditions(mut self, conditions: Vec<Box<dyn PathCondition>>) -> Self {
        self.conditions = conditions;
        self
    }

    /// Base path before substitution, for diagnostics.
    pub fn configured_base(&self) -> &str {
        &self.configured_base
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    pub fn follow_links(&self) -> bool {
        self.follow_links
    }

    pub fn conditions(&self) -> &[Box<dyn PathCondition>] {
        &self.conditions
    }

    pub fn conditions_mut(&mut self) -> &mut [Box<dyn PathCondition>] {
        &mut self.conditions
    }

    /// Substitutes property references and makes the result absolute.
    pub fn resolve_base_path(&self) -> Result<PathBuf, ActionError> {
        let substituted = self.substitutor.replace(&self.configured_base);
        std::path::absolute(&substituted).map_err(|source| ActionError::BasePath {
            path: PathBuf::from(substituted),
            source,
        })
    }

    /// Clears accumulated condition state before a walk.
    pub fn reset_conditions(&mut self) {
        conditions::reset_all(&mut self.conditions);
    }

    pub fn walk_options(&self, base: PathBuf) -> WalkOptions {
        WalkOptions::new(base)
            .with_max_depth(self.max_depth)
            .with_follow_links(self.follow_links)
    }
}
