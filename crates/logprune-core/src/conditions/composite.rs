//! Boolean composites: AllOf, AnyOf, Negate.

use std::path::Path;

use super::{reset_all, NestedConditions, PathCondition};
use crate::walker::FileAttributes;

/// Accepts when every component accepts.
///
/// Stops at the first rejecting component, so later accumulators are not
/// charged for that entry. With no components it rejects everything.
#[derive(Debug, Default)]
pub struct AllOf {
    components: Vec<Box<dyn PathCondition>>,
    nested: NestedConditions,
}

impl AllOf {
    pub fn new(components: Vec<Box<dyn PathCondition>>) -> Self {
        Self {
            components,
            nested: NestedConditions::default(),
        }
    }

    pub fn with_nested(mut self, nested: Vec<Box<dyn PathCondition>>) -> Self {
        self.nested = NestedConditions::new(nested);
        self
    }
}

impl PathCondition for AllOf {
    fn reset(&mut self) {
        reset_all(&mut self.components);
        self.nested.reset();
    }

    fn accept(&mut self, base: &Path, relative: &Path, attributes: &FileAttributes) -> bool {
        let own = !self.components.is_empty()
            && self
                .components
                .iter_mut()
                .all(|c| c.accept(base, relative, attributes));
        self.nested.guard(own, base, relative, attributes)
    }
}

/// Accepts when at least one component accepts.
///
/// Stops at the first accepting component. With no components it rejects.
#[derive(Debug, Default)]
pub struct AnyOf {
    components: Vec<Box<dyn PathCondition>>,
    nested: NestedConditions,
}

impl AnyOf {
    pub fn new(components: Vec<Box<dyn PathCondition>>) -> Self {
        Self {
            components,
            nested: NestedConditions::default(),
        }
    }

    pub fn with_nested(mut self, nested: Vec<Box<dyn PathCondition>>) -> Self {
        self.nested = NestedConditions::new(nested);
        self
    }
}

impl PathCondition for AnyOf {
    fn reset(&mut self) {
        reset_all(&mut self.components);
        self.nested.reset();
    }

    fn accept(&mut self, base: &Path, relative: &Path, attributes: &FileAttributes) -> bool {
        let own = self
            .components
            .iter_mut()
            .any(|c| c.accept(base, relative, attributes));
        self.nested.guard(own, base, relative, attributes)
    }
}

/// Inverts a single child condition.
#[derive(Debug)]
pub struct Negate {
    negate: Box<dyn PathCondition>,
    nested: NestedConditions,
}

impl Negate {
    pub fn new(negate: Box<dyn PathCondition>) -> Self {
        Self {
            negate,
            nested: NestedConditions::default(),
        }
    }

    pub fn with_nested(mut self, nested: Vec<Box<dyn PathCondition>>) -> Self {
        self.nested = NestedConditions::new(nested);
        self
    }
}

impl PathCondition for Negate {
    fn reset(&mut self) {
        self.negate.reset();
        self.nested.reset();
    }

    fn accept(&mut self, base: &Path, relative: &Path, attributes: &FileAttributes) -> bool {
        let own = !self.negate.accept(base, relative, attributes);
        self.nested.guard(own, base, relative, attributes)
    }
}
