//! Condition tree deciding which visited files an action applies to.
//!
//! Every node, leaf or composite, owns a list of nested conditions that act as a
//! guard chain: they are consulted, and so only take their side effects, when the
//! node's own check accepts. Accumulator nodes keep running totals that `reset`
//! clears before each walk.

mod accumulated;
mod age;
mod composite;
mod name_match;

use std::fmt;
use std::path::Path;

pub use accumulated::{AccumulatedCountAtLeast, AccumulatedSizeAtLeast};
pub use age::AgeAtLeast;
pub use composite::{AllOf, AnyOf, Negate};
pub use name_match::NameMatch;

use crate::walker::FileAttributes;

/// A predicate over a visited file.
///
/// `accept` takes `&mut self` because accumulator conditions update running
/// state on every call. A tree must not be shared by two walks at once.
pub trait PathCondition: Send + fmt::Debug {
    /// Clears accumulated state before a walk, recursively.
    fn reset(&mut self);

    /// Decides whether the entry at `relative` (below `base`) is selected.
    fn accept(&mut self, base: &Path, relative: &Path, attributes: &FileAttributes) -> bool;
}

/// All conditions of `conditions` must accept. Stops at the first rejection.
///
/// An empty list accepts; callers that must not treat "no conditions" as
/// "everything" check for that themselves.
pub fn accept_all(
    conditions: &mut [Box<dyn PathCondition>],
    base: &Path,
    relative: &Path,
    attributes: &FileAttributes,
) -> bool {
    conditions
        .iter_mut()
        .all(|condition| condition.accept(base, relative, attributes))
}

/// Resets every condition in `conditions`.
pub fn reset_all(conditions: &mut [Box<dyn PathCondition>]) {
    for condition in conditions {
        condition.reset();
    }
}

/// Guard chain attached to a condition node.
#[derive(Debug, Default)]
pub struct NestedConditions {
    conditions: Vec<Box<dyn PathCondition>>,
}

impl NestedConditions {
    pub fn new(conditions: Vec<Box<dyn PathCondition>>) -> Self {
        Self { conditions }
    }

    pub fn len(&self) -> usize {
        self.conditions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    /// Combines the owner's own verdict with the nested chain.
    ///
    /// Nested conditions run in declaration order only when `own` is true.
    pub fn guard(
        &mut self,
        own: bool,
        base: &Path,
        relative: &Path,
        attributes: &FileAttributes,
    ) -> bool {
        own && accept_all(&mut self.conditions, base, relative, attributes)
    }

    pub fn reset(&mut self) {
        reset_all(&mut self.conditions);
    }
}

impl From<Vec<Box<dyn PathCondition>>> for NestedConditions {
    fn from(conditions: Vec<Box<dyn PathCondition>>) -> Self {
        Self::new(conditions)
    }
}
