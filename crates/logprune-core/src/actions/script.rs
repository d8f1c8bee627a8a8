//! List-level selection by an injected strategy.
//!
//! Where per-file conditions are not expressive enough, a selector receives the
//! whole ordered candidate list at once and returns the files to delete.

use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::walker::FileEntry;

/// Chooses which of the candidates to delete.
///
/// The selector may drop or reorder entries. Returning `None` deletes nothing.
pub trait DeletionSelector: Send + Sync {
    fn select_for_deletion(&self, base: &Path, candidates: Vec<FileEntry>) -> Option<Vec<FileEntry>>;
}

impl<F> DeletionSelector for F
where
    F: Fn(&Path, Vec<FileEntry>) -> Option<Vec<FileEntry>> + Send + Sync,
{
    fn select_for_deletion(&self, base: &Path, candidates: Vec<FileEntry>) -> Option<Vec<FileEntry>> {
        self(base, candidates)
    }
}

/// Optional selector stage of a delete action.
///
/// Without a selector the stage is disabled and candidates pass through.
#[derive(Clone, Default)]
pub struct ScriptSelect {
    name: Option<String>,
    selector: Option<Arc<dyn DeletionSelector>>,
}

impl ScriptSelect {
    pub fn new(selector: Arc<dyn DeletionSelector>) -> Self {
        Self {
            name: None,
            selector: Some(selector),
        }
    }

    pub fn named(name: impl Into<String>, selector: Arc<dyn DeletionSelector>) -> Self {
        Self {
            name: Some(name.into()),
            selector: Some(selector),
        }
    }

    pub fn disabled() -> Self {
        Self::default()
    }

    pub fn is_enabled(&self) -> bool {
        self.selector.is_some()
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Runs the selector over `candidates`.
    ///
    /// Entries the selector invents, or returns twice, are dropped with a warning.
    pub fn select(&self, base: &Path, candidates: Vec<FileEntry>) -> Vec<FileEntry> {
        let Some(selector) = &self.selector else {
            return candidates;
        };

        let mut allowed: HashSet<PathBuf> = candidates.iter().map(|e| e.path.clone()).collect();
        let Some(selected) = selector.select_for_deletion(base, candidates) else {
            tracing::trace!(
                selector = self.name.as_deref().unwrap_or("<anonymous>"),
                "selector returned no list (no files to delete)"
            );
            return Vec::new();
        };

        selected
            .into_iter()
            .filter(|entry| {
                let known = allowed.remove(&entry.path);
                if !known {
                    tracing::warn!(
                        path = %entry.path.display(),
                        "ignoring selector result that was not a unique candidate"
                    );
                }
                known
            })
            .collect()
    }
}

impl fmt::Debug for ScriptSelect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScriptSelect")
            .field("name", &self.name)
            .field("enabled", &self.is_enabled())
            .finish()
    }
}
