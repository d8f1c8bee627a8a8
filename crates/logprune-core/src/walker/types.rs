//! Walker types - snapshots of visited entries and traversal options

use std::fs::Metadata;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use serde::Serialize;

/// Attributes captured once when an entry is visited.
///
/// Conditions only ever see this snapshot; the file is not queried again
/// during the same evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileAttributes {
    /// Size in bytes
    pub size: u64,
    /// Last modification time
    pub last_modified: SystemTime,
    pub is_dir: bool,
    pub is_file: bool,
    pub is_symlink: bool,
}

impl FileAttributes {
    /// Snapshot of a regular file. Mostly useful in tests.
    pub fn file(size: u64, last_modified: SystemTime) -> Self {
        Self {
            size,
            last_modified,
            is_dir: false,
            is_file: true,
            is_symlink: false,
        }
    }

    /// Snapshot taken from filesystem metadata.
    pub fn from_metadata(metadata: &Metadata) -> std::io::Result<Self> {
        let file_type = metadata.file_type();
        Ok(Self {
            size: metadata.len(),
            last_modified: metadata.modified()?,
            is_dir: file_type.is_dir(),
            is_file: file_type.is_file(),
            is_symlink: file_type.is_symlink(),
        })
    }
}

/// A visited entry: absolute path, path relative to the walk base, and attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    pub path: PathBuf,
    pub relative: PathBuf,
    pub attributes: FileAttributes,
}

impl FileEntry {
    pub fn new(path: PathBuf, relative: PathBuf, attributes: FileAttributes) -> Self {
        Self {
            path,
            relative,
            attributes,
        }
    }

    /// Absolute path of the entry.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Path relative to the walk base.
    pub fn relative(&self) -> &Path {
        &self.relative
    }
}

/// Traversal context for one walk.
#[derive(Debug, Clone)]
pub struct WalkOptions {
    /// Directory to start from
    pub base: PathBuf,
    /// Maximum number of directory levels below `base` to visit (1 = direct children)
    pub max_depth: usize,
    /// Whether symbolic links are followed
    pub follow_links: bool,
}

impl WalkOptions {
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self {
            base: base.into(),
            ..Self::default()
        }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_follow_links(mut self, follow_links: bool) -> Self {
        self.follow_links = follow_links;
        self
    }
}

impl Default for WalkOptions {
    fn default() -> Self {
        Self {
            base: PathBuf::from("."),
            max_depth: 1,
            follow_links: false,
        }
    }
}

/// What a visitor wants the walk to do next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visit {
    Continue,
    Terminate,
}

/// Counters for one walk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct WalkStats {
    /// Entries handed to `visit_file`
    pub visited: usize,
    /// Failures the visitor chose to skip
    pub failed_skipped: usize,
}
