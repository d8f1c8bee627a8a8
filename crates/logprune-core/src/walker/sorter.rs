//! Deterministic ordering of visited entries by modification time

use std::cmp::Ordering;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::tree_walk::FileVisitor;
use super::types::{FileEntry, Visit};
use crate::errors::WalkError;

/// Order in which collected entries are handed to conditions.
///
/// Ties on modification time are broken by relative path so that the order is
/// total. `RecentLast` is the exact reverse of `RecentFirst`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PathSorter {
    /// Most recently modified first; ties by path, descending
    #[default]
    RecentFirst,
    /// Least recently modified first; ties by path, ascending
    RecentLast,
}

impl PathSorter {
    pub fn compare(&self, a: &FileEntry, b: &FileEntry) -> Ordering {
        let recent_first = b
            .attributes
            .last_modified
            .cmp(&a.attributes.last_modified)
            .then_with(|| b.relative.cmp(&a.relative));
        match self {
            Self::RecentFirst => recent_first,
            Self::RecentLast => recent_first.reverse(),
        }
    }

    pub fn sort(&self, entries: &mut [FileEntry]) {
        entries.sort_by(|a, b| self.compare(a, b));
    }
}

/// Visitor that only collects entries so they can be sorted before evaluation.
#[derive(Debug, Default)]
pub struct SortingVisitor {
    collected: Vec<FileEntry>,
    vanished: Vec<PathBuf>,
}

impl SortingVisitor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.collected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.collected.is_empty()
    }

    /// Paths that disappeared during the walk, drained.
    pub fn take_vanished(&mut self) -> Vec<PathBuf> {
        std::mem::take(&mut self.vanished)
    }

    /// Consumes the visitor, returning the collected entries in `sorter` order.
    pub fn into_sorted(self, sorter: PathSorter) -> Vec<FileEntry> {
        let mut entries = self.collected;
        sorter.sort(&mut entries);
        entries
    }
}

impl FileVisitor for SortingVisitor {
    fn visit_file(&mut self, entry: FileEntry) -> Result<Visit, WalkError> {
        self.collected.push(entry);
        Ok(Visit::Continue)
    }

    fn visit_file_failed(&mut self, path: &Path, error: io::Error) -> io::Result<Visit> {
        if error.kind() == io::ErrorKind::NotFound {
            tracing::debug!(path = %path.display(), "file vanished before it could be sorted");
            self.vanished.push(path.to_path_buf());
            return Ok(Visit::Continue);
        }
        Err(error)
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use std::time::{Duration, SystemTime};

    use super::*;
    use crate::walker::FileAttributes;

    fn entry(name: &str, secs: u64) -> FileEntry {
        let modified = SystemTime::UNIX_EPOCH + Duration::from_secs(secs);
        FileEntry::new(
            PathBuf::from("/logs").join(name),
            PathBuf::from(name),
            FileAttributes::file(1, modified),
        )
    }

    fn names(entries: &[FileEntry]) -> Vec<String> {
        entries
            .iter()
            .map(|e| e.relative.display().to_string())
            .collect()
    }

    #[test]
    fn test_recent_first() {
        let mut entries = vec![entry("old", 10), entry("new", 30), entry("mid", 20)];
        PathSorter::RecentFirst.sort(&mut entries);
        assert_eq!(names(&entries), ["new", "mid", "old"]);
    }

    #[test]
    fn test_recent_last() {
        let mut entries = vec![entry("old", 10), entry("new", 30), entry("mid", 20)];
        PathSorter::RecentLast.sort(&mut entries);
        assert_eq!(names(&entries), ["old", "mid", "new"]);
    }

    #[test]
    fn test_ties_broken_by_path() {
        let mut entries = vec![entry("b", 10), entry("c", 10), entry("a", 10)];
        PathSorter::RecentFirst.sort(&mut entries);
        assert_eq!(names(&entries), ["c", "b", "a"]);

        PathSorter::RecentLast.sort(&mut entries);
        assert_eq!(names(&entries), ["a", "b", "c"]);
    }

    #[test]
    fn test_sorting_visitor_skips_vanished() {
        let mut visitor = SortingVisitor::new();
        let verdict = visitor
            .visit_file_failed(Path::new("/logs/gone"), io::ErrorKind::NotFound.into())
            .unwrap();
        assert_eq!(verdict, Visit::Continue);

        let err = visitor
            .visit_file_failed(Path::new("/logs/locked"), io::ErrorKind::PermissionDenied.into())
            .unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::PermissionDenied);

        assert_eq!(visitor.take_vanished(), vec![PathBuf::from("/logs/gone")]);
        assert!(visitor.take_vanished().is_empty());
    }
}
