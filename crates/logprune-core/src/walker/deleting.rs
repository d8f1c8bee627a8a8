//! Visitor that deletes the files accepted by the root conditions
//!
//! In test mode accepted files are only recorded, nothing on disk changes.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;

use super::tree_walk::FileVisitor;
use super::types::{FileEntry, Visit};
use crate::conditions::{self, PathCondition};
use crate::errors::WalkError;
use crate::events::{DryRunMatchEvent, EventDispatcher, FileDeletedEvent, FileVanishedEvent};

/// Outcome of one delete walk.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DeletionReport {
    /// Entries offered to the conditions
    pub visited: usize,
    /// Files removed from disk
    pub deleted: Vec<PathBuf>,
    /// Files that would have been removed (test mode)
    pub would_delete: Vec<PathBuf>,
    /// Total size of deleted or would-delete files
    pub selected_bytes: u64,
    /// Files that disappeared before they could be visited or deleted
    pub vanished: usize,
}

impl DeletionReport {
    /// Number of files deleted or reported as would-delete.
    pub fn selected(&self) -> usize {
        self.deleted.len() + self.would_delete.len()
    }
}

/// Evaluates the root conditions for every visited file and deletes the accepted ones.
pub struct DeletingVisitor<'a> {
    base: &'a Path,
    conditions: &'a mut [Box<dyn PathCondition>],
    test_mode: bool,
    events: &'a EventDispatcher,
    report: DeletionReport,
}

impl<'a> DeletingVisitor<'a> {
    pub fn new(
        base: &'a Path,
        conditions: &'a mut [Box<dyn PathCondition>],
        test_mode: bool,
        events: &'a EventDispatcher,
    ) -> Self {
        Self {
            base,
            conditions,
            test_mode,
            events,
            report: DeletionReport::default(),
        }
    }

    /// True when every root condition accepts the entry.
    pub fn accepts(&mut self, entry: &FileEntry) -> bool {
        self.report.visited += 1;
        conditions::accept_all(self.conditions, self.base, &entry.relative, &entry.attributes)
    }

    /// Deletes the entry, or records it when in test mode.
    ///
    /// A file that is already gone is counted as vanished, not as a failure.
    pub fn delete(&mut self, entry: &FileEntry) -> Result<(), WalkError> {
        if self.test_mode {
            tracing::info!(
                path = %entry.path.display(),
                "deleting file (test mode: file not actually deleted)"
            );
            self.report.would_delete.push(entry.path.clone());
            self.report.selected_bytes += entry.attributes.size;
            self.events.emit_dry_run_match(&DryRunMatchEvent {
                path: entry.path.clone(),
                size: entry.attributes.size,
            });
            return Ok(());
        }

        match fs::remove_file(&entry.path) {
            Ok(()) => {
                tracing::info!(path = %entry.path.display(), "deleted file");
                self.report.deleted.push(entry.path.clone());
                self.report.selected_bytes += entry.attributes.size;
                self.events.emit_file_deleted(&FileDeletedEvent {
                    path: entry.path.clone(),
                    size: entry.attributes.size,
                });
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                self.record_vanished(&entry.path);
                Ok(())
            }
            Err(source) => Err(WalkError::Delete {
                path: entry.path.clone(),
                source,
            }),
        }
    }

    pub fn report(&self) -> &DeletionReport {
        &self.report
    }

    pub fn into_report(self) -> DeletionReport {
        self.report
    }

    /// Counts `path` as vanished and reports it.
    pub fn record_vanished(&mut self, path: &Path) {
        tracing::info!(
            path = %path.display(),
            "file could not be accessed, it has likely already been deleted"
        );
        self.report.vanished += 1;
        self.events.emit_file_vanished(&FileVanishedEvent {
            path: path.to_path_buf(),
        });
    }
}

impl FileVisitor for DeletingVisitor<'_> {
    fn visit_file(&mut self, entry: FileEntry) -> Result<Visit, WalkError> {
        if self.accepts(&entry) {
            self.delete(&entry)?;
        } else {
            tracing::trace!(
                base = %self.base.display(),
                relative = %entry.relative.display(),
                "not deleting"
            );
        }
        Ok(Visit::Continue)
    }

    fn visit_file_failed(&mut self, path: &Path, error: io::Error) -> io::Result<Visit> {
        if error.kind() == io::ErrorKind::NotFound {
            self.record_vanished(path);
            return Ok(Visit::Continue);
        }
        Err(error)
    }
}

#[cfg(test)]
mod tests {
    use std::time::SystemTime;

    use super::*;
    use crate::conditions::NameMatch;
    use crate::walker::FileAttributes;

    fn entry_for(dir: &Path, name: &str) -> FileEntry {
        let path = dir.join(name);
        fs::write(&path, "data").unwrap();
        FileEntry::new(path, PathBuf::from(name), FileAttributes::file(4, SystemTime::now()))
    }

    #[test]
    fn test_deletes_accepted_files_only() {
        let dir = tempfile::TempDir::new().unwrap();
        let events = EventDispatcher::new();
        let mut conditions: Vec<Box<dyn PathCondition>> =
            vec![Box::new(NameMatch::glob("*.gz").unwrap())];
        let mut visitor = DeletingVisitor::new(dir.path(), &mut conditions, false, &events);

        let keep = entry_for(dir.path(), "app.log");
        let drop = entry_for(dir.path(), "app-1.log.gz");
        visitor.visit_file(keep.clone()).unwrap();
        visitor.visit_file(drop.clone()).unwrap();

        let report = visitor.into_report();
        assert!(keep.path.exists());
        assert!(!drop.path.exists());
        assert_eq!(report.deleted, vec![drop.path]);
        assert_eq!(report.visited, 2);
        assert_eq!(report.selected_bytes, 4);
    }

    #[test]
    fn test_test_mode_leaves_files() {
        let dir = tempfile::TempDir::new().unwrap();
        let events = EventDispatcher::new();
        let mut conditions: Vec<Box<dyn PathCondition>> =
            vec![Box::new(NameMatch::glob("*").unwrap())];
        let mut visitor = DeletingVisitor::new(dir.path(), &mut conditions, true, &events);

        let entry = entry_for(dir.path(), "app.log");
        visitor.visit_file(entry.clone()).unwrap();

        assert!(entry.path.exists());
        assert_eq!(visitor.report().would_delete, vec![entry.path]);
        assert!(visitor.report().deleted.is_empty());
    }

    #[test]
    fn test_file_gone_before_delete_is_benign() {
        let dir = tempfile::TempDir::new().unwrap();
        let events = EventDispatcher::new();
        let mut conditions: Vec<Box<dyn PathCondition>> =
            vec![Box::new(NameMatch::glob("*").unwrap())];
        let mut visitor = DeletingVisitor::new(dir.path(), &mut conditions, false, &events);

        let entry = entry_for(dir.path(), "app.log");
        fs::remove_file(&entry.path).unwrap();
        assert_eq!(visitor.visit_file(entry).unwrap(), Visit::Continue);
        assert_eq!(visitor.report().vanished, 1);
        assert!(visitor.report().deleted.is_empty());
    }
}
