//! Depth-bounded file tree walk using walkdir
//!
//! Directories are traversed but never offered to visitors; every other entry is
//! snapshotted into a `FileEntry` exactly once.

use std::io;
use std::path::Path;

use walkdir::{DirEntry, WalkDir};

use super::types::{FileAttributes, FileEntry, Visit, WalkOptions, WalkStats};
use crate::errors::WalkError;

/// Receives the entries of a file tree walk.
pub trait FileVisitor {
    /// Called once per non-directory entry.
    fn visit_file(&mut self, entry: FileEntry) -> Result<Visit, WalkError>;

    /// Called when an entry could not be listed or inspected.
    ///
    /// Returning the error aborts the walk. The default gives up on any failure.
    fn visit_file_failed(&mut self, _path: &Path, error: io::Error) -> io::Result<Visit> {
        Err(error)
    }
}

/// Walk `options.base` and feed every entry to `visitor`.
pub fn walk_file_tree(
    options: &WalkOptions,
    visitor: &mut dyn FileVisitor,
) -> Result<WalkStats, WalkError> {
    let mut stats = WalkStats::default();

    let walker = WalkDir::new(&options.base)
        .max_depth(options.max_depth)
        .follow_links(options.follow_links)
        .sort_by_file_name();

    for item in walker {
        let verdict = match item {
            Ok(dir_entry) => {
                if dir_entry.file_type().is_dir() {
                    continue;
                }
                match snapshot(&options.base, &dir_entry) {
                    Ok(entry) => {
                        stats.visited += 1;
                        visitor.visit_file(entry)?
                    }
                    Err(error) => visit_failed(visitor, dir_entry.path(), error, &mut stats)?,
                }
            }
            Err(err) => {
                let path = err
                    .path()
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| options.base.clone());
                if err.loop_ancestor().is_some() {
                    return Err(WalkError::Loop { path });
                }
                match err.into_io_error() {
                    Some(error) => visit_failed(visitor, &path, error, &mut stats)?,
                    None => return Err(WalkError::Loop { path }),
                }
            }
        };

        if verdict == Visit::Terminate {
            break;
        }
    }

    Ok(stats)
}

fn visit_failed(
    visitor: &mut dyn FileVisitor,
    path: &Path,
    error: io::Error,
    stats: &mut WalkStats,
) -> Result<Visit, WalkError> {
    match visitor.visit_file_failed(path, error) {
        Ok(verdict) => {
            stats.failed_skipped += 1;
            Ok(verdict)
        }
        Err(source) => Err(WalkError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}

fn snapshot(base: &Path, dir_entry: &DirEntry) -> io::Result<FileEntry> {
    let metadata = dir_entry.metadata().map_err(|e| {
        e.into_io_error()
            .unwrap_or_else(|| io::Error::other("metadata unavailable"))
    })?;
    let attributes = FileAttributes::from_metadata(&metadata)?;

    let path = dir_entry.path().to_path_buf();
    let relative = path
        .strip_prefix(base)
        .map(Path::to_path_buf)
        .unwrap_or_else(|_| path.clone());

    Ok(FileEntry::new(path, relative, attributes))
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;

    use super::*;

    #[derive(Default)]
    struct Collecting {
        seen: Vec<PathBuf>,
        stop_after: Option<usize>,
    }

    impl FileVisitor for Collecting {
        fn visit_file(&mut self, entry: FileEntry) -> Result<Visit, WalkError> {
            self.seen.push(entry.relative);
            if self.stop_after == Some(self.seen.len()) {
                return Ok(Visit::Terminate);
            }
            Ok(Visit::Continue)
        }
    }

    fn tree() -> tempfile::TempDir {
        let dir = tempfile::TempDir::new().unwrap();
        fs::write(dir.path().join("b.log"), "b").unwrap();
        fs::write(dir.path().join("a.log"), "a").unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();
        fs::write(dir.path().join("nested").join("c.log"), "c").unwrap();
        dir
    }

    #[test]
    fn test_default_depth_visits_direct_children_only() {
        let dir = tree();
        let mut visitor = Collecting::default();
        let stats = walk_file_tree(&WalkOptions::new(dir.path()), &mut visitor).unwrap();

        assert_eq!(visitor.seen, vec![PathBuf::from("a.log"), PathBuf::from("b.log")]);
        assert_eq!(stats.visited, 2);
    }

    #[test]
    fn test_deeper_walk_reports_relative_paths() {
        let dir = tree();
        let mut visitor = Collecting::default();
        walk_file_tree(&WalkOptions::new(dir.path()).with_max_depth(2), &mut visitor).unwrap();

        assert!(visitor.seen.contains(&PathBuf::from("nested").join("c.log")));
        assert_eq!(visitor.seen.len(), 3);
    }

    #[test]
    fn test_terminate_stops_walk() {
        let dir = tree();
        let mut visitor = Collecting {
            stop_after: Some(1),
            ..Default::default()
        };
        let stats = walk_file_tree(&WalkOptions::new(dir.path()), &mut visitor).unwrap();
        assert_eq!(stats.visited, 1);
    }

    #[test]
    fn test_missing_base_fails_with_default_visitor() {
        let dir = tempfile::TempDir::new().unwrap();
        let missing = dir.path().join("gone");
        let mut visitor = Collecting::default();

        let err = walk_file_tree(&WalkOptions::new(&missing), &mut visitor).unwrap_err();
        assert!(matches!(err, WalkError::Io { .. }));
        assert_eq!(err.io_error().map(io::Error::kind), Some(io::ErrorKind::NotFound));
    }
}
