//! File tree walking for retention actions.
//!
//! - `tree_walk`: depth-bounded walkdir traversal feeding a `FileVisitor`
//! - `sorter`: collects entries and orders them by modification time
//! - `deleting`: evaluates conditions and deletes (or reports) accepted files

mod deleting;
mod sorter;
mod tree_walk;
mod types;

pub use deleting::{DeletingVisitor, DeletionReport};
pub use sorter::{PathSorter, SortingVisitor};
pub use tree_walk::{walk_file_tree, FileVisitor};
pub use types::{FileAttributes, FileEntry, Visit, WalkOptions, WalkStats};
