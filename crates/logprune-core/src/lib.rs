//! logprune-core: retention engine for rolled-over log files
//!
//! After an appender rolls its active file over, a retention action walks the
//! archive directory and decides which historical files to act on:
//! - Conditions: composable predicates (name, age, accumulated size/count, boolean composites)
//! - Walker: depth-bounded, symlink-aware tree walk with modification-time sorting
//! - Actions: delete (with dry-run), POSIX permission and ownership updates, composite sequencing
//! - Config: TOML-driven condition trees with property substitution
//! - Events/Tracing: explicit diagnostics sink plus structured logs

pub mod actions;
pub mod conditions;
pub mod config;
pub mod errors;
pub mod events;
pub mod tracing;
pub mod traits;
pub mod types;
pub mod walker;

// Re-exports for convenience
pub use actions::{
    guarded_run, Action, CompositeAction, DeleteAction, DeleteActionBuilder, DeletionSelector,
    PathAction, ScriptSelect,
};
#[cfg(unix)]
pub use actions::{PosixAttributeAction, PosixAttributes};
pub use conditions::{
    AccumulatedCountAtLeast, AccumulatedSizeAtLeast, AgeAtLeast, AllOf, AnyOf, NameMatch,
    Negate, NestedConditions, PathCondition,
};
pub use config::{BuildContext, ConditionConfig, DeleteActionConfig, RetentionConfig, Substitutor};
pub use errors::{ActionError, ConfigError, ErrorCode, WalkError};
pub use events::{EventDispatcher, RetentionEventHandler};
pub use traits::{Clock, FixedClock, SystemClock};
pub use types::{Duration, FileSize};
pub use walker::{
    walk_file_tree, DeletingVisitor, DeletionReport, FileAttributes, FileEntry, FileVisitor,
    PathSorter, SortingVisitor, Visit, WalkOptions, WalkStats,
};
