//! Shared helpers for logprune-core integration tests.
#![allow(dead_code)]

use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, SystemTime};

use logprune_core::events::*;
use logprune_core::{FileAttributes, PathCondition};

const DAY: Duration = Duration::from_secs(24 * 60 * 60);

/// Creates `dir/name` with `size` bytes, last modified `days_old` days ago.
pub fn aged_file(dir: &Path, name: &str, size: usize, days_old: u64) -> PathBuf {
    aged_file_at(dir, name, size, SystemTime::now() - DAY * days_old as u32)
}

/// Creates `dir/name` with `size` bytes and the given modification time.
pub fn aged_file_at(dir: &Path, name: &str, size: usize, modified: SystemTime) -> PathBuf {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, vec![b'x'; size]).unwrap();
    File::options()
        .write(true)
        .open(&path)
        .unwrap()
        .set_modified(modified)
        .unwrap();
    path
}

/// Sorted file names directly under `dir`.
pub fn remaining(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

pub fn file_names(paths: &[PathBuf]) -> Vec<String> {
    let mut names: Vec<String> = paths
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

/// Condition with a fixed verdict that counts its calls.
#[derive(Debug, Clone)]
pub struct Counting {
    verdict: bool,
    accepts: Arc<AtomicUsize>,
    resets: Arc<AtomicUsize>,
}

impl Counting {
    pub fn new(verdict: bool) -> Self {
        Self {
            verdict,
            accepts: Arc::new(AtomicUsize::new(0)),
            resets: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn accept_calls(&self) -> usize {
        self.accepts.load(Ordering::SeqCst)
    }

    pub fn reset_calls(&self) -> usize {
        self.resets.load(Ordering::SeqCst)
    }

    pub fn boxed(&self) -> Box<dyn PathCondition> {
        Box::new(self.clone())
    }
}

impl PathCondition for Counting {
    fn reset(&mut self) {
        self.resets.fetch_add(1, Ordering::SeqCst);
    }

    fn accept(&mut self, _base: &Path, _relative: &Path, _attributes: &FileAttributes) -> bool {
        self.accepts.fetch_add(1, Ordering::SeqCst);
        self.verdict
    }
}

/// Offers `relative` with `size` bytes, modified now, below `/logs`.
pub fn offer(condition: &mut dyn PathCondition, relative: &str, size: u64) -> bool {
    condition.accept(
        Path::new("/logs"),
        Path::new(relative),
        &FileAttributes::file(size, SystemTime::now()),
    )
}

/// Handler that records every event it sees.
#[derive(Debug, Default)]
pub struct Recorder {
    pub started: Mutex<Vec<WalkStartedEvent>>,
    pub completed: Mutex<Vec<WalkCompleteEvent>>,
    pub deleted: Mutex<Vec<PathBuf>>,
    pub dry_run: Mutex<Vec<PathBuf>>,
    pub vanished: Mutex<Vec<PathBuf>>,
    pub failed: Mutex<Vec<ActionFailedEvent>>,
}

impl RetentionEventHandler for Recorder {
    fn on_walk_started(&self, event: &WalkStartedEvent) {
        self.started.lock().unwrap().push(event.clone());
    }

    fn on_walk_complete(&self, event: &WalkCompleteEvent) {
        self.completed.lock().unwrap().push(event.clone());
    }

    fn on_file_deleted(&self, event: &FileDeletedEvent) {
        self.deleted.lock().unwrap().push(event.path.clone());
    }

    fn on_dry_run_match(&self, event: &DryRunMatchEvent) {
        self.dry_run.lock().unwrap().push(event.path.clone());
    }

    fn on_file_vanished(&self, event: &FileVanishedEvent) {
        self.vanished.lock().unwrap().push(event.path.clone());
    }

    fn on_action_failed(&self, event: &ActionFailedEvent) {
        self.failed.lock().unwrap().push(event.clone());
    }
}
