//! Applies POSIX permissions and ownership to the files accepted by the root conditions.

use std::fs::{self, Permissions};
use std::io;
use std::os::unix::fs::{self as unix_fs, PermissionsExt};
use std::path::{Path, PathBuf};

use super::path_action::PathAction;
use super::{guarded_run, Action};
use crate::conditions::{self, PathCondition};
use crate::errors::{ActionError, ConfigError, WalkError};
use crate::events::EventDispatcher;
use crate::walker::{walk_file_tree, FileEntry, FileVisitor, Visit};

const KIND: &str = "PosixAttributeAction";

/// Parses symbolic permissions such as `rw-r-----` into a mode.
pub fn parse_permissions(text: &str) -> Result<u32, ConfigError> {
    let invalid = || ConfigError::InvalidValue {
        field: "permissions".to_string(),
        message: format!("'{text}' is not of the form rwxrwxrwx"),
    };

    let chars: Vec<char> = text.chars().collect();
    if chars.len() != 9 {
        return Err(invalid());
    }

    let mut mode = 0u32;
    for (i, c) in chars.iter().enumerate() {
        let expected = ['r', 'w', 'x'][i % 3];
        let bit = 1 << (8 - i);
        match *c {
            '-' => {}
            c if c == expected => mode |= bit,
            _ => return Err(invalid()),
        }
    }
    Ok(mode)
}

/// Attributes a [`PosixAttributeAction`] applies. At least one must be set.
///
/// Owner and group are numeric ids.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PosixAttributes {
    pub mode: Option<u32>,
    pub owner: Option<u32>,
    pub group: Option<u32>,
}

impl PosixAttributes {
    /// Sets the mode from symbolic notation such as `rw-r-----`.
    pub fn permissions(mut self, text: &str) -> Result<Self, ConfigError> {
        self.mode = Some(parse_permissions(text)?);
        Ok(self)
    }

    pub fn owner(mut self, uid: u32) -> Self {
        self.owner = Some(uid);
        self
    }

    pub fn group(mut self, gid: u32) -> Self {
        self.group = Some(gid);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.mode.is_none() && self.owner.is_none() && self.group.is_none()
    }
}

/// Sets permissions and/or ownership of every accepted file under the base directory.
#[derive(Debug)]
pub struct PosixAttributeAction {
    path: PathAction,
    attributes: PosixAttributes,
    events: EventDispatcher,
    updated: Vec<PathBuf>,
    complete: bool,
    closed: bool,
}

impl PosixAttributeAction {
    pub fn new(path: PathAction, attributes: PosixAttributes) -> Result<Self, ConfigError> {
        if path.configured_base().trim().is_empty() {
            return Err(ConfigError::ValidationFailed {
                field: "base_path".to_string(),
                message: "no base path provided".to_string(),
            });
        }
        if attributes.is_empty() {
            return Err(ConfigError::ValidationFailed {
                field: "attributes".to_string(),
                message: "at least one of permissions, owner or group is required".to_string(),
            });
        }
        Ok(Self {
            path,
            attributes,
            events: EventDispatcher::new(),
            updated: Vec::new(),
            complete: false,
            closed: false,
        })
    }

    pub fn with_events(mut self, events: EventDispatcher) -> Self {
        self.events = events;
        self
    }

    pub fn attributes(&self) -> PosixAttributes {
        self.attributes
    }

    /// Files updated by the last execution.
    pub fn updated(&self) -> &[PathBuf] {
        &self.updated
    }
}

struct AttributeVisitor<'a> {
    base: &'a Path,
    conditions: &'a mut [Box<dyn PathCondition>],
    attributes: PosixAttributes,
    updated: Vec<PathBuf>,
}

impl AttributeVisitor<'_> {
    fn apply(&self, path: &Path) -> io::Result<()> {
        if let Some(mode) = self.attributes.mode {
            fs::set_permissions(path, Permissions::from_mode(mode))?;
        }
        if self.attributes.owner.is_some() || self.attributes.group.is_some() {
            unix_fs::chown(path, self.attributes.owner, self.attributes.group)?;
        }
        Ok(())
    }
}

impl FileVisitor for AttributeVisitor<'_> {
    fn visit_file(&mut self, entry: FileEntry) -> Result<Visit, WalkError> {
        if !conditions::accept_all(self.conditions, self.base, &entry.relative, &entry.attributes) {
            return Ok(Visit::Continue);
        }
        match self.apply(&entry.path) {
            Ok(()) => {
                tracing::trace!(
                    path = %entry.path.display(),
                    mode = ?self.attributes.mode,
                    owner = ?self.attributes.owner,
                    group = ?self.attributes.group,
                    "set attributes"
                );
                self.updated.push(entry.path);
                Ok(Visit::Continue)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Visit::Continue),
            Err(source) => Err(WalkError::Attributes {
                path: entry.path,
                source,
            }),
        }
    }

    fn visit_file_failed(&mut self, path: &Path, error: io::Error) -> io::Result<Visit> {
        if error.kind() == io::ErrorKind::NotFound {
            tracing::info!(path = %path.display(), "file vanished before attributes could be set");
            return Ok(Visit::Continue);
        }
        Err(error)
    }
}

impl Action for PosixAttributeAction {
    fn kind(&self) -> &'static str {
        KIND
    }

    fn execute(&mut self) -> Result<bool, ActionError> {
        let base = self.path.resolve_base_path()?;
        let options = self.path.walk_options(base);
        self.path.reset_conditions();

        let mut visitor = AttributeVisitor {
            base: &options.base,
            conditions: self.path.conditions_mut(),
            attributes: self.attributes,
            updated: Vec::new(),
        };
        walk_file_tree(&options, &mut visitor)?;
        self.updated = visitor.updated;
        Ok(true)
    }

    fn run(&mut self) -> bool {
        if self.closed {
            return false;
        }
        let events = self.events.clone();
        let succeeded = guarded_run(KIND, &events, || self.execute());
        self.complete = true;
        succeeded
    }

    fn close(&mut self) {
        self.closed = true;
    }

    fn is_complete(&self) -> bool {
        self.complete
    }
}
