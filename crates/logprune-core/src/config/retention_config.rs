//! Top-level retention configuration.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::condition_config::{build_all, ConditionConfig};
use super::Substitutor;
use crate::actions::{Action, CompositeAction, DeleteAction, DeletionSelector, ScriptSelect};
use crate::errors::ConfigError;
use crate::events::{EventDispatcher, RetentionEventHandler};
use crate::traits::{Clock, SystemClock};
use crate::walker::PathSorter;

/// Retention settings for one appender.
///
/// ```toml
/// test_mode = false
///
/// [properties]
/// archive = "/var/log/billing/archive"
///
/// [[delete]]
/// base_path = "${archive}"
/// max_depth = 2
/// sort = "recent_first"
///
/// [[delete.conditions]]
/// type = "name_match"
/// glob = "**/app-*.log.gz"
///
/// [[delete.conditions.nested]]
/// type = "accumulated_size_at_least"
/// exceeds = "1GB"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct RetentionConfig {
    /// Values for `${name}` references in base paths.
    pub properties: BTreeMap<String, String>,
    /// `true` puts every delete action in test mode. `false` leaves the
    /// per-action flags as configured.
    pub test_mode: Option<bool>,
    /// Stop at the first failing action. Default: false.
    pub stop_on_error: Option<bool>,
    pub delete: Vec<DeleteActionConfig>,
}

/// One `[[delete]]` table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteActionConfig {
    pub base_path: String,
    /// Directory levels below the base to visit. Default: 1.
    pub max_depth: Option<usize>,
    /// Default: false.
    pub follow_links: Option<bool>,
    /// Default: false.
    pub test_mode: Option<bool>,
    /// Visit order; unsorted walk order when absent.
    pub sort: Option<PathSorter>,
    /// Name of a selector registered in the `BuildContext`.
    pub script: Option<String>,
    #[serde(default)]
    pub conditions: Vec<ConditionConfig>,
}

/// Collaborators needed to turn configuration into actions.
#[derive(Clone)]
pub struct BuildContext {
    clock: Arc<dyn Clock>,
    selectors: HashMap<String, Arc<dyn DeletionSelector>>,
    events: EventDispatcher,
}

impl Default for BuildContext {
    fn default() -> Self {
        Self {
            clock: Arc::new(SystemClock),
            selectors: HashMap::new(),
            events: EventDispatcher::new(),
        }
    }
}

impl BuildContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Makes `selector` available to `script = "<name>"`.
    pub fn with_selector(mut self, name: impl Into<String>, selector: Arc<dyn DeletionSelector>) -> Self {
        self.selectors.insert(name.into(), selector);
        self
    }

    pub fn with_event_handler(mut self, handler: Arc<dyn RetentionEventHandler>) -> Self {
        self.events.register(handler);
        self
    }

    fn script(&self, name: Option<&str>) -> ScriptSelect {
        let Some(name) = name else {
            return ScriptSelect::disabled();
        };
        match self.selectors.get(name) {
            Some(selector) => ScriptSelect::named(name, Arc::clone(selector)),
            None => {
                tracing::warn!(script = name, "no selector registered under this name; script disabled");
                ScriptSelect::disabled()
            }
        }
    }
}

impl RetentionConfig {
    /// Loads `path`, applies `LOGPRUNE_*` environment overrides and validates.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;
        let mut config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Parses configuration from a TOML string (no environment overrides).
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Applies environment variable overrides.
    ///
    /// `LOGPRUNE_TEST_MODE=true|1|false|0` replaces the global `test_mode`.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("LOGPRUNE_TEST_MODE") {
            match val.trim().to_ascii_lowercase().as_str() {
                "true" | "1" => self.test_mode = Some(true),
                "false" | "0" => self.test_mode = Some(false),
                other => tracing::warn!(value = other, "ignoring invalid LOGPRUNE_TEST_MODE"),
            }
        }
    }

    /// Checks every delete table for a base path and something to select with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (i, delete) in self.delete.iter().enumerate() {
            if delete.base_path.trim().is_empty() {
                return Err(ConfigError::ValidationFailed {
                    field: format!("delete[{i}].base_path"),
                    message: "must not be empty".to_string(),
                });
            }
            if delete.conditions.is_empty() && delete.script.is_none() {
                return Err(ConfigError::ValidationFailed {
                    field: format!("delete[{i}].conditions"),
                    message: "at least one condition or a script is required".to_string(),
                });
            }
        }
        Ok(())
    }

    pub fn substitutor(&self) -> Substitutor {
        Substitutor::new(self.properties.clone().into_iter().collect())
    }

    /// Builds one `DeleteAction` per `[[delete]]` table.
    pub fn build_actions(&self, ctx: &BuildContext) -> Result<Vec<DeleteAction>, ConfigError> {
        let substitutor = self.substitutor();
        self.delete
            .iter()
            .map(|delete| {
                // dry-run is sticky: a global false never re-enables deletion
                let test_mode =
                    self.test_mode.unwrap_or(false) || delete.test_mode.unwrap_or(false);
                let mut builder = DeleteAction::builder(delete.base_path.clone())
                    .substitutor(substitutor.clone())
                    .max_depth(delete.max_depth.unwrap_or(1))
                    .follow_links(delete.follow_links.unwrap_or(false))
                    .conditions(build_all(&delete.conditions, &ctx.clock)?)
                    .script(ctx.script(delete.script.as_deref()))
                    .test_mode(test_mode)
                    .events(ctx.events.clone());
                if let Some(sorter) = delete.sort {
                    builder = builder.sorter(sorter);
                }
                builder.build()
            })
            .collect()
    }

    /// Builds all delete actions wrapped in a single `CompositeAction`.
    pub fn build_composite(&self, ctx: &BuildContext) -> Result<CompositeAction, ConfigError> {
        let actions = self
            .build_actions(ctx)?
            .into_iter()
            .map(|a| Box::new(a) as Box<dyn Action>)
            .collect();
        Ok(CompositeAction::new(actions, self.stop_on_error.unwrap_or(false))
            .with_events(ctx.events.clone()))
    }
}
