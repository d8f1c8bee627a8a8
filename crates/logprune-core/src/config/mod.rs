//! Configuration for retention actions.
//! TOML-based: `[properties]` for substitution, `[[delete]]` tables holding
//! condition trees, `LOGPRUNE_*` environment overrides.

pub mod condition_config;
pub mod retention_config;
pub mod substitutor;

pub use condition_config::ConditionConfig;
pub use retention_config::{BuildContext, DeleteActionConfig, RetentionConfig};
pub use substitutor::Substitutor;
