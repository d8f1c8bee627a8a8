//! Declarative condition trees.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::conditions::{
    AccumulatedCountAtLeast, AccumulatedSizeAtLeast, AgeAtLeast, AllOf, AnyOf, NameMatch, Negate,
    PathCondition,
};
use crate::errors::ConfigError;
use crate::traits::Clock;
use crate::types::Duration;

/// One node of a configured condition tree.
///
/// Every node accepts a `nested` list evaluated only when the node itself accepts.
///
/// ```toml
/// [[delete.conditions]]
/// type = "name_match"
/// glob = "app-*.log.gz"
///
/// [[delete.conditions.nested]]
/// type = "age_at_least"
/// age = "P30D"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ConditionConfig {
    NameMatch {
        glob: Option<String>,
        regex: Option<String>,
        #[serde(default)]
        nested: Vec<ConditionConfig>,
    },
    AgeAtLeast {
        age: String,
        #[serde(default)]
        nested: Vec<ConditionConfig>,
    },
    AccumulatedSizeAtLeast {
        exceeds: String,
        #[serde(default)]
        nested: Vec<ConditionConfig>,
    },
    AccumulatedCountAtLeast {
        exceeds: u64,
        #[serde(default)]
        nested: Vec<ConditionConfig>,
    },
    AllOf {
        #[serde(default)]
        conditions: Vec<ConditionConfig>,
        #[serde(default)]
        nested: Vec<ConditionConfig>,
    },
    AnyOf {
        #[serde(default)]
        conditions: Vec<ConditionConfig>,
        #[serde(default)]
        nested: Vec<ConditionConfig>,
    },
    Negate {
        condition: Option<Box<ConditionConfig>>,
        #[serde(default)]
        nested: Vec<ConditionConfig>,
    },
}

impl ConditionConfig {
    /// Instantiates the tree. Every parameter is validated here.
    pub fn build(&self, clock: &Arc<dyn Clock>) -> Result<Box<dyn PathCondition>, ConfigError> {
        let condition: Box<dyn PathCondition> = match self {
            Self::NameMatch {
                glob,
                regex,
                nested,
            } => Box::new(
                NameMatch::new(glob.as_deref(), regex.as_deref())?
                    .with_nested(build_all(nested, clock)?),
            ),
            Self::AgeAtLeast { age, nested } => Box::new(
                AgeAtLeast::new(Duration::parse(age)?)
                    .with_clock(Arc::clone(clock))
                    .with_nested(build_all(nested, clock)?),
            ),
            Self::AccumulatedSizeAtLeast { exceeds, nested } => Box::new(
                AccumulatedSizeAtLeast::parse(exceeds)?.with_nested(build_all(nested, clock)?),
            ),
            Self::AccumulatedCountAtLeast { exceeds, nested } => Box::new(
                AccumulatedCountAtLeast::new(*exceeds)?.with_nested(build_all(nested, clock)?),
            ),
            Self::AllOf { conditions, nested } => Box::new(
                AllOf::new(build_all(conditions, clock)?).with_nested(build_all(nested, clock)?),
            ),
            Self::AnyOf { conditions, nested } => Box::new(
                AnyOf::new(build_all(conditions, clock)?).with_nested(build_all(nested, clock)?),
            ),
            Self::Negate { condition, nested } => {
                let child = condition.as_ref().ok_or_else(|| ConfigError::MissingChild {
                    condition: "negate".to_string(),
                })?;
                Box::new(Negate::new(child.build(clock)?).with_nested(build_all(nested, clock)?))
            }
        };
        Ok(condition)
    }
}

/// Builds each configured condition, stopping at the first invalid one.
pub fn build_all(
    configs: &[ConditionConfig],
    clock: &Arc<dyn Clock>,
) -> Result<Vec<Box<dyn PathCondition>>, ConfigError> {
    configs.iter().map(|c| c.build(clock)).collect()
}

#[cfg(test)]
mod tests {
    use std::path::Path;
    use std::time::{Duration as StdDuration, SystemTime};

    use super::*;
    use crate::traits::{FixedClock, SystemClock};
    use crate::walker::FileAttributes;

    fn clock() -> Arc<dyn Clock> {
        Arc::new(SystemClock)
    }

    #[test]
    fn test_missing_negate_child() {
        let cfg = ConditionConfig::Negate {
            condition: None,
            nested: vec![],
        };
        assert!(matches!(cfg.build(&clock()), Err(ConfigError::MissingChild { .. })));
    }

    #[test]
    fn test_errors_surface_from_nested() {
        let cfg = ConditionConfig::AllOf {
            conditions: vec![ConditionConfig::NameMatch {
                glob: Some("*.gz".into()),
                regex: None,
                nested: vec![ConditionConfig::AgeAtLeast {
                    age: "PT".into(),
                    nested: vec![],
                }],
            }],
            nested: vec![],
        };
        assert!(matches!(cfg.build(&clock()), Err(ConfigError::InvalidDuration { .. })));
    }

    #[test]
    fn test_keep_last_days_tree() {
        let now = SystemTime::now();
        let fixed: Arc<dyn Clock> = Arc::new(FixedClock::new(now));
        let cfg = ConditionConfig::Negate {
            condition: Some(Box::new(ConditionConfig::AgeAtLeast {
                age: "P7D".into(),
                nested: vec![],
            })),
            nested: vec![],
        };
        let mut cond = cfg.build(&fixed).unwrap();

        let recent = FileAttributes::file(1, now - StdDuration::from_secs(3600));
        let old = FileAttributes::file(1, now - StdDuration::from_secs(8 * 86_400));
        assert!(cond.accept(Path::new("/logs"), Path::new("a.log"), &recent));
        assert!(!cond.accept(Path::new("/logs"), Path::new("b.log"), &old));
    }
}
