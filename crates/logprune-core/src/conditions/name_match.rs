//! Name pattern condition over the path relative to the walk base.

use std::path::Path;

use globset::{GlobBuilder, GlobMatcher};
use regex::Regex;

use super::{NestedConditions, PathCondition};
use crate::errors::ConfigError;
use crate::walker::FileAttributes;

#[derive(Debug)]
enum Matcher {
    Glob(GlobMatcher),
    Regex(Regex),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Syntax {
    Glob,
    Regex,
}

/// Accepts files whose relative path matches a glob or a regex.
///
/// Patterns may carry an explicit `glob:` or `regex:` prefix. Globs use `*` within a
/// path segment and `**` across segments; regexes must match the whole path.
/// The base directory and the attributes play no part in the decision.
#[derive(Debug)]
pub struct NameMatch {
    pattern: String,
    matcher: Matcher,
    nested: NestedConditions,
}

impl NameMatch {
    /// At least one of `glob` and `regex` is required; the glob wins when both are set.
    pub fn new(glob: Option<&str>, regex: Option<&str>) -> Result<Self, ConfigError> {
        let glob = glob.filter(|g| !g.is_empty());
        let regex = regex.filter(|r| !r.is_empty());

        let (default_syntax, raw) = match (glob, regex) {
            (Some(g), _) => (Syntax::Glob, g),
            (None, Some(r)) => (Syntax::Regex, r),
            (None, None) => {
                return Err(ConfigError::MissingPattern {
                    condition: "NameMatch".to_string(),
                })
            }
        };

        let (syntax, pattern) = split_syntax(raw, default_syntax);
        let matcher = match syntax {
            Syntax::Glob => GlobBuilder::new(pattern)
                .literal_separator(true)
                .build()
                .map(|g| Matcher::Glob(g.compile_matcher()))
                .map_err(|e| ConfigError::InvalidPattern {
                    pattern: raw.to_string(),
                    message: e.to_string(),
                })?,
            Syntax::Regex => Regex::new(&format!("^(?:{pattern})$"))
                .map(Matcher::Regex)
                .map_err(|e| ConfigError::InvalidPattern {
                    pattern: raw.to_string(),
                    message: e.to_string(),
                })?,
        };

        Ok(Self {
            pattern: raw.to_string(),
            matcher,
            nested: NestedConditions::default(),
        })
    }

    pub fn glob(glob: &str) -> Result<Self, ConfigError> {
        Self::new(Some(glob), None)
    }

    pub fn regex(regex: &str) -> Result<Self, ConfigError> {
        Self::new(None, Some(regex))
    }

    pub fn with_nested(mut self, nested: Vec<Box<dyn PathCondition>>) -> Self {
        self.nested = NestedConditions::new(nested);
        self
    }

    /// The pattern as configured, including any syntax prefix.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    fn matches(&self, relative: &Path) -> bool {
        match &self.matcher {
            Matcher::Glob(glob) => glob.is_match(relative),
            Matcher::Regex(regex) => regex.is_match(&relative.to_string_lossy()),
        }
    }
}

fn split_syntax(raw: &str, default_syntax: Syntax) -> (Syntax, &str) {
    if let Some(rest) = raw.strip_prefix("glob:") {
        (Syntax::Glob, rest)
    } else if let Some(rest) = raw.strip_prefix("regex:") {
        (Syntax::Regex, rest)
    } else {
        (default_syntax, raw)
    }
}

impl PathCondition for NameMatch {
    fn reset(&mut self) {
        self.nested.reset();
    }

    fn accept(&mut self, base: &Path, relative: &Path, attributes: &FileAttributes) -> bool {
        let own = self.matches(relative);
        tracing::trace!(
            pattern = %self.pattern,
            path = %relative.display(),
            accepted = own,
            "name match"
        );
        self.nested.guard(own, base, relative, attributes)
    }
}
