//! `${...}` property substitution for configured paths.

use std::collections::HashMap;

/// Replaces `${name}` references in configuration strings.
///
/// Supported forms:
/// - `${name}`: configured property, then environment variable
/// - `${env:NAME}`: environment variable
/// - `${sys:name}`: configured property only
/// - `${name:-default}`: any of the above with a fallback
///
/// `$${` produces a literal `${`. References that cannot be resolved are left as written.
#[derive(Debug, Clone, Default)]
pub struct Substitutor {
    properties: HashMap<String, String>,
}

impl Substitutor {
    pub fn new(properties: HashMap<String, String>) -> Self {
        Self { properties }
    }

    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    pub fn replace(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        let mut rest = text;

        while let Some(start) = rest.find("${") {
            if rest[..start].ends_with('$') {
                out.push_str(&rest[..start - 1]);
                out.push_str("${");
                rest = &rest[start + 2..];
                continue;
            }

            out.push_str(&rest[..start]);
            let after = &rest[start + 2..];
            let Some(end) = after.find('}') else {
                out.push_str(&rest[start..]);
                return out;
            };

            let expr = &after[..end];
            match self.resolve(expr) {
                Some(value) => out.push_str(&value),
                None => {
                    out.push_str("${");
                    out.push_str(expr);
                    out.push('}');
                }
            }
            rest = &after[end + 1..];
        }

        out.push_str(rest);
        out
    }

    fn resolve(&self, expr: &str) -> Option<String> {
        let (key, default) = match expr.split_once(":-") {
            Some((key, default)) => (key, Some(default)),
            None => (expr, None),
        };

        let value = if let Some(name) = key.strip_prefix("env:") {
            std::env::var(name).ok()
        } else if let Some(name) = key.strip_prefix("sys:") {
            self.properties.get(name).cloned()
        } else {
            self.properties
                .get(key)
                .cloned()
                .or_else(|| std::env::var(key).ok())
        };

        value.or_else(|| default.map(str::to_string))
    }
}
