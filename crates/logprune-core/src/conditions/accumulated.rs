//! Accumulator conditions: running byte total and running file count.
//!
//! Both add the current entry first and then compare, accepting once the running
//! value is strictly greater than the threshold. Reaching the threshold exactly
//! does not accept; the next entry, of any size, does. Walk the files newest
//! first and these select everything beyond the budget.

use std::path::Path;

use super::{NestedConditions, PathCondition};
use crate::errors::ConfigError;
use crate::types::FileSize;
use crate::walker::FileAttributes;

/// Accepts once the accumulated size of visited files exceeds a byte threshold.
#[derive(Debug)]
pub struct AccumulatedSizeAtLeast {
    threshold_bytes: u64,
    accumulated_bytes: u64,
    nested: NestedConditions,
}

impl AccumulatedSizeAtLeast {
    pub fn new(threshold_bytes: u64) -> Result<Self, ConfigError> {
        if threshold_bytes == 0 {
            return Err(ConfigError::InvalidValue {
                field: "exceeds".to_string(),
                message: "size threshold must be a positive number of bytes".to_string(),
            });
        }
        Ok(Self {
            threshold_bytes,
            accumulated_bytes: 0,
            nested: NestedConditions::default(),
        })
    }

    /// Threshold from a size string such as `"3KB"` or `"1.5 GB"`.
    pub fn parse(threshold: &str) -> Result<Self, ConfigError> {
        Self::new(FileSize::parse(threshold)?)
    }

    pub fn with_nested(mut self, nested: Vec<Box<dyn PathCondition>>) -> Self {
        self.nested = NestedConditions::new(nested);
        self
    }

    pub fn threshold_bytes(&self) -> u64 {
        self.threshold_bytes
    }

    pub fn accumulated_bytes(&self) -> u64 {
        self.accumulated_bytes
    }
}

impl PathCondition for AccumulatedSizeAtLeast {
    fn reset(&mut self) {
        self.accumulated_bytes = 0;
        self.nested.reset();
    }

    fn accept(&mut self, base: &Path, relative: &Path, attributes: &FileAttributes) -> bool {
        let already_full = self.accumulated_bytes >= self.threshold_bytes;
        self.accumulated_bytes = self.accumulated_bytes.saturating_add(attributes.size);
        let own = already_full || self.accumulated_bytes > self.threshold_bytes;
        tracing::trace!(
            path = %relative.display(),
            accumulated = self.accumulated_bytes,
            threshold = self.threshold_bytes,
            accepted = own,
            "accumulated size check"
        );
        self.nested.guard(own, base, relative, attributes)
    }
}

/// Accepts once the number of visited files exceeds a count threshold.
#[derive(Debug)]
pub struct AccumulatedCountAtLeast {
    threshold: u64,
    count: u64,
    nested: NestedConditions,
}

impl AccumulatedCountAtLeast {
    pub fn new(threshold: u64) -> Result<Self, ConfigError> {
        if threshold == 0 {
            return Err(ConfigError::InvalidValue {
                field: "exceeds".to_string(),
                message: "count threshold must be a positive integer".to_string(),
            });
        }
        Ok(Self {
            threshold,
            count: 0,
            nested: NestedConditions::default(),
        })
    }

    pub fn with_nested(mut self, nested: Vec<Box<dyn PathCondition>>) -> Self {
        self.nested = NestedConditions::new(nested);
        self
    }

    pub fn threshold(&self) -> u64 {
        self.threshold
    }

    pub fn count(&self) -> u64 {
        self.count
    }
}

impl PathCondition for AccumulatedCountAtLeast {
    fn reset(&mut self) {
        self.count = 0;
        self.nested.reset();
    }

    fn accept(&mut self, base: &Path, relative: &Path, attributes: &FileAttributes) -> bool {
        self.count = self.count.saturating_add(1);
        let own = self.count > self.threshold;
        tracing::trace!(
            path = %relative.display(),
            count = self.count,
            threshold = self.threshold,
            accepted = own,
            "accumulated count check"
        );
        self.nested.guard(own, base, relative, attributes)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{check, Fixed};
    use super::*;

    #[test]
    fn test_size_exceeds_not_equals() {
        let threshold = 4096;
        let nested = Fixed::new(true);
        let mut cond = AccumulatedSizeAtLeast::new(threshold)
            .unwrap()
            .with_nested(vec![nested.boxed()]);

        for _ in 0..4 {
            assert!(!check(&mut cond, "app.log", threshold / 4));
        }
        assert_eq!(cond.accumulated_bytes(), threshold);
        assert_eq!(nested.accept_calls(), 0);

        assert!(check(&mut cond, "app.log", threshold / 4));
        assert_eq!(nested.accept_calls(), 1);
    }

    #[test]
    fn test_size_next_entry_of_any_size_accepts() {
        let mut cond = AccumulatedSizeAtLeast::new(100).unwrap();
        assert!(!check(&mut cond, "a", 100));
        assert!(check(&mut cond, "b", 0));
    }

    #[test]
    fn test_size_reset_clears_total_and_nested() {
        let nested = Fixed::new(true);
        let mut cond = AccumulatedSizeAtLeast::parse("1KB")
            .unwrap()
            .with_nested(vec![nested.boxed()]);
        assert!(check(&mut cond, "a", 2048));

        cond.reset();
        assert_eq!(cond.accumulated_bytes(), 0);
        assert_eq!(nested.reset_calls(), 1);
        assert!(!check(&mut cond, "a", 512));
    }

    #[test]
    fn test_size_nested_can_reject() {
        let mut cond = AccumulatedSizeAtLeast::new(1)
            .unwrap()
            .with_nested(vec![Fixed::new(false).boxed()]);
        assert!(!check(&mut cond, "a", 10));
    }

    #[test]
    fn test_count_exceeds_not_equals() {
        let mut cond = AccumulatedCountAtLeast::new(3).unwrap();
        assert!(!check(&mut cond, "a", 1));
        assert!(!check(&mut cond, "b", 1));
        assert!(!check(&mut cond, "c", 1));
        assert!(check(&mut cond, "d", 1));
        assert!(check(&mut cond, "e", 1));

        cond.reset();
        assert_eq!(cond.count(), 0);
        assert!(!check(&mut cond, "a", 1));
    }

    #[test]
    fn test_zero_thresholds_rejected() {
        assert!(matches!(
            AccumulatedSizeAtLeast::new(0),
            Err(ConfigError::InvalidValue { .. })
        ));
        assert!(matches!(
            AccumulatedCountAtLeast::new(0),
            Err(ConfigError::InvalidValue { .. })
        ));
        assert!(matches!(
            AccumulatedSizeAtLeast::parse("lots"),
            Err(ConfigError::InvalidFileSize { .. })
        ));
    }
}
