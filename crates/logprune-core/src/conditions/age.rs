//! Age condition based on last-modified time.

use std::path::Path;
use std::sync::Arc;

use super::{NestedConditions, PathCondition};
use crate::traits::{Clock, SystemClock};
use crate::types::Duration;
use crate::walker::FileAttributes;

/// Accepts files whose age (`now - last_modified`) is at least `age`.
///
/// Files modified in the future have a negative age and are never accepted.
#[derive(Debug)]
pub struct AgeAtLeast {
    age: Duration,
    clock: Arc<dyn Clock>,
    nested: NestedConditions,
}

impl AgeAtLeast {
    pub fn new(age: Duration) -> Self {
        Self {
            age,
            clock: Arc::new(SystemClock),
            nested: NestedConditions::default(),
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_nested(mut self, nested: Vec<Box<dyn PathCondition>>) -> Self {
        self.nested = NestedConditions::new(nested);
        self
    }

    pub fn age(&self) -> Duration {
        self.age
    }
}

impl PathCondition for AgeAtLeast {
    fn reset(&mut self) {
        self.nested.reset();
    }

    fn accept(&mut self, base: &Path, relative: &Path, attributes: &FileAttributes) -> bool {
        let threshold: std::time::Duration = self.age.into();
        let own = match self.clock.now().duration_since(attributes.last_modified) {
            Ok(file_age) => file_age >= threshold,
            Err(_) => false,
        };
        tracing::trace!(
            path = %relative.display(),
            age = %self.age,
            accepted = own,
            "age check"
        );
        self.nested.guard(own, base, relative, attributes)
    }
}

#[cfg(test)]
mod tests {
    use std::time::SystemTime;

    use super::*;
    use crate::traits::FixedClock;

    const DAY: u64 = 86_400;

    fn at_days_old(cond: &mut AgeAtLeast, now: SystemTime, days: u64) -> bool {
        let modified = now - std::time::Duration::from_secs(days * DAY);
        cond.accept(
            Path::new("/logs"),
            Path::new("app.log"),
            &FileAttributes::file(1, modified),
        )
    }

    #[test]
    fn test_accepts_at_or_past_threshold() {
        let now = SystemTime::now();
        let mut cond = AgeAtLeast::new(Duration::parse("P7D").unwrap())
            .with_clock(Arc::new(FixedClock::new(now)));

        assert!(!at_days_old(&mut cond, now, 1));
        assert!(!at_days_old(&mut cond, now, 6));
        assert!(at_days_old(&mut cond, now, 7));
        assert!(at_days_old(&mut cond, now, 8));
    }

    #[test]
    fn test_future_files_rejected() {
        let now = SystemTime::now();
        let mut cond =
            AgeAtLeast::new(Duration::ZERO).with_clock(Arc::new(FixedClock::new(now)));
        let future = FileAttributes::file(1, now + std::time::Duration::from_secs(3600));
        assert!(!cond.accept(Path::new("/logs"), Path::new("app.log"), &future));
        assert!(at_days_old(&mut cond, now, 0));
    }
}
