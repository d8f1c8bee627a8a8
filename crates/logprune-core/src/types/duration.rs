//! Duration values in `PnDTnHnMnS` notation.

use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

const MILLIS_PER_SECOND: u64 = 1000;
const MILLIS_PER_MINUTE: u64 = 60 * MILLIS_PER_SECOND;
const MILLIS_PER_HOUR: u64 = 60 * MILLIS_PER_MINUTE;
const MILLIS_PER_DAY: u64 = 24 * MILLIS_PER_HOUR;

static DURATION_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^P?(?:([0-9]+)D)?(T?(?:([0-9]+)H)?(?:([0-9]+)M)?(?:([0-9]+)S)?)?$")
        .unwrap()
});

/// A non-negative span of time, normalized to whole milliseconds.
///
/// Equality and ordering use the normalized value, so `PT60S` equals `PT1M`.
/// Rendering always uses the fewest fields: `PT70S` displays as `PT1M10S`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Duration {
    millis: u64,
}

impl Duration {
    pub const ZERO: Duration = Duration { millis: 0 };

    /// Parses `P<days>DT<hours>H<minutes>M<seconds>S`.
    ///
    /// The `P` prefix and the `T` separator are optional, every field may be
    /// omitted (but not all of them) and letters are case-insensitive.
    /// A field larger than its natural range (`PT70S`) is folded into the total.
    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(invalid(text, "empty text"));
        }

        let captures = DURATION_PATTERN.captures(trimmed).ok_or_else(|| {
            invalid(
                text,
                "expected fields in order P<days>DT<hours>H<minutes>M<seconds>S",
            )
        })?;

        if captures
            .get(2)
            .is_some_and(|t| t.as_str().eq_ignore_ascii_case("T"))
        {
            return Err(invalid(text, "'T' must be followed by a time field"));
        }

        let fields = [
            (1, MILLIS_PER_DAY),
            (3, MILLIS_PER_HOUR),
            (4, MILLIS_PER_MINUTE),
            (5, MILLIS_PER_SECOND),
        ];

        let mut millis: u64 = 0;
        let mut seen_field = false;
        for (group, unit) in fields {
            let Some(m) = captures.get(group) else {
                continue;
            };
            seen_field = true;
            let count: u64 = m
                .as_str()
                .parse()
                .map_err(|_| invalid(text, "field value out of range"))?;
            millis = count
                .checked_mul(unit)
                .and_then(|v| millis.checked_add(v))
                .ok_or_else(|| invalid(text, "duration out of range"))?;
        }

        if !seen_field {
            return Err(invalid(text, "no duration fields"));
        }

        Ok(Self { millis })
    }

    /// Builds a duration from whole seconds.
    pub const fn from_secs(secs: u64) -> Self {
        Self {
            millis: secs.saturating_mul(MILLIS_PER_SECOND),
        }
    }

    /// Total length in milliseconds.
    pub const fn to_millis(&self) -> u64 {
        self.millis
    }

    /// Whole days.
    pub const fn days(&self) -> u64 {
        self.millis / MILLIS_PER_DAY
    }

    /// Hours left after removing whole days (0-23).
    pub const fn hours(&self) -> u64 {
        (self.millis % MILLIS_PER_DAY) / MILLIS_PER_HOUR
    }

    /// Minutes left after removing whole hours (0-59).
    pub const fn minutes(&self) -> u64 {
        (self.millis % MILLIS_PER_HOUR) / MILLIS_PER_MINUTE
    }

    /// Seconds left after removing whole minutes (0-59).
    pub const fn seconds(&self) -> u64 {
        (self.millis % MILLIS_PER_MINUTE) / MILLIS_PER_SECOND
    }
}

fn invalid(text: &str, reason: &str) -> ConfigError {
    ConfigError::InvalidDuration {
        text: text.to_string(),
        reason: reason.to_string(),
    }
}

impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.millis < MILLIS_PER_SECOND {
            return f.write_str("PT0S");
        }
        f.write_str("P")?;
        if self.days() != 0 {
            write!(f, "{}D", self.days())?;
        }
        let (hours, minutes, seconds) = (self.hours(), self.minutes(), self.seconds());
        if hours != 0 || minutes != 0 || seconds != 0 {
            f.write_str("T")?;
            if hours != 0 {
                write!(f, "{hours}H")?;
            }
            if minutes != 0 {
                write!(f, "{minutes}M")?;
            }
            if seconds != 0 {
                write!(f, "{seconds}S")?;
            }
        }
        Ok(())
    }
}

impl FromStr for Duration {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Duration {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Duration> for String {
    fn from(value: Duration) -> Self {
        value.to_string()
    }
}

impl From<Duration> for std::time::Duration {
    fn from(value: Duration) -> Self {
        std::time::Duration::from_millis(value.millis)
    }
}
