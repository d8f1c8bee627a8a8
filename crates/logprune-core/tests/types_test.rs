//! Tests for duration and file size parsing.

use logprune_core::{ConfigError, Duration, ErrorCode, FileSize};
use proptest::prelude::*;

#[test]
fn test_duration_forms() {
    assert_eq!(Duration::parse("P7D").unwrap(), Duration::from_secs(7 * 86_400));
    assert_eq!(Duration::parse("PT1H30M").unwrap(), Duration::from_secs(5_400));
    assert_eq!(Duration::parse("p1dt2h").unwrap(), Duration::from_secs(93_600));
    assert_eq!(Duration::parse("10S").unwrap(), Duration::from_secs(10));
}

#[test]
fn test_duration_rejects_malformed_text() {
    for text in ["", "P", "PT", "7 days", "P-1D", "P1W"] {
        let err = Duration::parse(text).unwrap_err();
        assert!(
            matches!(err, ConfigError::InvalidDuration { .. }),
            "{text:?} gave {err:?}"
        );
        assert_eq!(err.error_code(), "INVALID_DURATION");
    }
}

#[test]
fn test_file_size_units() {
    assert_eq!(FileSize::parse("3KB").unwrap(), 3 * 1024);
    assert_eq!(FileSize::parse("1 GB").unwrap(), 1024 * 1024 * 1024);
    assert_eq!(FileSize::parse("512").unwrap(), 512);
    assert!(FileSize::parse("lots").is_err());
}

proptest! {
    #[test]
    fn prop_seconds_parse_to_canonical(secs in 1u64..10_000_000) {
        let parsed = Duration::parse(&format!("PT{secs}S")).unwrap();
        prop_assert_eq!(parsed, Duration::from_secs(secs));
        prop_assert_eq!(parsed.to_millis(), secs * 1000);
    }

    #[test]
    fn prop_display_parses_back(days in 0u64..400, h in 0u64..24, m in 0u64..60, s in 0u64..60) {
        let d = Duration::from_secs(((days * 24 + h) * 60 + m) * 60 + s);
        prop_assert_eq!(Duration::parse(&d.to_string()).unwrap(), d);
    }
}
