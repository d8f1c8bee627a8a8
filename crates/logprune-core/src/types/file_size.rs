//! Human-readable byte sizes ("10 MB", "2.5GB", "512").

use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::ConfigError;

const KB: u64 = 1024;
const MB: u64 = KB * KB;
const GB: u64 = KB * MB;
const TB: u64 = KB * GB;

static SIZE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^([0-9]+(?:[.,][0-9]+)?)\s*(|B|K|KB|M|MB|G|GB|T|TB)$").unwrap());

/// Parser for size thresholds. Units are binary multiples of 1024.
pub struct FileSize;

impl FileSize {
    /// Converts a size string to bytes. A bare number is taken as bytes.
    pub fn parse(text: &str) -> Result<u64, ConfigError> {
        let invalid = || ConfigError::InvalidFileSize {
            text: text.to_string(),
        };

        let captures = SIZE_PATTERN.captures(text.trim()).ok_or_else(invalid)?;
        let number = captures.get(1).map(|m| m.as_str().replace(',', ".")).ok_or_else(invalid)?;
        let unit = captures
            .get(2)
            .map(|m| m.as_str().to_ascii_uppercase())
            .unwrap_or_default();

        let multiplier = match unit.as_str() {
            "" | "B" => 1,
            "K" | "KB" => KB,
            "M" | "MB" => MB,
            "G" | "GB" => GB,
            "T" | "TB" => TB,
            _ => return Err(invalid()),
        };

        if let Ok(whole) = number.parse::<u64>() {
            return whole.checked_mul(multiplier).ok_or_else(invalid);
        }

        let value: f64 = number.parse().map_err(|_| invalid())?;
        let bytes = value * multiplier as f64;
        if !bytes.is_finite() || bytes >= u64::MAX as f64 {
            return Err(invalid());
        }
        Ok(bytes as u64)
    }
}
