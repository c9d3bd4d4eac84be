//! Size-unit selectors and byte conversion for size filters.
//!
//! Size filters are entered as free text plus an independent unit selector.
//! Conversion happens only when a query is built, so malformed text is kept
//! in the filter state and simply contributes nothing to the query.
//!
//! # Presence Policy
//!
//! A size value is *present* when its text parses to a finite, non-negative
//! number and the rounded byte count is non-zero. A size of exactly zero bytes
//! is indistinguishable from an unset field.
//!
//! # Example
//!
//! ```
//! use filehub::filters::units::{size_to_bytes, SizeUnit};
//!
//! assert_eq!(size_to_bytes("1", SizeUnit::Kilobytes), Some(1024));
//! assert_eq!(size_to_bytes("1.5", SizeUnit::Megabytes), Some(1_572_864));
//! assert_eq!(size_to_bytes("0", SizeUnit::Gigabytes), None);
//! assert_eq!(size_to_bytes("abc", SizeUnit::Bytes), None);
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::FilterError;

/// Unit selector for a size filter.
///
/// Multipliers are binary: one kilobyte is 1024 bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SizeUnit {
    /// Plain bytes
    #[default]
    #[serde(rename = "B")]
    Bytes,
    /// 1024 bytes
    #[serde(rename = "KB")]
    Kilobytes,
    /// 1024² bytes
    #[serde(rename = "MB")]
    Megabytes,
    /// 1024³ bytes
    #[serde(rename = "GB")]
    Gigabytes,
}

impl SizeUnit {
    /// All units in ascending order.
    pub const ALL: [SizeUnit; 4] = [
        SizeUnit::Bytes,
        SizeUnit::Kilobytes,
        SizeUnit::Megabytes,
        SizeUnit::Gigabytes,
    ];

    /// Number of bytes in one of this unit.
    #[must_use]
    pub fn multiplier(self) -> u64 {
        match self {
            Self::Bytes => 1,
            Self::Kilobytes => 1_024,
            Self::Megabytes => 1_048_576,
            Self::Gigabytes => 1_073_741_824,
        }
    }

    /// Short label used in filter state and on screen.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Bytes => "B",
            Self::Kilobytes => "KB",
            Self::Megabytes => "MB",
            Self::Gigabytes => "GB",
        }
    }
}

impl fmt::Display for SizeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SizeUnit {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "b" | "byte" | "bytes" => Ok(Self::Bytes),
            "k" | "kb" | "kib" | "kilobyte" | "kilobytes" => Ok(Self::Kilobytes),
            "m" | "mb" | "mib" | "megabyte" | "megabytes" => Ok(Self::Megabytes),
            "g" | "gb" | "gib" | "gigabyte" | "gigabytes" => Ok(Self::Gigabytes),
            _ => Err(FilterError::UnknownUnit(s.to_string())),
        }
    }
}

/// Convert a raw size value and unit into a byte count.
///
/// Returns `None` when the value is absent under the presence policy:
/// empty or non-numeric text, a non-finite or negative number, a result
/// that does not fit in `u64`, or a result that rounds to zero.
#[must_use]
pub fn size_to_bytes(raw: &str, unit: SizeUnit) -> Option<u64> {
    let value: f64 = raw.trim().parse().ok()?;
    if !value.is_finite() || value < 0.0 {
        return None;
    }

    let bytes = (value * unit.multiplier() as f64).round();
    if bytes < 1.0 || bytes >= u64::MAX as f64 {
        return None;
    }

    Some(bytes as u64)
}

/// Convert a raw size value with a raw unit selector.
///
/// An unparseable unit makes the whole size absent.
#[must_use]
pub fn raw_size_to_bytes(raw: &str, raw_unit: &str) -> Option<u64> {
    match raw_unit.parse::<SizeUnit>() {
        Ok(unit) => size_to_bytes(raw, unit),
        Err(e) => {
            log::debug!("Ignoring size {:?}: {}", raw, e);
            None
        }
    }
}
