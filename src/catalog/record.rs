//! File records as returned by the catalog API.

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use serde::{de, Deserialize, Deserializer, Serialize};

/// Layouts accepted for timestamps that carry no offset; read as UTC.
const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// One logical file in the catalog.
///
/// Records are produced by the storage backend and are read-only here. Each
/// record stands for one stored content, shared by `reference_count` uploads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    /// Backend identifier
    pub id: String,
    /// Filename of the first upload
    pub original_filename: String,
    /// MIME type reported at upload
    pub file_type: String,
    /// Content size in bytes
    pub size: u64,
    /// Upload timestamp
    ///
    /// Accepts RFC 3339 and offset-less timestamps, the latter taken as UTC.
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub uploaded_at: DateTime<Utc>,
    /// Download locator
    #[serde(rename = "file")]
    pub download_url: String,
    /// Content hash (hex)
    pub content_hash: String,
    /// Number of uploads sharing this content
    pub reference_count: u32,
    /// Bytes not stored thanks to deduplication, as computed by the backend
    ///
    /// Missing values count as zero. Negative values are kept as reported.
    #[serde(default)]
    pub storage_savings: Option<i64>,
}

impl FileRecord {
    /// Check whether this content has a single reference.
    #[must_use]
    pub fn is_unique(&self) -> bool {
        self.reference_count == 1
    }

    /// Reported savings, zero when missing.
    #[must_use]
    pub fn savings(&self) -> i64 {
        self.storage_savings.unwrap_or(0)
    }

    /// Savings implied by size and reference count: `size * (refs - 1)`.
    #[must_use]
    pub fn expected_savings(&self) -> i64 {
        let extra = i64::from(self.reference_count.saturating_sub(1));
        i64::try_from(self.size)
            .unwrap_or(i64::MAX)
            .saturating_mul(extra)
    }

    /// Check whether the reported savings match size and reference count.
    #[must_use]
    pub fn has_consistent_savings(&self) -> bool {
        self.savings() == self.expected_savings()
    }

    /// Badge text for the references column.
    #[must_use]
    pub fn reference_label(&self) -> String {
        if self.is_unique() {
            "Unique".to_string()
        } else {
            format!("{} references", self.reference_count)
        }
    }

    /// First `len` characters of the content hash.
    #[must_use]
    pub fn short_hash(&self, len: usize) -> &str {
        match self.content_hash.char_indices().nth(len) {
            Some((idx, _)) => &self.content_hash[..idx],
            None => &self.content_hash,
        }
    }
}

/// Parse an upload timestamp, with or without an offset.
#[must_use]
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .map(|naive| Utc.from_utc_datetime(&naive))
}

fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw).ok_or_else(|| de::Error::custom(format!("invalid timestamp '{raw}'")))
}
