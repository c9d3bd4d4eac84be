//! Output formatters for catalog listings.
//!
//! This module provides different output formats for a settled listing:
//! - A colored table for terminals
//! - JSON for automation and scripting
//! - CSV for spreadsheet import
//!
//! # Example
//!
//! ```
//! use filehub::catalog::CatalogView;
//! use filehub::filters::ActiveFilterSet;
//! use filehub::output::TableOutput;
//!
//! let view = CatalogView::new();
//! let active = ActiveFilterSet::default();
//! let table = TableOutput::new(view.records(), view.summary(), view.query(), &active)
//!     .with_color(false);
//! assert!(table.render().contains("Total Files"));
//! ```

pub mod csv;
pub mod json;
pub mod table;

use bytesize::ByteSize;

// Re-export main types
pub use csv::CsvOutput;
pub use json::JsonOutput;
pub use table::TableOutput;

/// Format a byte count using IEC binary units (KiB, MiB, GiB).
///
/// # Examples
///
/// ```
/// use filehub::output::format_size;
///
/// assert_eq!(format_size(1024), "1.0 KiB");
/// assert!(format_size(5 * 1024 * 1024).contains("MiB"));
/// ```
#[must_use]
pub fn format_size(bytes: u64) -> String {
    ByteSize::b(bytes).to_string()
}

/// Format a signed savings figure, keeping the sign of negative totals.
#[must_use]
pub fn format_savings(bytes: i128) -> String {
    let magnitude = bytes.unsigned_abs();
    let text = match u64::try_from(magnitude) {
        Ok(b) => format_size(b),
        Err(_) => format!("{magnitude} B"),
    };
    if bytes < 0 {
        format!("-{text}")
    } else {
        text
    }
}

/// Truncate a string to `max_len` characters, ending in `...` when cut.
#[must_use]
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        return s.to_string();
    }
    if max_len <= 3 {
        return ".".repeat(max_len);
    }
    let kept: String = s.chars().take(max_len - 3).collect();
    format!("{kept}...")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_savings_sign() {
        assert_eq!(format_savings(0), "0 B");
        assert_eq!(format_savings(2048), "2.0 KiB");
        assert_eq!(format_savings(-2048), "-2.0 KiB");
        assert_eq!(format_savings(i128::from(i64::MIN)).chars().next(), Some('-'));
        let beyond = i128::from(u64::MAX) + 1;
        assert_eq!(format_savings(beyond), "18446744073709551616 B");
        assert_eq!(format_savings(-beyond), "-18446744073709551616 B");
    }

    #[test]
    fn test_truncate_string() {
        assert_eq!(truncate_string("short.txt", 20), "short.txt");
        assert_eq!(truncate_string("a-very-long-file-name.txt", 10), "a-very-...");
        assert_eq!(truncate_string("abcdef", 2), "..");
        assert_eq!(truncate_string("ééééé", 4), "é...");
    }
}
