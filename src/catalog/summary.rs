//! Catalog summary statistics.
//!
//! # Overview
//!
//! [`CatalogSummary`] condenses a file listing into the figures shown above
//! the catalog: how many records there are, how many hold content referenced
//! once, how many hold shared content, and how many bytes deduplication saved.
//!
//! The summary is recomputed from scratch for every listing; it has no
//! identity of its own.
//!
//! # Example
//!
//! ```
//! use filehub::catalog::CatalogSummary;
//!
//! let summary = CatalogSummary::from_records(&[]);
//! assert_eq!(summary, CatalogSummary::default());
//! assert_eq!(summary.total_files, 0);
//! ```

use serde::{Deserialize, Serialize};

use super::record::FileRecord;

/// Aggregate statistics over a file listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogSummary {
    /// Number of records
    pub total_files: usize,
    /// Records whose content has exactly one reference
    pub unique_files: usize,
    /// Records that are not unique (`total_files - unique_files`)
    pub duplicated_files: usize,
    /// Sum of reported storage savings in bytes
    ///
    /// Not clamped: a negative total means the backend reported bad data.
    /// Summed in `i128`, which no listing of `i64` values can overflow.
    pub total_storage_savings: i128,
}

impl CatalogSummary {
    /// Compute the summary in one pass over `records`.
    ///
    /// Missing savings count as zero. Records are not modified.
    #[must_use]
    pub fn from_records(records: &[FileRecord]) -> Self {
        let (unique_files, total_storage_savings) =
            records
                .iter()
                .fold((0usize, 0i128), |(unique, savings), record| {
                    (
                        unique + usize::from(record.is_unique()),
                        savings + i128::from(record.savings()),
                    )
                });

        let total_files = records.len();
        Self {
            total_files,
            unique_files,
            duplicated_files: total_files - unique_files,
            total_storage_savings,
        }
    }

    /// Check whether the listing was empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total_files == 0
    }

    /// Check whether the reported savings sum to a negative total.
    #[must_use]
    pub fn has_negative_savings(&self) -> bool {
        self.total_storage_savings < 0
    }

    /// Savings as an unsigned byte count, `None` when negative.
    #[must_use]
    pub fn savings_bytes(&self) -> Option<u64> {
        u64::try_from(self.total_storage_savings).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::record::fixtures::record;

    #[test]
    fn test_empty_listing() {
        let summary = CatalogSummary::from_records(&[]);
        assert!(summary.is_empty());
        assert_eq!(summary.unique_files, 0);
        assert_eq!(summary.duplicated_files, 0);
        assert_eq!(summary.total_storage_savings, 0);
    }

    #[test]
    fn test_unique_and_duplicated() {
        let records = vec![
            record("a", 1000, 1, Some(0)),
            record("b", 2000, 3, Some(4000)),
        ];
        let summary = CatalogSummary::from_records(&records);
        assert_eq!(summary.total_files, 2);
        assert_eq!(summary.unique_files, 1);
        assert_eq!(summary.duplicated_files, 1);
        assert_eq!(summary.total_storage_savings, 4000);
    }

    #[test]
    fn test_missing_savings_counts_as_zero() {
        let records = vec![record("a", 10, 2, None), record("b", 10, 2, Some(10))];
        let summary = CatalogSummary::from_records(&records);
        assert_eq!(summary.total_storage_savings, 10);
    }

    #[test]
    fn test_negative_savings_not_clamped() {
        let records = vec![record("a", 10, 2, Some(10)), record("b", 10, 1, Some(-25))];
        let summary = CatalogSummary::from_records(&records);
        assert_eq!(summary.total_storage_savings, -15);
        assert!(summary.has_negative_savings());
        assert_eq!(summary.savings_bytes(), None);
    }

    #[test]
    fn test_huge_savings_sum_exactly() {
        let records = vec![
            record("a", 10, 2, Some(i64::MAX)),
            record("b", 10, 2, Some(i64::MAX)),
            record("c", 10, 2, Some(1)),
        ];
        let summary = CatalogSummary::from_records(&records);
        assert_eq!(summary.total_storage_savings, 2 * i128::from(i64::MAX) + 1);
        assert_eq!(summary.savings_bytes(), None);

        let records = vec![record("a", 10, 1, Some(i64::MIN)), record("b", 10, 1, Some(-1))];
        let summary = CatalogSummary::from_records(&records);
        assert_eq!(summary.total_storage_savings, i128::from(i64::MIN) - 1);
    }

    #[test]
    fn test_zero_references_counts_as_duplicated() {
        let records = vec![record("a", 10, 0, None)];
        let summary = CatalogSummary::from_records(&records);
        assert_eq!(summary.unique_files, 0);
        assert_eq!(summary.duplicated_files, 1);
    }

    #[test]
    fn test_input_untouched() {
        let records = vec![record("a", 10, 2, Some(10))];
        let before = records.clone();
        let _ = CatalogSummary::from_records(&records);
        assert_eq!(records, before);
    }
}
