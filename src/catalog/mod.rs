//! Catalog records, aggregation and fetching.
//!
//! # Overview
//!
//! - [`record`]: the [`FileRecord`] wire model
//! - [`summary`]: [`CatalogSummary`] aggregation over a listing
//! - [`client`]: the [`CatalogApi`] seam and its HTTP implementation
//! - [`view`]: [`CatalogView`], the display state with stale-response discard
//!
//! # Example
//!
//! ```
//! use filehub::catalog::{CatalogSummary, FileRecord};
//!
//! let records: Vec<FileRecord> = serde_json::from_str(r#"[
//!   {"id": "1", "file": "/media/a.txt", "original_filename": "a.txt",
//!    "file_type": "text/plain", "size": 1000, "uploaded_at": "2024-05-01T12:00:00Z",
//!    "content_hash": "aa", "reference_count": 1, "storage_savings": 0},
//!   {"id": "2", "file": "/media/b.bin", "original_filename": "b.bin",
//!    "file_type": "application/octet-stream", "size": 2000, "uploaded_at": "2024-05-02T12:00:00Z",
//!    "content_hash": "bb", "reference_count": 3, "storage_savings": 4000}
//! ]"#).unwrap();
//!
//! let summary = CatalogSummary::from_records(&records);
//! assert_eq!(summary.total_files, 2);
//! assert_eq!(summary.unique_files, 1);
//! assert_eq!(summary.duplicated_files, 1);
//! assert_eq!(summary.total_storage_savings, 4000);
//! ```

pub mod client;
pub mod record;
pub mod summary;
pub mod view;

// Re-export commonly used types
pub use client::{CatalogApi, CatalogError, CatalogResult, HttpCatalog};
pub use record::FileRecord;
pub use summary::CatalogSummary;
pub use view::{CatalogView, Completion, LoadState, RequestTicket};
