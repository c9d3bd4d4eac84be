//! JSON output formatter for catalog listings.
//!
//! Provides machine-readable JSON output for scripting and automation.
//!
//! # Output Schema
//!
//! ```json
//! {
//!   "query": {
//!     "search": "report",
//!     "ordering": "-uploaded_at"
//!   },
//!   "active_filters": ["search"],
//!   "summary": {
//!     "total_files": 2,
//!     "unique_files": 1,
//!     "duplicated_files": 1,
//!     "total_storage_savings": 4000,
//!     "total_storage_savings_display": "3.9 KiB",
//!     "exit_code": 0,
//!     "exit_code_name": "FH000"
//!   },
//!   "files": [
//!     {
//!       "id": "…",
//!       "file": "http://localhost:8000/media/uploads/report.pdf",
//!       "original_filename": "report.pdf",
//!       "file_type": "application/pdf",
//!       "size": 2000,
//!       "uploaded_at": "2024-05-01T12:00:00Z",
//!       "content_hash": "…",
//!       "reference_count": 3,
//!       "storage_savings": 4000
//!     }
//!   ]
//! }
//! ```
//!
//! # Example
//!
//! ```
//! use filehub::catalog::CatalogView;
//! use filehub::error::ExitCode;
//! use filehub::filters::ActiveFilterSet;
//! use filehub::output::json::JsonOutput;
//!
//! let view = CatalogView::new();
//! let output = JsonOutput::new(&view, &ActiveFilterSet::default(), ExitCode::NoFiles);
//! let json = output.to_json().unwrap();
//! assert!(json.contains("\"total_files\":0"));
//! ```

use std::io::Write;

use serde::Serialize;

use crate::catalog::{CatalogSummary, CatalogView, FileRecord};
use crate::error::ExitCode;
use crate::filters::{ActiveFilterSet, QueryDescriptor};

use super::format_savings;

/// Summary statistics in JSON format.
#[derive(Debug, Clone, Serialize)]
pub struct JsonSummary {
    /// Number of records in the listing
    pub total_files: usize,
    /// Records whose content is referenced once
    pub unique_files: usize,
    /// Records sharing content with another upload
    pub duplicated_files: usize,
    /// Bytes saved by deduplication (negative means bad backend data)
    pub total_storage_savings: i128,
    /// Savings in human-readable form
    pub total_storage_savings_display: String,
    /// Exit code of this run
    pub exit_code: i32,
    /// Machine-readable exit code name
    pub exit_code_name: String,
}

impl JsonSummary {
    /// Create a JSON summary from a catalog summary and an exit code.
    #[must_use]
    pub fn from_catalog_summary(summary: &CatalogSummary, exit_code: ExitCode) -> Self {
        Self {
            total_files: summary.total_files,
            unique_files: summary.unique_files,
            duplicated_files: summary.duplicated_files,
            total_storage_savings: summary.total_storage_savings,
            total_storage_savings_display: format_savings(summary.total_storage_savings),
            exit_code: exit_code.as_i32(),
            exit_code_name: exit_code.code_prefix().to_string(),
        }
    }
}

/// Complete JSON output structure.
#[derive(Debug, Clone, Serialize)]
pub struct JsonOutput {
    /// Query that produced the listing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<QueryDescriptor>,
    /// Filters in effect, in query order
    pub active_filters: ActiveFilterSet,
    /// Summary statistics
    pub summary: JsonSummary,
    /// Records in backend order
    pub files: Vec<FileRecord>,
}

impl JsonOutput {
    /// Create a JSON output from a settled view.
    ///
    /// # Arguments
    ///
    /// * `view` - The catalog view after its newest request settled
    /// * `active` - Active filters recorded by the filter engine
    /// * `exit_code` - The exit code for this run
    #[must_use]
    pub fn new(view: &CatalogView, active: &ActiveFilterSet, exit_code: ExitCode) -> Self {
        Self {
            query: view.loaded_query().cloned(),
            active_filters: active.clone(),
            summary: JsonSummary::from_catalog_summary(view.summary(), exit_code),
            files: view.records().to_vec(),
        }
    }

    /// Serialize to compact JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails (unlikely for valid data).
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Serialize to pretty-printed JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails (unlikely for valid data).
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Write JSON to a writer, followed by a newline.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or writing fails.
    pub fn write_to<W: Write>(&self, writer: &mut W, pretty: bool) -> Result<(), JsonOutputError> {
        let json = if pretty {
            self.to_json_pretty()?
        } else {
            self.to_json()?
        };
        writer.write_all(json.as_bytes())?;
        writer.write_all(b"\n")?;
        Ok(())
    }
}

/// Errors that can occur while writing JSON output.
#[derive(thiserror::Error, Debug)]
pub enum JsonOutputError {
    /// Serialization failed
    #[error("JSON serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Writing failed
    #[error("I/O error during JSON generation: {0}")]
    Io(#[from] std::io::Error),
}
