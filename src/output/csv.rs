//! CSV output formatter for catalog listings.
//!
//! Provides machine-readable CSV output for spreadsheets and data analysis.
//! One row is generated for each record, in the order the backend returned.
//!
//! # Columns
//!
//! - `id`: Record identifier
//! - `original_filename`: Name the file was uploaded under
//! - `file_type`: MIME type
//! - `size`: Size in bytes
//! - `uploaded_at`: Upload time (RFC 3339 format)
//! - `content_hash`: Content hash as reported by the backend
//! - `reference_count`: Uploads sharing this content
//! - `storage_savings`: Bytes saved, empty when the backend omitted it
//! - `download_url`: Where the stored content can be fetched
//!
//! # Example
//!
//! ```
//! use filehub::output::csv::CsvOutput;
//!
//! let output = CsvOutput::new(&[]);
//! let csv = output.to_string().unwrap();
//! assert!(csv.is_empty());
//! ```

use std::io;

use serde::Serialize;
use thiserror::Error;

use crate::catalog::FileRecord;

/// Errors that can occur during CSV output generation.
#[derive(Debug, Error)]
pub enum CsvOutputError {
    /// I/O error during writing.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Error during CSV serialization.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// A single row in the CSV output.
#[derive(Debug, Serialize)]
struct CsvRow<'a> {
    id: &'a str,
    original_filename: &'a str,
    file_type: &'a str,
    size: u64,
    uploaded_at: String,
    content_hash: &'a str,
    reference_count: u32,
    storage_savings: Option<i64>,
    download_url: &'a str,
}

impl<'a> From<&'a FileRecord> for CsvRow<'a> {
    fn from(record: &'a FileRecord) -> Self {
        Self {
            id: &record.id,
            original_filename: &record.original_filename,
            file_type: &record.file_type,
            size: record.size,
            uploaded_at: record.uploaded_at.to_rfc3339(),
            content_hash: &record.content_hash,
            reference_count: record.reference_count,
            storage_savings: record.storage_savings,
            download_url: &record.download_url,
        }
    }
}

/// CSV output formatter.
pub struct CsvOutput<'a> {
    records: &'a [FileRecord],
}

impl<'a> CsvOutput<'a> {
    /// Create a new CSV output formatter.
    #[must_use]
    pub fn new(records: &'a [FileRecord]) -> Self {
        Self { records }
    }

    /// Write the CSV output to the given writer.
    ///
    /// The header row is written together with the first record, so an
    /// empty listing produces no output.
    ///
    /// # Errors
    ///
    /// Returns `CsvOutputError` if writing or serialization fails.
    pub fn write_to<W: io::Write>(&self, writer: W) -> Result<(), CsvOutputError> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        for record in self.records {
            csv_writer.serialize(CsvRow::from(record))?;
        }
        csv_writer.flush()?;
        Ok(())
    }

    /// Generate CSV output as a string.
    ///
    /// # Errors
    ///
    /// Returns `CsvOutputError` if serialization fails.
    pub fn to_string(&self) -> Result<String, CsvOutputError> {
        let mut buffer = Vec::new();
        self.write_to(&mut buffer)?;
        Ok(String::from_utf8_lossy(&buffer).to_string())
    }
}
