//! Human-readable table output for catalog listings.
//!
//! Renders, top to bottom:
//!
//! 1. The summary block (total, unique, duplicated, storage savings)
//! 2. Active filter chips and the ordering in effect
//! 3. One row per record with a reference badge
//!
//! Colors go through `yansi` and can be switched off per formatter, which is
//! what `--no-color` and non-terminal output do.

use std::io::{self, Write};

use yansi::{Paint, Style};

use crate::catalog::{CatalogSummary, FileRecord};
use crate::filters::{ActiveFilterSet, FilterField, QueryDescriptor};

use super::{format_savings, format_size, truncate_string};

const NAME_WIDTH: usize = 40;
const TYPE_WIDTH: usize = 24;
const HASH_WIDTH: usize = 12;

const HEADER: Style = Style::new().bold();
const UNIQUE: Style = Style::new().green();
const SHARED: Style = Style::new().yellow().bold();
const CHIP: Style = Style::new().cyan();
const WARN: Style = Style::new().red().bold();

/// Table formatter over a settled listing.
pub struct TableOutput<'a> {
    records: &'a [FileRecord],
    summary: &'a CatalogSummary,
    query: Option<&'a QueryDescriptor>,
    active: &'a ActiveFilterSet,
    color: bool,
}

impl<'a> TableOutput<'a> {
    /// Create a formatter. Colors are on by default.
    #[must_use]
    pub fn new(
        records: &'a [FileRecord],
        summary: &'a CatalogSummary,
        query: Option<&'a QueryDescriptor>,
        active: &'a ActiveFilterSet,
    ) -> Self {
        Self {
            records,
            summary,
            query,
            active,
            color: true,
        }
    }

    /// Enable or disable ANSI colors.
    #[must_use]
    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    fn paint(&self, text: &str, style: Style) -> String {
        if self.color {
            text.paint(style).to_string()
        } else {
            text.to_string()
        }
    }

    /// Write the summary block.
    ///
    /// # Errors
    ///
    /// Returns any error from the writer.
    pub fn write_summary<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        let savings = format_savings(self.summary.total_storage_savings);
        let savings = if self.summary.has_negative_savings() {
            self.paint(&savings, WARN)
        } else {
            savings
        };

        writeln!(writer, "{:<18}{}", "Total Files", self.summary.total_files)?;
        writeln!(writer, "{:<18}{}", "Unique Files", self.summary.unique_files)?;
        writeln!(writer, "{:<18}{}", "Duplicated Files", self.summary.duplicated_files)?;
        writeln!(writer, "{:<18}{}", "Storage Savings", savings)?;
        Ok(())
    }

    /// Write the active filter chips and the ordering.
    ///
    /// # Errors
    ///
    /// Returns any error from the writer.
    pub fn write_filters<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        let Some(query) = self.query else {
            return Ok(());
        };

        if self.active.is_empty() {
            writeln!(writer, "Filters: none")?;
        } else {
            let chips: Vec<String> = self
                .active
                .iter()
                .filter_map(|field| chip_text(field, query))
                .map(|chip| self.paint(&format!("[{chip}]"), CHIP))
                .collect();
            writeln!(writer, "Filters: {}", chips.join(" "))?;
        }
        writeln!(writer, "Ordering: {}", query.ordering)?;
        Ok(())
    }

    /// Write one row per record, or a notice when there are none.
    ///
    /// # Errors
    ///
    /// Returns any error from the writer.
    pub fn write_rows<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        if self.records.is_empty() {
            writeln!(writer, "No files found.")?;
            return Ok(());
        }

        let header = format!(
            "{:<NAME_WIDTH$}  {:<TYPE_WIDTH$}  {:>10}  {:<16}  {:<HASH_WIDTH$}  {}",
            "NAME", "TYPE", "SIZE", "UPLOADED", "HASH", "REFERENCES"
        );
        writeln!(writer, "{}", self.paint(&header, HEADER))?;

        for record in self.records {
            let badge = record.reference_label();
            let badge = if record.is_unique() {
                self.paint(&badge, UNIQUE)
            } else {
                self.paint(&badge, SHARED)
            };
            writeln!(
                writer,
                "{:<NAME_WIDTH$}  {:<TYPE_WIDTH$}  {:>10}  {:<16}  {:<HASH_WIDTH$}  {}",
                truncate_string(&record.original_filename, NAME_WIDTH),
                truncate_string(&record.file_type, TYPE_WIDTH),
                format_size(record.size),
                record.uploaded_at.format("%Y-%m-%d %H:%M"),
                record.short_hash(HASH_WIDTH),
                badge
            )?;
        }
        Ok(())
    }

    /// Write summary, filters and rows separated by blank lines.
    ///
    /// # Errors
    ///
    /// Returns any error from the writer.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        self.write_summary(writer)?;
        writeln!(writer)?;
        if self.query.is_some() {
            self.write_filters(writer)?;
            writeln!(writer)?;
        }
        self.write_rows(writer)
    }

    /// Render to a string.
    #[must_use]
    pub fn render(&self) -> String {
        let mut buffer = Vec::new();
        // Writing into a Vec cannot fail
        let _ = self.write_to(&mut buffer);
        String::from_utf8_lossy(&buffer).to_string()
    }
}

/// Chip label for one active filter, taken from the query sent.
fn chip_text(field: FilterField, query: &QueryDescriptor) -> Option<String> {
    let value = match field {
        FilterField::Search => query.search.clone()?,
        FilterField::FileType => query.file_type.clone()?,
        FilterField::MinSize => format_size(query.min_size?),
        FilterField::MaxSize => format_size(query.max_size?),
        FilterField::UploadedAfter => query.uploaded_after.clone()?,
        FilterField::UploadedBefore => query.uploaded_before.clone()?,
        _ => return None,
    };
    Some(format!("{}: {}", field.label(), value))
}
