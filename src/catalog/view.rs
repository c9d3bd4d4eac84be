//! Catalog view state with superseded-request discard.
//!
//! # Overview
//!
//! [`CatalogView`] holds what the presentation layer reads: the current
//! records, their [`CatalogSummary`], and whether a fetch is in flight or
//! failed. Every fetch is issued a [`RequestTicket`]; only the newest ticket
//! may change the view. A slow response to an older query is dropped, so the
//! summary always matches the most recently triggered query.
//!
//! # Example
//!
//! ```
//! use filehub::catalog::{CatalogView, Completion, LoadState};
//! use filehub::filters::QueryDescriptor;
//!
//! let mut view = CatalogView::new();
//! let first = view.begin(QueryDescriptor::default());
//! let second = view.begin(QueryDescriptor::default());
//!
//! // The newer request settles first; the older one arrives late.
//! assert_eq!(view.complete(second, Ok(vec![])), Completion::Applied);
//! assert_eq!(view.complete(first, Ok(vec![])), Completion::Stale);
//! assert_eq!(view.state(), &LoadState::Loaded);
//! ```

use super::client::CatalogError;
use super::record::FileRecord;
use super::summary::CatalogSummary;
use crate::filters::QueryDescriptor;

/// Fetch lifecycle of the view.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadState {
    /// Nothing requested yet
    #[default]
    Idle,
    /// A request is in flight
    Loading,
    /// The newest request succeeded
    Loaded,
    /// The newest request failed; previous records are kept
    Failed(String),
}

impl LoadState {
    /// Check whether a request is in flight.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// Failure message, if the newest request failed.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failed(message) => Some(message),
            _ => None,
        }
    }
}

/// Handle for one issued fetch.
///
/// Deliberately not `Clone`: each ticket completes at most once.
#[derive(Debug, PartialEq, Eq)]
pub struct RequestTicket {
    generation: u64,
    query: QueryDescriptor,
}

impl RequestTicket {
    /// Sequence number; higher is newer.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// The query this ticket fetches.
    #[must_use]
    pub fn query(&self) -> &QueryDescriptor {
        &self.query
    }
}

/// Outcome of delivering a fetch result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// The result was the newest and updated the view
    Applied,
    /// A newer request exists; the result was discarded
    Stale,
}

/// Read-only catalog state for display.
#[derive(Debug, Clone, Default)]
pub struct CatalogView {
    /// Records of the newest successful fetch
    records: Vec<FileRecord>,
    /// Summary of `records`
    summary: CatalogSummary,
    /// Fetch lifecycle
    state: LoadState,
    /// Query of the newest issued request
    query: Option<QueryDescriptor>,
    /// Query that produced `records`
    loaded_query: Option<QueryDescriptor>,
    /// Generation of the newest issued request
    latest: u64,
}

impl CatalogView {
    /// Create an empty view.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // ==================== Request Sequencing ====================

    /// Register a new fetch for `query`.
    ///
    /// Any earlier ticket still in flight becomes stale.
    pub fn begin(&mut self, query: QueryDescriptor) -> RequestTicket {
        self.latest += 1;
        self.state = LoadState::Loading;
        self.query = Some(query.clone());
        log::debug!("Request #{} issued [{}]", self.latest, query);
        RequestTicket {
            generation: self.latest,
            query,
        }
    }

    /// Check whether `ticket` is still the newest request.
    #[must_use]
    pub fn is_current(&self, ticket: &RequestTicket) -> bool {
        ticket.generation == self.latest
    }

    /// Generation of the newest issued request (0 before the first).
    #[must_use]
    pub fn latest_generation(&self) -> u64 {
        self.latest
    }

    /// Deliver the result of a fetch.
    ///
    /// Results for superseded tickets are discarded. A successful result
    /// replaces the records and recomputes the summary; a failure keeps the
    /// previous records and records the error.
    pub fn complete(
        &mut self,
        ticket: RequestTicket,
        result: Result<Vec<FileRecord>, CatalogError>,
    ) -> Completion {
        if !self.is_current(&ticket) {
            log::debug!(
                "Discarding stale response #{} (newest is #{})",
                ticket.generation,
                self.latest
            );
            return Completion::Stale;
        }

        match result {
            Ok(records) => self.set_records(ticket.query, records),
            Err(e) => {
                log::warn!("Request #{} failed: {}", ticket.generation, e);
                self.state = LoadState::Failed(e.to_string());
            }
        }
        Completion::Applied
    }

    fn set_records(&mut self, query: QueryDescriptor, records: Vec<FileRecord>) {
        self.summary = CatalogSummary::from_records(&records);
        self.records = records;
        self.loaded_query = Some(query);
        self.state = LoadState::Loaded;

        log::info!(
            "Loaded {} files ({} unique, {} duplicated), {} bytes saved",
            self.summary.total_files,
            self.summary.unique_files,
            self.summary.duplicated_files,
            self.summary.total_storage_savings
        );
        let inconsistent = self
            .records
            .iter()
            .filter(|r| !r.has_consistent_savings())
            .count();
        if inconsistent > 0 {
            log::debug!(
                "{} record(s) report savings other than size * (references - 1)",
                inconsistent
            );
        }
        if self.summary.has_negative_savings() {
            log::warn!(
                "Backend reported negative total storage savings: {}",
                self.summary.total_storage_savings
            );
        }
    }

    // ==================== Read Access ====================

    /// Records of the newest successful fetch.
    #[must_use]
    pub fn records(&self) -> &[FileRecord] {
        &self.records
    }

    /// Summary of [`Self::records`].
    #[must_use]
    pub fn summary(&self) -> &CatalogSummary {
        &self.summary
    }

    /// Fetch lifecycle.
    #[must_use]
    pub fn state(&self) -> &LoadState {
        &self.state
    }

    /// Query of the newest issued request.
    #[must_use]
    pub fn query(&self) -> Option<&QueryDescriptor> {
        self.query.as_ref()
    }

    /// Query that produced the displayed records.
    #[must_use]
    pub fn loaded_query(&self) -> Option<&QueryDescriptor> {
        self.loaded_query.as_ref()
    }
}
