//! Catalog session: filter engine, fetching and view state wired together.
//!
//! # Overview
//!
//! A [`CatalogSession`] is what a front end drives. Filter actions go to the
//! [`FilterEngine`]; whenever the engine emits a query, the session issues a
//! ticket on the [`CatalogView`] and runs the fetch on a worker thread. Worker
//! results come back over a channel and are delivered to the view, which
//! ignores any result that is no longer the newest.
//!
//! # Threading
//!
//! The session itself lives on one thread. Workers only call the API and send
//! the outcome back; they never touch filter or view state. A worker that
//! panics reports [`CatalogError::Worker`], so every fetch settles.
//!
//! # Example
//!
//! ```no_run
//! use filehub::catalog::HttpCatalog;
//! use filehub::filters::{FilterAction, FilterField, SortKey};
//! use filehub::session::CatalogSession;
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! let api = HttpCatalog::new("http://localhost:8000", Duration::from_secs(10)).unwrap();
//! let mut session = CatalogSession::new(Arc::new(api));
//!
//! session.apply(FilterAction::Update(FilterField::Search, "report".into()));
//! session.apply(FilterAction::Submit);
//! session.apply(FilterAction::ToggleSort(SortKey::Size));
//!
//! let view = session.wait();
//! println!("{} files, {} bytes saved", view.summary().total_files, view.summary().total_storage_savings);
//! ```

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::thread;

use crate::catalog::{
    CatalogApi, CatalogError, CatalogResult, CatalogView, Completion, FileRecord, RequestTicket,
};
use crate::filters::{FilterAction, FilterEngine, QueryDescriptor};

/// A finished fetch travelling back from a worker.
struct FetchOutcome {
    ticket: RequestTicket,
    result: CatalogResult<Vec<FileRecord>>,
}

/// Text of a panic payload, for reporting a crashed fetch.
fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}

/// Filter engine plus catalog view over a [`CatalogApi`].
pub struct CatalogSession<A: CatalogApi + 'static> {
    /// Filter controls
    engine: FilterEngine,
    /// Display state
    view: CatalogView,
    /// Backend
    api: Arc<A>,
    /// Cloned into each worker
    tx: Sender<FetchOutcome>,
    /// Worker results
    rx: Receiver<FetchOutcome>,
    /// Workers that have not reported back
    in_flight: usize,
}

impl<A: CatalogApi + 'static> CatalogSession<A> {
    /// Create a session with default filters and an idle view.
    #[must_use]
    pub fn new(api: Arc<A>) -> Self {
        Self::with_engine(api, FilterEngine::new())
    }

    /// Create a session around an existing engine.
    ///
    /// The engine's listener, if any, keeps receiving every emitted query.
    #[must_use]
    pub fn with_engine(api: Arc<A>, engine: FilterEngine) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            engine,
            view: CatalogView::new(),
            api,
            tx,
            rx,
            in_flight: 0,
        }
    }

    // ==================== State Access ====================

    /// Filter engine.
    #[must_use]
    pub fn engine(&self) -> &FilterEngine {
        &self.engine
    }

    /// Catalog view.
    #[must_use]
    pub fn view(&self) -> &CatalogView {
        &self.view
    }

    /// Number of fetches that have not reported back, stale ones included.
    #[must_use]
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    // ==================== Actions ====================

    /// Apply a filter action, fetching if it emitted a query.
    ///
    /// Returns the generation of the issued request, if any.
    pub fn apply(&mut self, action: FilterAction) -> Option<u64> {
        let query = self.engine.handle_action(action)?;
        Some(self.dispatch(query))
    }

    /// Submit the current filters and fetch.
    pub fn load(&mut self) -> u64 {
        let query = self.engine.submit();
        self.dispatch(query)
    }

    /// Fetch the newest query again, or submit if nothing was fetched yet.
    pub fn refresh(&mut self) -> u64 {
        match self.view.query().cloned() {
            Some(query) => self.dispatch(query),
            None => self.load(),
        }
    }

    /// Delete a record, then refresh so the summary is recomputed.
    ///
    /// # Errors
    ///
    /// Returns the API error if the delete fails; no refresh happens then.
    pub fn delete(&mut self, id: &str) -> CatalogResult<u64> {
        self.api.delete_file(id)?;
        Ok(self.refresh())
    }

    /// Distinct file types in storage, for populating a type selector.
    ///
    /// # Errors
    ///
    /// Returns the API error unchanged.
    pub fn file_types(&self) -> CatalogResult<Vec<String>> {
        self.api.file_types()
    }

    fn dispatch(&mut self, query: QueryDescriptor) -> u64 {
        let ticket = self.view.begin(query);
        let generation = ticket.generation();
        let api = Arc::clone(&self.api);
        let tx = self.tx.clone();

        self.in_flight += 1;
        thread::spawn(move || {
            let result = panic::catch_unwind(AssertUnwindSafe(|| api.list_files(ticket.query())))
                .unwrap_or_else(|payload| Err(CatalogError::Worker(panic_message(payload.as_ref()))));
            // The session may have been dropped; nothing to deliver to then.
            let _ = tx.send(FetchOutcome { ticket, result });
        });

        generation
    }

    // ==================== Delivery ====================

    fn deliver(&mut self, outcome: FetchOutcome) -> Completion {
        self.in_flight = self.in_flight.saturating_sub(1);
        self.view.complete(outcome.ticket, outcome.result)
    }

    /// Deliver every result that has already arrived, without blocking.
    ///
    /// Returns the number of results that updated the view.
    pub fn poll(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(outcome) = self.rx.try_recv() {
            if self.deliver(outcome) == Completion::Applied {
                applied += 1;
            }
        }
        applied
    }

    /// Block until the newest request has settled, then return the view.
    ///
    /// Older results arriving meanwhile are discarded.
    pub fn wait(&mut self) -> &CatalogView {
        while self.view.state().is_loading() {
            match self.rx.recv() {
                Ok(outcome) => {
                    self.deliver(outcome);
                }
                Err(_) => break,
            }
        }
        &self.view
    }
}
