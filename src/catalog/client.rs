//! Catalog API client.
//!
//! # Overview
//!
//! [`CatalogApi`] is the seam between the view-model and the storage backend.
//! [`HttpCatalog`] talks to the backend's REST endpoints:
//!
//! | Operation      | Request                                 |
//! |----------------|-----------------------------------------|
//! | list files     | `GET  {base}/api/files/?<query>`        |
//! | file types     | `GET  {base}/api/files/file_types/`     |
//! | delete file    | `DELETE {base}/api/files/{id}/`         |
//!
//! Requests are issued once. Retry policy belongs to whoever calls them.
//!
//! # Example
//!
//! ```no_run
//! use filehub::catalog::{CatalogApi, HttpCatalog};
//! use filehub::filters::QueryDescriptor;
//! use std::time::Duration;
//!
//! let api = HttpCatalog::new("http://localhost:8000", Duration::from_secs(10)).unwrap();
//! let files = api.list_files(&QueryDescriptor::default()).unwrap();
//! println!("{} files", files.len());
//! ```

use std::time::Duration;

use reqwest::blocking::{Client, Response};
use reqwest::Url;
use thiserror::Error;

use super::record::FileRecord;
use crate::filters::QueryDescriptor;

/// Errors returned by catalog API calls.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The base URL could not be parsed or joined.
    #[error("invalid catalog URL '{url}': {reason}")]
    InvalidUrl {
        /// URL as given
        url: String,
        /// Parser message
        reason: String,
    },

    /// The request failed before a response was received, or the body could
    /// not be decoded.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The fetch worker panicked before producing a result.
    #[error("fetch worker crashed: {0}")]
    Worker(String),

    /// The backend answered with a non-success status.
    #[error("catalog returned HTTP {status}: {body}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Response body, possibly empty
        body: String,
    },
}

/// Result type for catalog API calls.
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Operations the view-model needs from the storage backend.
///
/// Implementations must be shareable across fetch threads.
pub trait CatalogApi: Send + Sync {
    /// List the records matching `query`, in the order it requests.
    fn list_files(&self, query: &QueryDescriptor) -> CatalogResult<Vec<FileRecord>>;

    /// Distinct file types currently in storage.
    fn file_types(&self) -> CatalogResult<Vec<String>>;

    /// Delete one record.
    fn delete_file(&self, id: &str) -> CatalogResult<()>;
}

/// HTTP implementation of [`CatalogApi`].
#[derive(Debug, Clone)]
pub struct HttpCatalog {
    base: Url,
    client: Client,
}

impl HttpCatalog {
    /// Create a client for the backend at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::InvalidUrl`] if the URL does not parse and
    /// [`CatalogError::Transport`] if the HTTP client cannot be built.
    pub fn new(base_url: &str, timeout: Duration) -> CatalogResult<Self> {
        let base = normalize_base(base_url)?;
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("filehub/", env!("CARGO_PKG_VERSION")))
            .build()?;
        log::debug!("Catalog client for {} (timeout {:?})", base, timeout);
        Ok(Self { base, client })
    }

    /// Base URL all endpoints are resolved against.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// Resolve an endpoint path against the base URL.
    fn endpoint(&self, path: &str) -> CatalogResult<Url> {
        self.base.join(path).map_err(|e| CatalogError::InvalidUrl {
            url: format!("{}{}", self.base, path),
            reason: e.to_string(),
        })
    }
}

impl CatalogApi for HttpCatalog {
    fn list_files(&self, query: &QueryDescriptor) -> CatalogResult<Vec<FileRecord>> {
        let url = self.endpoint("api/files/")?;
        log::debug!("GET {} [{}]", url, query);
        let response = check_status(self.client.get(url).query(query).send()?)?;
        let files: Vec<FileRecord> = response.json()?;
        log::info!("Fetched {} file record(s)", files.len());
        Ok(files)
    }

    fn file_types(&self) -> CatalogResult<Vec<String>> {
        let url = self.endpoint("api/files/file_types/")?;
        log::debug!("GET {}", url);
        let response = check_status(self.client.get(url).send()?)?;
        let mut types: Vec<String> = response.json()?;
        types.sort();
        types.dedup();
        Ok(types)
    }

    fn delete_file(&self, id: &str) -> CatalogResult<()> {
        let url = self.endpoint(&format!("api/files/{id}/"))?;
        log::debug!("DELETE {}", url);
        check_status(self.client.delete(url).send()?)?;
        log::info!("Deleted file {}", id);
        Ok(())
    }
}

/// Parse a base URL, making sure it ends with `/` so joins append.
fn normalize_base(base_url: &str) -> CatalogResult<Url> {
    let trimmed = base_url.trim();
    let with_slash = if trimmed.ends_with('/') {
        trimmed.to_string()
    } else {
        format!("{trimmed}/")
    };
    Url::parse(&with_slash).map_err(|e| CatalogError::InvalidUrl {
        url: base_url.to_string(),
        reason: e.to_string(),
    })
}

fn check_status(response: Response) -> CatalogResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().unwrap_or_default();
    log::warn!("Catalog request failed with HTTP {}", status);
    Err(CatalogError::Status {
        status: status.as_u16(),
        body,
    })
}
