use chrono::{TimeZone, Utc};
use filehub::catalog::{CatalogApi, CatalogError, CatalogResult, FileRecord};
use filehub::filters::QueryDescriptor;
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Mutex;

pub fn record(id: &str, size: u64, refs: u32, savings: i64) -> FileRecord {
    FileRecord {
        id: id.to_string(),
        original_filename: format!("{id}.txt"),
        file_type: "text/plain".to_string(),
        size,
        uploaded_at: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
        download_url: format!("http://localhost:8000/media/uploads/{id}.txt"),
        content_hash: format!("{id:0>64}"),
        reference_count: refs,
        storage_savings: Some(savings),
    }
}

/// In-memory catalog with optional gating of one ordering.
///
/// Listings return the stored records, tagging the first one's id with the
/// ordering so tests can tell which request produced a view.
pub struct FakeCatalog {
    pub records: Mutex<Vec<FileRecord>>,
    pub queries: Mutex<Vec<QueryDescriptor>>,
    pub fail_with: Mutex<Option<u16>>,
    gated_ordering: Option<String>,
    gate: Mutex<Receiver<()>>,
}

impl FakeCatalog {
    pub fn new(records: Vec<FileRecord>) -> Self {
        let (_tx, rx) = mpsc::channel();
        Self {
            records: Mutex::new(records),
            queries: Mutex::new(Vec::new()),
            fail_with: Mutex::new(None),
            gated_ordering: None,
            gate: Mutex::new(rx),
        }
    }

    /// Requests with `ordering` block until the returned sender is used.
    pub fn gated(records: Vec<FileRecord>, ordering: &str) -> (Self, Sender<()>) {
        let (tx, rx) = mpsc::channel();
        let mut fake = Self::new(records);
        fake.gated_ordering = Some(ordering.to_string());
        fake.gate = Mutex::new(rx);
        (fake, tx)
    }

    pub fn query_count(&self) -> usize {
        self.queries.lock().unwrap().len()
    }
}

impl CatalogApi for FakeCatalog {
    fn list_files(&self, query: &QueryDescriptor) -> CatalogResult<Vec<FileRecord>> {
        self.queries.lock().unwrap().push(query.clone());
        if self.gated_ordering.as_deref() == Some(query.ordering.as_str()) {
            let _ = self.gate.lock().unwrap().recv();
        }
        if let Some(status) = *self.fail_with.lock().unwrap() {
            return Err(CatalogError::Status {
                status,
                body: "backend down".to_string(),
            });
        }
        let mut records = self.records.lock().unwrap().clone();
        if let Some(first) = records.first_mut() {
            first.id = query.ordering.clone();
        }
        Ok(records)
    }

    fn file_types(&self) -> CatalogResult<Vec<String>> {
        let mut types: Vec<String> = self
            .records
            .lock()
            .unwrap()
            .iter()
            .map(|r| r.file_type.clone())
            .collect();
        types.sort();
        types.dedup();
        Ok(types)
    }

    fn delete_file(&self, id: &str) -> CatalogResult<()> {
        let mut records = self.records.lock().unwrap();
        let before = records.len();
        records.retain(|r| r.original_filename != format!("{id}.txt"));
        if records.len() == before {
            return Err(CatalogError::Status {
                status: 404,
                body: "Not found.".to_string(),
            });
        }
        Ok(())
    }
}
