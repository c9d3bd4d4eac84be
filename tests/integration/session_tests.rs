use super::support::{record, FakeCatalog};
use filehub::catalog::{CatalogApi, CatalogResult, FileRecord, LoadState};
use filehub::filters::{FilterAction, FilterEngine, FilterField, QueryDescriptor, SortKey};
use filehub::session::CatalogSession;
use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

fn drain(session: &mut CatalogSession<FakeCatalog>) -> usize {
    let deadline = Instant::now() + Duration::from_secs(5);
    let mut applied = 0;
    while session.in_flight() > 0 {
        assert!(Instant::now() < deadline, "worker never reported back");
        applied += session.poll();
        thread::sleep(Duration::from_millis(5));
    }
    applied
}

#[test]
fn test_listing_summary_matches_records() {
    let api = Arc::new(FakeCatalog::new(vec![
        record("a", 1000, 1, 0),
        record("b", 2000, 3, 4000),
    ]));
    let mut session = CatalogSession::new(Arc::clone(&api));
    session.load();

    let view = session.wait();
    assert_eq!(view.state(), &LoadState::Loaded);
    assert_eq!(view.summary().total_files, 2);
    assert_eq!(view.summary().unique_files, 1);
    assert_eq!(view.summary().duplicated_files, 1);
    assert_eq!(view.summary().total_storage_savings, 4000);
}

#[test]
fn test_slow_superseded_response_is_discarded() {
    let (fake, release) = FakeCatalog::gated(vec![record("a", 10, 1, 0)], "-size");
    let api = Arc::new(fake);
    let mut session = CatalogSession::new(Arc::clone(&api));

    // First request blocks in the backend; the second answers at once
    let slow = session.apply(FilterAction::ToggleSort(SortKey::Size)).unwrap();
    let fast = session.apply(FilterAction::ToggleSort(SortKey::Name)).unwrap();
    assert!(fast > slow);

    let view = session.wait();
    assert_eq!(view.records()[0].id, "-original_filename");

    release.send(()).unwrap();
    assert_eq!(drain(&mut session), 0);

    let view = session.view();
    assert_eq!(view.records()[0].id, "-original_filename");
    assert_eq!(view.loaded_query().unwrap().ordering, "-original_filename");
    assert_eq!(view.latest_generation(), fast);
}

#[test]
fn test_rapid_toggles_settle_on_last() {
    let api = Arc::new(FakeCatalog::new(vec![record("a", 10, 1, 0)]));
    let mut session = CatalogSession::new(Arc::clone(&api));

    for _ in 0..5 {
        session.apply(FilterAction::ToggleSort(SortKey::Size));
    }
    session.wait();
    drain(&mut session);

    // Five toggles from a fresh engine: desc, asc, desc, asc, desc
    assert_eq!(session.view().loaded_query().unwrap().ordering, "-size");
    assert_eq!(api.query_count(), 5);
}

#[test]
fn test_failure_keeps_previous_listing() {
    let api = Arc::new(FakeCatalog::new(vec![record("a", 10, 2, 10)]));
    let mut session = CatalogSession::new(Arc::clone(&api));
    session.load();
    session.wait();

    *api.fail_with.lock().unwrap() = Some(502);
    session.apply(FilterAction::ToggleSort(SortKey::Size));
    let view = session.wait();

    assert_eq!(
        view.state().error(),
        Some("catalog returned HTTP 502: backend down")
    );
    assert_eq!(view.records().len(), 1);
    assert_eq!(view.summary().total_storage_savings, 10);
    assert_eq!(view.loaded_query().unwrap().ordering, "-uploaded_at");
}

#[test]
fn test_delete_recomputes_summary() {
    let api = Arc::new(FakeCatalog::new(vec![
        record("a", 1000, 1, 0),
        record("b", 2000, 3, 4000),
    ]));
    let mut session = CatalogSession::new(Arc::clone(&api));
    session.apply(FilterAction::Update(FilterField::Search, "txt".into()));
    session.apply(FilterAction::Submit);
    session.wait();

    session.delete("b").unwrap();
    let view = session.wait();

    assert_eq!(view.summary().total_files, 1);
    assert_eq!(view.summary().duplicated_files, 0);
    assert_eq!(view.summary().total_storage_savings, 0);
    let queries = api.queries.lock().unwrap();
    assert_eq!(queries.last().unwrap().search.as_deref(), Some("txt"));
}

#[test]
fn test_delete_unknown_id_leaves_view_alone() {
    let api = Arc::new(FakeCatalog::new(vec![record("a", 10, 1, 0)]));
    let mut session = CatalogSession::new(Arc::clone(&api));
    session.load();
    session.wait();

    assert!(session.delete("zzz").is_err());
    assert_eq!(session.view().latest_generation(), 1);
    assert_eq!(api.query_count(), 1);
}

#[test]
fn test_listener_sees_every_emitted_query() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    let engine = FilterEngine::with_listener(move |query| {
        sink.lock().unwrap().push(query.ordering.clone());
    });

    let api = Arc::new(FakeCatalog::new(Vec::new()));
    let mut session = CatalogSession::with_engine(api, engine);
    session.apply(FilterAction::Update(FilterField::FileType, "image/png".into()));
    session.apply(FilterAction::ToggleSort(SortKey::FileType));
    session.apply(FilterAction::Remove(FilterField::FileType));
    session.apply(FilterAction::ClearAll);
    session.wait();

    assert_eq!(
        *seen.lock().unwrap(),
        vec!["-file_type", "-file_type", "-uploaded_at"]
    );
}

#[test]
fn test_empty_listing_is_all_zero() {
    let mut session = CatalogSession::new(Arc::new(FakeCatalog::new(Vec::new())));
    session.load();
    let view = session.wait();
    assert!(view.summary().is_empty());
    assert_eq!(view.summary().total_storage_savings, 0);
}

/// Serves the fake listing until a search for "boom" crashes the backend call.
struct CrashingCatalog(FakeCatalog);

impl CatalogApi for CrashingCatalog {
    fn list_files(&self, query: &QueryDescriptor) -> CatalogResult<Vec<FileRecord>> {
        if query.search.as_deref() == Some("boom") {
            panic!("backend adapter crashed");
        }
        self.0.list_files(query)
    }

    fn file_types(&self) -> CatalogResult<Vec<String>> {
        self.0.file_types()
    }

    fn delete_file(&self, id: &str) -> CatalogResult<()> {
        self.0.delete_file(id)
    }
}

#[test]
fn test_panicking_fetch_settles_as_failure() {
    let api = Arc::new(CrashingCatalog(FakeCatalog::new(vec![record("a", 10, 3, 20)])));
    let mut session = CatalogSession::new(api);
    session.load();
    session.wait();
    session.apply(FilterAction::Update(FilterField::Search, "boom".into()));
    session.apply(FilterAction::Submit);

    // Wait on another thread so a hang fails the test instead of stalling it
    let (done_tx, done_rx) = mpsc::channel();
    thread::spawn(move || {
        session.wait();
        let _ = done_tx.send(session);
    });
    let session = done_rx
        .recv_timeout(Duration::from_secs(5))
        .expect("wait() did not return after the worker panicked");

    let view = session.view();
    let message = view.state().error().expect("view should be failed");
    assert!(message.contains("fetch worker crashed"), "{message}");
    assert!(message.contains("backend adapter crashed"), "{message}");
    assert_eq!(session.in_flight(), 0);
    // Previous listing stays on screen
    assert_eq!(view.records().len(), 1);
    assert_eq!(view.summary().total_storage_savings, 20);
}
