use super::support::{record, FakeCatalog};
use filehub::error::ExitCode;
use filehub::filters::{FilterAction, FilterField};
use filehub::output::{CsvOutput, JsonOutput, TableOutput};
use filehub::session::CatalogSession;
use std::sync::Arc;

fn loaded_session() -> CatalogSession<FakeCatalog> {
    let api = Arc::new(FakeCatalog::new(vec![
        record("a", 1000, 1, 0),
        record("b", 2000, 3, 4000),
    ]));
    let mut session = CatalogSession::new(api);
    session.apply(FilterAction::Update(FilterField::MaxSize, "1".into()));
    session.apply(FilterAction::Update(FilterField::MaxSizeUnit, "GB".into()));
    session.apply(FilterAction::Submit);
    session.wait();
    session
}

#[test]
fn test_json_listing_document() {
    let session = loaded_session();
    let view = session.view();
    let output = JsonOutput::new(view, session.engine().active_filters(), ExitCode::for_listing(view.summary()));

    let mut buffer = Vec::new();
    output.write_to(&mut buffer, true).unwrap();
    let parsed: serde_json::Value = serde_json::from_slice(&buffer).unwrap();

    assert_eq!(parsed["query"]["max_size"], 1_073_741_824u64);
    assert_eq!(parsed["query"]["ordering"], "-uploaded_at");
    assert_eq!(parsed["active_filters"], serde_json::json!(["max_size"]));
    assert_eq!(parsed["summary"]["total_files"], 2);
    assert_eq!(parsed["summary"]["unique_files"], 1);
    assert_eq!(parsed["summary"]["duplicated_files"], 1);
    assert_eq!(parsed["summary"]["total_storage_savings"], 4000);
    assert_eq!(parsed["summary"]["exit_code_name"], "FH000");
    assert_eq!(parsed["files"].as_array().unwrap().len(), 2);
}

#[test]
fn test_csv_listing() {
    let session = loaded_session();
    let csv = CsvOutput::new(session.view().records()).to_string().unwrap();
    assert_eq!(csv.lines().count(), 3);
    assert!(csv.lines().nth(2).unwrap().starts_with("b,b.txt,text/plain,2000,"));
}

#[test]
fn test_table_listing() {
    let session = loaded_session();
    let view = session.view();
    let text = TableOutput::new(
        view.records(),
        view.summary(),
        view.loaded_query(),
        session.engine().active_filters(),
    )
    .with_color(false)
    .render();

    assert!(text.contains("Storage Savings   3.9 KiB"));
    assert!(text.contains("[Max Size: 1.0 GiB]"));
    assert!(text.contains("Ordering: -uploaded_at"));
    assert!(text.contains("3 references"));
    assert!(text.contains("Unique"));
}
