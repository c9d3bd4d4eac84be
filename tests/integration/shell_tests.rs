use super::support::{record, FakeCatalog};
use filehub::catalog::LoadState;
use filehub::filters::FilterField;
use filehub::session::CatalogSession;
use filehub::shell::Shell;
use std::io::Cursor;
use std::sync::Arc;

fn run_script(api: Arc<FakeCatalog>, script: &str) -> (String, Vec<String>) {
    let session = CatalogSession::new(Arc::clone(&api));
    let mut output = Vec::new();
    let mut shell = Shell::new(session, Cursor::new(script.to_string()), &mut output).with_color(false);
    shell.run().unwrap();
    let active = shell.session().engine().active_filters().names().iter().map(|s| s.to_string()).collect();
    drop(shell);
    (String::from_utf8(output).unwrap(), active)
}

#[test]
fn test_shell_initial_listing_and_quit() {
    let api = Arc::new(FakeCatalog::new(vec![record("a", 1024, 1, 0)]));
    let (out, active) = run_script(Arc::clone(&api), "quit\n");

    assert!(out.contains("Total Files       1"));
    assert!(out.contains("Filters: none"));
    assert!(out.contains("filehub> "));
    assert!(active.is_empty());
    assert_eq!(api.query_count(), 1);
}

#[test]
fn test_set_does_not_fetch_until_apply() {
    let api = Arc::new(FakeCatalog::new(vec![record("a", 10, 1, 0)]));
    let (out, active) = run_script(
        Arc::clone(&api),
        "set search annual report\nset min_size 2\nset min_unit KB\napply\n",
    );

    assert_eq!(api.query_count(), 2);
    let queries = api.queries.lock().unwrap();
    assert_eq!(queries[1].search.as_deref(), Some("annual report"));
    assert_eq!(queries[1].min_size, Some(2048));
    assert!(out.contains("[Search: annual report]"));
    assert!(out.contains("[Min Size: 2.0 KiB]"));
    assert_eq!(active, vec!["search", "min_size"]);
}

#[test]
fn test_sort_and_unset_fetch() {
    let api = Arc::new(FakeCatalog::new(vec![record("a", 10, 1, 0)]));
    let (out, active) = run_script(
        Arc::clone(&api),
        "set type text/plain\napply\nsort size\nsort size\nunset type\n",
    );

    let queries = api.queries.lock().unwrap();
    let orderings: Vec<&str> = queries.iter().map(|q| q.ordering.as_str()).collect();
    assert_eq!(
        orderings,
        vec!["-uploaded_at", "-uploaded_at", "-size", "size", "size"]
    );
    assert_eq!(queries.last().unwrap().file_type, None);
    assert!(out.contains("Ordering: size"));
    assert!(active.is_empty());
}

#[test]
fn test_clear_resets_everything() {
    let api = Arc::new(FakeCatalog::new(Vec::new()));
    let (out, active) = run_script(Arc::clone(&api), "set q x\nsort name\nclear\nshow\n");

    assert!(active.is_empty());
    assert!(out.contains("(all filters at defaults)"));
    assert!(out.contains("No files found."));
    let queries = api.queries.lock().unwrap();
    assert_eq!(queries.last().unwrap().ordering, "-uploaded_at");
    assert_eq!(queries.last().unwrap().search, None);
}

#[test]
fn test_delete_and_types() {
    let api = Arc::new(FakeCatalog::new(vec![
        record("a", 1000, 1, 0),
        record("b", 2000, 3, 4000),
    ]));
    let (out, _) = run_script(Arc::clone(&api), "types\ndelete b\ndelete b\n");

    assert!(out.contains("  text/plain"));
    assert!(out.contains("Deleted b"));
    assert!(out.contains("error: catalog returned HTTP 404: Not found."));
    assert_eq!(api.records.lock().unwrap().len(), 1);
}

#[test]
fn test_errors_do_not_end_session() {
    let api = Arc::new(FakeCatalog::new(Vec::new()));
    let (out, _) = run_script(Arc::clone(&api), "frobnicate\nset colour red\nsort owner\nhelp\n");

    assert!(out.contains("error: unknown command 'frobnicate'"));
    assert!(out.contains("error: unknown filter field 'colour'"));
    assert!(out.contains("error: unknown sort field 'owner'"));
    assert!(out.contains("Commands:"));
}

#[test]
fn test_show_lists_edited_fields() {
    let api = Arc::new(FakeCatalog::new(Vec::new()));
    let (out, _) = run_script(Arc::clone(&api), "set max_size 5\nset max_unit GB\n");

    assert!(out.contains(&format!("  {:<16} 5", FilterField::MaxSize.name())));
    assert!(out.contains(&format!("  {:<16} GB", FilterField::MaxSizeUnit.name())));
}

#[test]
fn test_failed_fetch_is_reported_with_previous_results() {
    let api = Arc::new(FakeCatalog::new(vec![record("a", 10, 1, 0)]));
    let session = CatalogSession::new(Arc::clone(&api));
    let mut output = Vec::new();
    let mut shell = Shell::new(session, Cursor::new("refresh\n".to_string()), &mut output)
        .with_color(false);

    // Let the initial load succeed, then make the backend fail
    shell.execute(filehub::shell::ShellCommand::Apply).unwrap();
    *api.fail_with.lock().unwrap() = Some(500);
    shell.run().unwrap();
    let state = shell.session().view().state().clone();
    drop(shell);

    let out = String::from_utf8(output).unwrap();
    assert!(matches!(state, LoadState::Failed(_)));
    assert!(out.contains("error: catalog returned HTTP 500: backend down"));
    assert!(out.contains("(showing previous results)"));
    assert!(out.contains("Total Files       1"));
}
