use std::sync::Arc;

use case_core::model::{CaseId, ProgressRecord, ProgressTable};
use storage::{JsonFileMedium, ProgressMedium, ProgressStore, PROGRESS_SLOT};

#[test]
fn missing_file_loads_empty_table() {
    let dir = tempfile::tempdir().unwrap();
    let medium = JsonFileMedium::in_dir(dir.path(), PROGRESS_SLOT);
    let store = ProgressStore::new(Arc::new(medium));
    assert!(store.load().is_empty());
}

#[test]
fn corrupt_file_loads_empty_table() {
    let dir = tempfile::tempdir().unwrap();
    let medium = JsonFileMedium::in_dir(dir.path(), PROGRESS_SLOT);
    medium.write_slot("not json").unwrap();

    let store = ProgressStore::new(Arc::new(medium));
    assert!(store.load().is_empty());
}

#[test]
fn table_survives_a_store_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("progress.json");

    {
        let store = ProgressStore::new(Arc::new(JsonFileMedium::new(&path)));
        store.record_case(&CaseId::new("c1"), ProgressRecord::new(2, 1, 42));
    }

    let reopened = ProgressStore::new(Arc::new(JsonFileMedium::new(&path)));
    let table = reopened.load();
    assert_eq!(
        table.record(&CaseId::new("c1")),
        Some(&ProgressRecord::new(2, 1, 42))
    );
}

#[test]
fn read_merge_write_keeps_records_from_other_sessions() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("progress.json");

    let first = ProgressStore::new(Arc::new(JsonFileMedium::new(&path)));
    first.record_case(&CaseId::new("earlier"), ProgressRecord::new(3, 3, 1));

    // A second session with its own (initially empty) in-memory view.
    let second = ProgressStore::new(Arc::new(JsonFileMedium::new(&path)));
    second.record_case(&CaseId::new("later"), ProgressRecord::new(1, 0, 2));

    let table = second.load();
    assert_eq!(table.cases.len(), 2);
    assert_eq!(
        table.record(&CaseId::new("earlier")),
        Some(&ProgressRecord::new(3, 3, 1))
    );
}

#[test]
fn writes_replace_the_slot_wholesale() {
    let dir = tempfile::tempdir().unwrap();
    let medium = JsonFileMedium::in_dir(dir.path(), PROGRESS_SLOT);

    let mut table = ProgressTable::new();
    table.set(&CaseId::new("c1"), ProgressRecord::new(1, 1, 0));
    let store = ProgressStore::new(Arc::new(medium.clone()));
    store.save(&table);

    let raw = medium.read_slot().unwrap().unwrap();
    let parsed: ProgressTable = serde_json::from_str(&raw).unwrap();
    assert_eq!(parsed, table);

    // No leftover temp file after the rename.
    let entries: Vec<_> = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name())
        .collect();
    assert_eq!(entries.len(), 1);
}
