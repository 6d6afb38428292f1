// Integration tests for persistence, lifecycle and maintenance

use crate::common::{open_store, reopen_store, store_note, NoteSet};
use memdex::core::error::MemdexError;
use memdex::core::storage::StoreValidator;
use tempfile::TempDir;

#[test]
fn test_items_survive_reopen() {
    let temp = TempDir::new().unwrap();
    let store = open_store(temp.path());
    let stored = store_note(&store, "x", "Persisted", "body", &["t"]);

    let store = reopen_store(store, temp.path());

    let item = store.retrieve("x").unwrap().unwrap();
    assert_eq!(item, stored);
}

#[test]
fn test_timestamps_stay_monotonic_across_reopen() {
    let temp = TempDir::new().unwrap();
    let store = open_store(temp.path());
    let before = store_note(&store, "a", "A", "", &[]);

    let store = reopen_store(store, temp.path());
    let after = store_note(&store, "b", "B", "", &[]);

    assert!(after.updated_at > before.updated_at);
    assert_eq!(store.list(1, 0).unwrap()[0].id, "b");
}

#[test]
fn test_closed_store_refuses_writes_but_reads() {
    let temp = TempDir::new().unwrap();
    let store = open_store(temp.path());
    store_note(&store, "x", "X", "", &[]);

    store.close().unwrap();
    store.close().unwrap();

    assert!(matches!(
        store.delete("x"),
        Err(MemdexError::StoreUnavailable(_))
    ));
    assert!(store.retrieve("x").unwrap().is_some());
}

#[test]
fn test_optimize_compacts_without_changing_contents() {
    let temp = TempDir::new().unwrap();
    let store = open_store(temp.path());
    for item in NoteSet::generate(6) {
        store.store(item).unwrap();
    }
    store.delete("note-0003").unwrap();
    let listed_before = store.list(10, 0).unwrap();

    let report = store.optimize().unwrap();

    assert!(report.segments_before > 1);
    assert_eq!(report.segments_after, 1);
    assert_eq!(store.list(10, 0).unwrap(), listed_before);
    assert_eq!(store.get_stats().unwrap().item_count, 5);

    // Still writable afterwards
    store_note(&store, "after", "After", "", &[]);
    assert_eq!(store.list(1, 0).unwrap()[0].id, "after");
}

#[test]
fn test_validator_reports_consistent_store() {
    let temp = TempDir::new().unwrap();
    let store = open_store(temp.path());
    store.store_batch(NoteSet::generate(4)).unwrap();
    store_note(&store, "note-0001", "Replaced", "", &[]);

    let report = StoreValidator::new(&store).validate().unwrap();
    assert!(report.is_consistent);
    assert_eq!(report.documents, 4);
    assert!(report.duplicate_ids.is_empty());
}
