// Integration tests for atomic batch writes

use crate::common::{open_store, sample_items, store_note, NoteSet};
use memdex::core::error::MemdexError;
use memdex::core::types::{ItemInput, TagSet};
use tempfile::TempDir;

#[test]
fn test_batch_items_share_updated_at() {
    let temp = TempDir::new().unwrap();
    let store = open_store(temp.path());

    let stored = store.store_batch(sample_items()).unwrap();
    assert_eq!(stored.len(), 5);

    let a = store.retrieve("deploy-checklist").unwrap().unwrap();
    let b = store.retrieve("reading-list").unwrap().unwrap();
    assert_eq!(a.updated_at, b.updated_at);
}

#[test]
fn test_batch_with_invalid_item_stores_nothing() {
    let temp = TempDir::new().unwrap();
    let store = open_store(temp.path());

    let batch = vec![
        ItemInput::new("1", "One", "", TagSet::default()),
        ItemInput::new("2", "", "", TagSet::default()),
    ];

    match store.store_batch(batch) {
        Err(MemdexError::InvalidItem(msg)) => assert!(msg.starts_with("item 1:"), "{msg}"),
        other => panic!("expected InvalidItem, got {other:?}"),
    }
    assert!(store.retrieve("1").unwrap().is_none());
    assert!(store.retrieve("2").unwrap().is_none());
}

#[test]
fn test_batch_preserves_created_at_of_existing_items() {
    let temp = TempDir::new().unwrap();
    let store = open_store(temp.path());
    let original = store_note(&store, "keep", "Old", "", &[]);

    store
        .store_batch(vec![
            ItemInput::new("keep", "New", "", TagSet::default()),
            ItemInput::new("fresh", "Fresh", "", TagSet::default()),
        ])
        .unwrap();

    let updated = store.retrieve("keep").unwrap().unwrap();
    assert_eq!(updated.created_at, original.created_at);
    assert!(updated.updated_at > original.updated_at);
    assert_eq!(updated.title, "New");
}

#[test]
fn test_batch_repeated_id_last_wins() {
    let temp = TempDir::new().unwrap();
    let store = open_store(temp.path());

    store
        .store_batch(vec![
            ItemInput::new("dup", "First", "", TagSet::default()),
            ItemInput::new("dup", "Second", "", TagSet::default()),
        ])
        .unwrap();

    assert_eq!(store.retrieve("dup").unwrap().unwrap().title, "Second");
    assert_eq!(store.get_stats().unwrap().item_count, 1);
}

#[test]
fn test_batch_keeps_input_order_for_equal_timestamps() {
    let temp = TempDir::new().unwrap();
    let store = open_store(temp.path());
    store.store_batch(NoteSet::generate(3)).unwrap();

    // Same updated_at: ties follow insertion order
    let ids: Vec<String> = store.list(3, 0).unwrap().into_iter().map(|i| i.id).collect();
    assert_eq!(ids, vec!["note-0000", "note-0001", "note-0002"]);
}

#[test]
fn test_empty_batch_is_a_no_op() {
    let temp = TempDir::new().unwrap();
    let store = open_store(temp.path());

    assert!(store.store_batch(Vec::new()).unwrap().is_empty());
    assert_eq!(store.get_stats().unwrap().item_count, 0);
}
