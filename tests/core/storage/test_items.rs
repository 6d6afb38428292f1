// Integration tests for single-item store operations

use crate::common::{open_store, store_note};
use memdex::core::error::MemdexError;
use memdex::core::types::{ItemInput, TagSet};
use tempfile::TempDir;

#[test]
fn test_store_then_retrieve_round_trip() {
    let temp = TempDir::new().unwrap();
    let store = open_store(temp.path());

    let stored = store_note(&store, "x", "T", "hello world", &["a", "b"]);
    let fetched = store.retrieve(&stored.id).unwrap().expect("item should exist");

    assert_eq!(fetched.title, "T");
    assert_eq!(fetched.content, "hello world");
    assert_eq!(fetched.tags, TagSet::new(["b", "a"]));
    assert_eq!(fetched.created_at, fetched.updated_at);
}

#[test]
fn test_restore_preserves_created_and_advances_updated() {
    let temp = TempDir::new().unwrap();
    let store = open_store(temp.path());

    let first = store_note(&store, "x", "v1", "", &[]);
    let second = store_note(&store, "x", "v2", "", &["new"]);

    assert_eq!(second.created_at, first.created_at);
    assert!(second.updated_at > first.updated_at);
    assert_eq!(store.get_stats().unwrap().item_count, 1);
}

#[test]
fn test_delete_never_stored_returns_false() {
    let temp = TempDir::new().unwrap();
    let store = open_store(temp.path());

    assert!(!store.delete("ghost").unwrap());
    assert!(store.retrieve("ghost").unwrap().is_none());
}

#[test]
fn test_delete_removes_from_retrieve_list_and_search() {
    let temp = TempDir::new().unwrap();
    let store = open_store(temp.path());
    store_note(&store, "x", "Gone", "ephemeral words", &["tmp"]);

    assert!(store.delete("x").unwrap());

    assert!(store.retrieve("x").unwrap().is_none());
    assert!(store.list(10, 0).unwrap().is_empty());
    assert!(store.get_tags().unwrap().is_empty());
}

#[test]
fn test_list_newest_first_with_offset() {
    let temp = TempDir::new().unwrap();
    let store = open_store(temp.path());
    store_note(&store, "a", "A", "", &[]);
    store_note(&store, "b", "B", "", &[]);
    store_note(&store, "c", "C", "", &[]);

    let first = store.list(1, 0).unwrap();
    assert_eq!(first.len(), 1);
    assert_eq!(first[0].id, "c");

    let ids: Vec<String> = store.list(10, 1).unwrap().into_iter().map(|i| i.id).collect();
    assert_eq!(ids, vec!["b", "a"]);

    assert!(store.list(10, 3).unwrap().is_empty());
}

#[test]
fn test_update_moves_item_to_front() {
    let temp = TempDir::new().unwrap();
    let store = open_store(temp.path());
    store_note(&store, "a", "A", "", &[]);
    store_note(&store, "b", "B", "", &[]);
    store_note(&store, "a", "A2", "", &[]);

    let ids: Vec<String> = store.list(10, 0).unwrap().into_iter().map(|i| i.id).collect();
    assert_eq!(ids, vec!["a", "b"]);
}

#[test]
fn test_tags_are_normalized_and_distinct() {
    let temp = TempDir::new().unwrap();
    let store = open_store(temp.path());
    store_note(&store, "a", "A", "", &[" rust ", "rust", ""]);
    store_note(&store, "b", "B", "", &["async", "rust"]);

    assert_eq!(store.get_tags().unwrap(), vec!["async", "rust"]);

    let stats = store.get_stats().unwrap();
    assert_eq!(stats.item_count, 2);
    assert_eq!(stats.tag_count, 2);
    assert!(stats.size_on_disk > 0);
}

#[test]
fn test_invalid_items_are_rejected_before_writing() {
    let temp = TempDir::new().unwrap();
    let store = open_store(temp.path());

    let cases = [
        ItemInput::new("", "T", "", TagSet::default()),
        ItemInput::new("   ", "T", "", TagSet::default()),
        ItemInput::new("id\nwith-newline", "T", "", TagSet::default()),
        ItemInput::new("x".repeat(300), "T", "", TagSet::default()),
        ItemInput::new("ok", "  ", "", TagSet::default()),
    ];

    for input in cases {
        let result = store.store(input);
        assert!(
            matches!(result, Err(MemdexError::InvalidItem(_))),
            "expected InvalidItem, got {result:?}"
        );
    }
    assert_eq!(store.get_stats().unwrap().item_count, 0);
}

#[test]
fn test_unicode_content_survives() {
    let temp = TempDir::new().unwrap();
    let store = open_store(temp.path());
    store_note(&store, "日本", "Notes 👋", "Rust 🦀 と 日本語", &["émoji"]);

    let item = store.retrieve("日本").unwrap().unwrap();
    assert_eq!(item.title, "Notes 👋");
    assert_eq!(item.content, "Rust 🦀 と 日本語");
    assert_eq!(item.tags.to_vec(), vec!["émoji".to_string()]);
}
