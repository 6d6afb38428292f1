// Medium failure handling: the store latches and refuses further work

use crate::common::{open_store, store_note};
use memdex::core::error::MemdexError;
use memdex::core::types::{ItemInput, TagSet};
use tempfile::TempDir;

#[test]
fn test_commit_failure_marks_store_failed() {
    let temp = TempDir::new().unwrap();
    let store = open_store(temp.path());
    store_note(&store, "kept", "Kept", "before the failure", &[]);

    std::fs::remove_dir_all(store.path()).unwrap();

    let err = store
        .store(ItemInput::new("lost", "Lost", "", TagSet::default()))
        .unwrap_err();
    assert!(err.is_fatal(), "unexpected error: {err}");
    assert!(store.is_failed());

    assert!(matches!(
        store.retrieve("kept"),
        Err(MemdexError::StoreUnavailable(_))
    ));
    assert!(matches!(
        store.list(10, 0),
        Err(MemdexError::StoreUnavailable(_))
    ));
}

#[test]
fn test_bad_request_does_not_mark_failed() {
    let temp = TempDir::new().unwrap();
    let store = open_store(temp.path());

    let err = store
        .store(ItemInput::new("", "Untitled", "", TagSet::default()))
        .unwrap_err();
    assert!(err.is_bad_request());
    assert!(!store.is_failed());
    assert!(store.retrieve("anything").unwrap().is_none());
}
