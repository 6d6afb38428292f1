// Test helper functions

use memdex::core::config::{Config, StorageConfig};
use memdex::core::services::Services;
use memdex::core::storage::ItemStore;
use memdex::core::types::{Item, ItemInput, TagSet};
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;

/// Config pointing at a store inside `root`, with the smallest writer heap
#[allow(dead_code)] // Used in integration tests
pub fn test_config(root: &Path) -> Config {
    let mut config = Config::default();
    config.storage.store_dir = root.join("store");
    config.storage.writer_heap_mb = 15;
    config
}

/// Create test services over a temporary store
///
/// Keep the returned `TempDir` alive for the duration of the test.
#[allow(dead_code)] // Used in integration tests
pub fn create_test_services() -> (Arc<Services>, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let services = Services::open(test_config(temp_dir.path())).expect("Failed to open store");
    (Arc::new(services), temp_dir)
}

/// Open a bare store inside `root`
#[allow(dead_code)] // Used in integration tests
pub fn open_store(root: &Path) -> ItemStore {
    ItemStore::open(&storage_config(root)).expect("Failed to open store")
}

/// Close `store` and open the same directory again
#[allow(dead_code)] // Used in integration tests
pub fn reopen_store(store: ItemStore, root: &Path) -> ItemStore {
    store.close().expect("Failed to close store");
    drop(store);
    open_store(root)
}

/// Store a note with string tags
#[allow(dead_code)] // Used in integration tests
pub fn store_note(store: &ItemStore, id: &str, title: &str, content: &str, tags: &[&str]) -> Item {
    store
        .store(ItemInput::new(id, title, content, TagSet::new(tags)))
        .expect("Failed to store note")
}

fn storage_config(root: &Path) -> StorageConfig {
    test_config(root).storage
}
