// Common test utilities and fixtures

pub mod fixtures;
pub mod helpers;

// Re-export commonly used items
// Note: These may appear unused in some test binaries but are used in others
#[allow(unused_imports)]
pub use fixtures::{sample_items, NoteSet};
#[allow(unused_imports)]
pub use helpers::{create_test_services, open_store, reopen_store, store_note, test_config};
