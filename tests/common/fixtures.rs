// Test fixtures for integration testing

use memdex::core::types::{ItemInput, TagSet};

/// A small, realistic set of notes with overlapping vocabulary
#[allow(dead_code)] // Used in integration tests
pub fn sample_items() -> Vec<ItemInput> {
    vec![
        ItemInput::new(
            "deploy-checklist",
            "Deploy checklist",
            "Run database migrations before switching traffic. Verify health checks.",
            TagSet::new(["ops", "deploy"]),
        ),
        ItemInput::new(
            "rust-async",
            "Async Rust notes",
            "Tokio runtime basics: spawn tasks, use select for cancellation.",
            TagSet::new(["rust", "async"]),
        ),
        ItemInput::new(
            "rust-errors",
            "Error handling in Rust",
            "Use thiserror for library errors and propagate with the question mark operator.",
            TagSet::new(["rust"]),
        ),
        ItemInput::new(
            "db-backup",
            "Database backup",
            "Nightly backup of the primary database to object storage.",
            TagSet::new(["ops", "database"]),
        ),
        ItemInput::new(
            "reading-list",
            "Reading list",
            "Designing Data-Intensive Applications; The Rust Programming Language.",
            TagSet::new(["books"]),
        ),
    ]
}

/// Generated notes for volume tests
#[allow(dead_code)] // Used in integration tests
pub struct NoteSet;

impl NoteSet {
    /// `n` notes with ids `note-0000..`, alternating tags `even`/`odd`
    #[allow(dead_code)] // Used in integration tests
    pub fn generate(n: usize) -> Vec<ItemInput> {
        (0..n)
            .map(|i| {
                let parity = if i % 2 == 0 { "even" } else { "odd" };
                ItemInput::new(
                    format!("note-{i:04}"),
                    format!("Note number {i}"),
                    format!("Generated body {i} with common words and marker{i}"),
                    TagSet::new([parity]),
                )
            })
            .collect()
    }
}
