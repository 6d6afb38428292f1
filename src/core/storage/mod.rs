//! Storage layer for the item store.
//!
//! # Architecture
//!
//! - **ItemStore**: Item CRUD, batch writes and listing over one Tantivy index
//! - **ItemFields**: Schema field handles and document mapping
//! - **StoreValidator**: Read-only integrity scan
//!
//! # Store Directory Structure
//!
//! ```text
//! {store_dir}/
//! ├── meta.json              # Published commit (segments + payload)
//! ├── .managed.json          # Files owned by the index
//! ├── .tantivy-writer.lock   # Held while the store is open
//! └── [segment files]
//! ```
//!
//! A store is this whole directory, not a single file. Back it up or move
//! it as a unit, with no process holding the writer lock; copying only
//! `meta.json` or a subset of segments yields an unreadable store.

mod maintenance;
mod schema;
mod store;
mod validator;

pub use schema::{create_schema, CommitPayload, ItemFields, SCHEMA_VERSION};
pub use store::ItemStore;
pub use validator::{StoreValidator, ValidationReport};
