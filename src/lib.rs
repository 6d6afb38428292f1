//! memdex - local knowledge store with full-text search
//!
//! Stores titled, tagged text items under caller-chosen ids and keeps a
//! BM25 full-text index over them in step with every write, using
//! Tantivy as the single storage engine.
//!
//! # Architecture
//!
//! - **core**: Domain logic (protocol-agnostic)
//!   - config, error, types, xdg
//!   - storage (item store, schema, maintenance, integrity checks)
//!   - search (query language, BM25 ranking, filters)
//!   - services (shared service container)
//!
//! - **mcp**: MCP adapter over stdio (depends on core)
//!   - server, tools, protocol
//!
//! - **cli**: command-line adapter (depends on core)
//!
//! # Key Features
//!
//! - Upsert by id with preserved `created_at` and strictly increasing `updated_at`
//! - Atomic batch writes (one commit, all or nothing)
//! - Boolean, phrase, prefix and column-scoped queries
//! - Exact tag and date-range filters
//! - MCP server (12 tools) and CLI

// Core domain logic (protocol-agnostic)
pub mod core;

// MCP (Model Context Protocol) adapter
pub mod mcp;

// Command-line adapter
pub mod cli;

// Re-export commonly used types for convenience
pub use core::config::Config;
pub use core::error::{MemdexError, Result};
pub use core::services::Services;
pub use core::storage::{ItemStore, StoreValidator, ValidationReport};
pub use core::types::*;
