//! Core domain logic (protocol-agnostic)
//!
//! This module contains all business logic that is independent
//! of the MCP and CLI adapters.
//!
//! # Architecture
//!
//! - **config**: Configuration loading (TOML + environment)
//! - **error**: Error types and Result alias
//! - **types**: Domain data structures
//! - **xdg**: XDG directory handling
//! - **storage**: Item store over a single Tantivy index
//! - **search**: Query language and BM25 search
//! - **services**: Unified service container

pub mod config;
pub mod error;
pub mod search;
pub mod services;
pub mod storage;
pub mod types;
pub mod xdg;

// Re-export key types for convenience
pub use config::Config;
pub use error::{MemdexError, Result};
pub use services::Services;
