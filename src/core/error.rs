//! Error types and error handling for the memdex store.
//!
//! This module defines the error types used throughout the
//! application. Protocol-specific error handling (MCP error codes)
//! is handled in the respective adapter modules.
//!
//! There is no not-found variant: `retrieve` answers with `None`
//! and `delete` with `false`.

use thiserror::Error;

/// Result type alias for memdex operations
pub type Result<T> = std::result::Result<T, MemdexError>;

/// Main error type for the memdex store
#[derive(Error, Debug)]
pub enum MemdexError {
    #[error("Invalid item: {0}")]
    InvalidItem(String),

    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Search failed: {0}")]
    SearchFailed(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),
}

impl MemdexError {
    /// Get user-friendly error message
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// Check if this is a bad request error (invalid input)
    ///
    /// Bad requests never touch storage and leave state unchanged.
    pub fn is_bad_request(&self) -> bool {
        matches!(
            self,
            MemdexError::InvalidItem(_)
                | MemdexError::InvalidQuery(_)
                | MemdexError::InvalidArgument(_)
                | MemdexError::ConfigError(_)
        )
    }

    /// Check if the underlying medium failed
    ///
    /// After a fatal error the store refuses further requests.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            MemdexError::StorageError(_)
                | MemdexError::StoreUnavailable(_)
                | MemdexError::IoError(_)
        )
    }
}
