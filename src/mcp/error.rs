//! MCP-specific error types

use crate::core::error::MemdexError;
use crate::mcp::protocol::{
    INTERNAL_ERROR, INVALID_PARAMS, INVALID_REQUEST, ITEM_INVALID, PARSE_ERROR, SEARCH_FAILED,
    STORE_UNAVAILABLE,
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum McpError {
    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Invalid params: {0}")]
    InvalidParams(String),

    #[error("Internal error: {0}")]
    InternalError(String),

    #[error("Tool error (code {0}): {1}")]
    ToolError(i32, String),

    #[error("Store failed: {0}")]
    StoreFailed(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl McpError {
    /// JSON-RPC error code and message for this error
    pub fn code_and_message(&self) -> (i32, String) {
        match self {
            McpError::ParseError(msg) => (PARSE_ERROR, msg.clone()),
            McpError::InvalidRequest(msg) => (INVALID_REQUEST, msg.clone()),
            McpError::InvalidParams(msg) => (INVALID_PARAMS, msg.clone()),
            McpError::InternalError(msg) => (INTERNAL_ERROR, msg.clone()),
            McpError::ToolError(code, msg) => (*code, msg.clone()),
            McpError::StoreFailed(msg) => (STORE_UNAVAILABLE, msg.clone()),
            McpError::Io(e) => (INTERNAL_ERROR, format!("I/O error: {e}")),
            McpError::Json(e) => (INTERNAL_ERROR, format!("JSON error: {e}")),
        }
    }
}

impl From<MemdexError> for McpError {
    fn from(err: MemdexError) -> Self {
        match err {
            MemdexError::InvalidItem(s) => {
                McpError::ToolError(ITEM_INVALID, format!("Invalid item: {s}"))
            }
            MemdexError::InvalidQuery(s) => McpError::InvalidParams(format!("Invalid query: {s}")),
            MemdexError::InvalidArgument(s) => {
                McpError::InvalidParams(format!("Invalid argument: {s}"))
            }
            MemdexError::ConfigError(s) => {
                McpError::InvalidParams(format!("Configuration error: {s}"))
            }
            MemdexError::SearchFailed(s) => {
                McpError::ToolError(SEARCH_FAILED, format!("Search failed: {s}"))
            }
            MemdexError::StorageError(s) => {
                McpError::ToolError(STORE_UNAVAILABLE, format!("Storage error: {s}"))
            }
            MemdexError::StoreUnavailable(s) => {
                McpError::ToolError(STORE_UNAVAILABLE, format!("Store unavailable: {s}"))
            }
            MemdexError::IoError(e) => {
                McpError::ToolError(STORE_UNAVAILABLE, format!("I/O error: {e}"))
            }
            MemdexError::SerdeError(e) => {
                McpError::InternalError(format!("Serialization error: {e}"))
            }
            MemdexError::TomlError(e) => {
                McpError::InternalError(format!("Configuration parse error: {e}"))
            }
        }
    }
}
