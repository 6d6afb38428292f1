//! Get server info tool handler
//!
//! Returns version and build information about the running memdex-mcp server.

use super::handler::{text_content, McpToolHandler};
use crate::mcp::error::McpError;
use crate::mcp::protocol::{ToolResult, ToolSchema, PROTOCOL_VERSION};
use async_trait::async_trait;
use serde_json::{json, Value};

/// Tool names and one-line summaries, in registration order
const TOOLS: &[(&str, &str)] = &[
    ("store", "Insert or replace an item"),
    ("store_batch", "Store several items atomically"),
    ("retrieve", "Fetch an item by id"),
    ("search", "Ranked full-text search"),
    ("search_advanced", "Ranked search with tag and date filters"),
    ("list", "Page through items, newest first"),
    ("delete", "Delete an item by id"),
    ("get_tags", "List distinct tags"),
    ("get_stats", "Item count, tag count and size"),
    ("optimize", "Compact the store"),
    ("get_server_info", "Show server version (this tool)"),
    ("show_config", "Show current configuration"),
];

pub struct GetServerInfoHandler;

impl Default for GetServerInfoHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl GetServerInfoHandler {
    pub fn new() -> Self {
        Self
    }

    fn format_info(&self) -> String {
        let version = env!("CARGO_PKG_VERSION");
        let rust_version = env!("CARGO_PKG_RUST_VERSION");

        let mut output = String::from("# memdex MCP Server Information\n\n");

        output.push_str("## Version\n");
        output.push_str(&format!("- **Version:** {version}\n"));
        output.push_str(&format!("- **Rust Version:** {rust_version}\n\n"));

        output.push_str("## Server Details\n");
        output.push_str("- **Name:** memdex-mcp\n");
        output.push_str("- **Description:** Knowledge item store with BM25 search\n");
        output.push_str(&format!("- **Protocol:** MCP {PROTOCOL_VERSION}\n\n"));

        output.push_str("## Available Tools\n");
        for (name, summary) in TOOLS {
            output.push_str(&format!("- {name}: {summary}\n"));
        }

        output
    }
}

#[async_trait]
impl McpToolHandler for GetServerInfoHandler {
    fn name(&self) -> &str {
        "get_server_info"
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "get_server_info".to_string(),
            description: "Get version and build information about the running memdex-mcp server. \
                         Returns server version, protocol version and available tools."
                .to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {},
                "required": []
            }),
        }
    }

    async fn execute(&self, _args: Value) -> Result<ToolResult, McpError> {
        let text = self.format_info();
        Ok(text_content(text))
    }
}
