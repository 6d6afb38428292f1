//! Store batch tool handler
//!
//! Stores many items in one atomic commit.

use super::handler::{parse_args, text_content, McpToolHandler};
use crate::core::services::Services;
use crate::core::types::{Item, ItemInput};
use crate::mcp::error::McpError;
use crate::mcp::protocol::{ToolResult, ToolSchema};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

#[derive(Debug, Deserialize)]
struct StoreBatchArgs {
    items: Vec<ItemInput>,
}

pub struct StoreBatchHandler {
    services: Arc<Services>,
}

impl StoreBatchHandler {
    pub fn new(services: Arc<Services>) -> Self {
        Self { services }
    }

    fn format_batch(&self, items: &[Item]) -> String {
        if items.is_empty() {
            return "Batch was empty, nothing stored.".to_string();
        }

        let mut output = format!("Stored {} items in one commit", items.len());
        if let Some(first) = items.first() {
            output.push_str(&format!(" (updated {})", first.updated_at.to_rfc3339()));
        }
        output.push_str(":\n\n");

        for item in items {
            output.push_str(&format!("- `{}`: {}\n", item.id, item.title));
        }
        output
    }
}

#[async_trait]
impl McpToolHandler for StoreBatchHandler {
    fn name(&self) -> &str {
        "store_batch"
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "store_batch".to_string(),
            description: "Store several knowledge items atomically. Either every item is stored \
                         or none is: one invalid item rejects the whole batch and the error names \
                         its position. All stored items share the same updated_at. \
                         Much faster than repeated store calls for bulk imports."
                .to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "items": {
                        "type": "array",
                        "description": "Items to store",
                        "items": {
                            "type": "object",
                            "properties": {
                                "id": {"type": "string"},
                                "title": {"type": "string"},
                                "content": {"type": "string"},
                                "tags": {"type": "array", "items": {"type": "string"}}
                            },
                            "required": ["id", "title", "content"]
                        }
                    }
                },
                "required": ["items"]
            }),
        }
    }

    async fn execute(&self, args: Value) -> Result<ToolResult, McpError> {
        let args: StoreBatchArgs = parse_args(args)?;

        let items = self.services.store.store_batch(args.items)?;

        Ok(text_content(self.format_batch(&items)))
    }
}
