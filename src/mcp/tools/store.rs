//! Store tool handler
//!
//! Inserts a new item or replaces the item with the same id.

use super::handler::{parse_args, text_content, McpToolHandler};
use crate::core::services::Services;
use crate::core::types::{Item, ItemInput, TagSet};
use crate::mcp::error::McpError;
use crate::mcp::protocol::{ToolResult, ToolSchema};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

#[derive(Debug, Deserialize)]
struct StoreArgs {
    id: String,
    title: String,
    content: String,
    #[serde(default)]
    tags: TagSet,
}

pub struct StoreHandler {
    services: Arc<Services>,
}

impl StoreHandler {
    pub fn new(services: Arc<Services>) -> Self {
        Self { services }
    }

    fn format_stored(&self, item: &Item) -> String {
        let verb = if item.created_at == item.updated_at {
            "Stored"
        } else {
            "Updated"
        };

        let mut output = format!("{verb} item `{}`: {}\n\n", item.id, item.title);
        if !item.tags.is_empty() {
            output.push_str(&format!("- **Tags:** {}\n", item.tags.join(", ")));
        }
        output.push_str(&format!("- **Created:** {}\n", item.created_at.to_rfc3339()));
        output.push_str(&format!("- **Updated:** {}\n", item.updated_at.to_rfc3339()));
        output
    }
}

#[async_trait]
impl McpToolHandler for StoreHandler {
    fn name(&self) -> &str {
        "store"
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "store".to_string(),
            description: "Store a knowledge item. If an item with the same id exists it is \
                         replaced: title, content and tags are overwritten, created_at is kept \
                         and updated_at advances. The item is searchable as soon as this returns."
                .to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "id": {
                        "type": "string",
                        "description": "Unique item identifier",
                        "minLength": 1
                    },
                    "title": {
                        "type": "string",
                        "description": "Item title (must not be empty)",
                        "minLength": 1
                    },
                    "content": {
                        "type": "string",
                        "description": "Item body text"
                    },
                    "tags": {
                        "type": "array",
                        "items": {"type": "string"},
                        "description": "Tags; duplicates and blank entries are dropped"
                    }
                },
                "required": ["id", "title", "content"]
            }),
        }
    }

    async fn execute(&self, args: Value) -> Result<ToolResult, McpError> {
        let args: StoreArgs = parse_args(args)?;

        let item = self.services.store.store(ItemInput::new(
            args.id,
            args.title,
            args.content,
            args.tags,
        ))?;

        Ok(text_content(self.format_stored(&item)))
    }
}
