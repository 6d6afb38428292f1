//! List tool handler
//!
//! Pages through items, most recently updated first.

use super::handler::{parse_args, text_content, McpToolHandler};
use super::helpers::format_time_ago;
use crate::core::services::Services;
use crate::core::types::Item;
use crate::mcp::error::McpError;
use crate::mcp::pagination::ListCursor;
use crate::mcp::protocol::{ToolResult, ToolSchema};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

#[derive(Debug, Deserialize)]
struct ListArgs {
    #[serde(default)]
    limit: Option<usize>,
    #[serde(default)]
    offset: Option<usize>,
    #[serde(default)]
    cursor: Option<String>,
}

pub struct ListHandler {
    services: Arc<Services>,
}

impl ListHandler {
    pub fn new(services: Arc<Services>) -> Self {
        Self { services }
    }

    fn format_page(&self, items: &[Item], offset: usize, next: Option<ListCursor>) -> String {
        if items.is_empty() {
            return if offset == 0 {
                "No items stored yet.".to_string()
            } else {
                format!("No items at offset {offset}.")
            };
        }

        let mut output = format!(
            "Items {}-{} (most recently updated first):\n\n",
            offset + 1,
            offset + items.len()
        );

        for item in items {
            output.push_str(&format!("- `{}` **{}**", item.id, item.title));
            if !item.tags.is_empty() {
                output.push_str(&format!(" [{}]", item.tags.join(", ")));
            }
            output.push_str(&format!(" ({})\n", format_time_ago(item.updated_at)));
        }

        if let Some(cursor) = next {
            output.push_str(&format!("\nnext_cursor: {}\n", cursor.encode()));
        }

        output
    }
}

#[async_trait]
impl McpToolHandler for ListHandler {
    fn name(&self) -> &str {
        "list"
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "list".to_string(),
            description: "List stored items, most recently updated first. \
                         Page with limit and offset, or pass the next_cursor value \
                         from a previous page as cursor."
                .to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "limit": {
                        "type": "integer",
                        "description": "Items per page (default 50)",
                        "minimum": 0,
                        "maximum": 1000
                    },
                    "offset": {
                        "type": "integer",
                        "description": "Items to skip (default 0)",
                        "minimum": 0
                    },
                    "cursor": {
                        "type": "string",
                        "description": "Opaque cursor from a previous page; overrides offset"
                    }
                },
                "required": []
            }),
        }
    }

    async fn execute(&self, args: Value) -> Result<ToolResult, McpError> {
        let args: ListArgs = parse_args(args)?;

        let offset = match &args.cursor {
            Some(cursor) => ListCursor::decode(cursor).map_err(McpError::InvalidParams)?.offset,
            None => args.offset.unwrap_or(0),
        };
        let limit = self.services.list_limit(args.limit);

        let items = self.services.store.list(limit, offset)?;
        let next = ListCursor::next(offset, limit, items.len());

        Ok(text_content(self.format_page(&items, offset, next)))
    }
}
