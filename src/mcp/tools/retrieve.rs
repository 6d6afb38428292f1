//! Retrieve tool handler

use super::handler::{parse_args, text_content, McpToolHandler};
use super::helpers::format_item;
use crate::core::services::Services;
use crate::mcp::error::McpError;
use crate::mcp::protocol::{ToolResult, ToolSchema};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

/// Retrieve returns full content, capped only for very large items
const MAX_CONTENT_CHARS: usize = 100_000;

#[derive(Debug, Deserialize)]
struct RetrieveArgs {
    id: String,
}

pub struct RetrieveHandler {
    services: Arc<Services>,
}

impl RetrieveHandler {
    pub fn new(services: Arc<Services>) -> Self {
        Self { services }
    }
}

#[async_trait]
impl McpToolHandler for RetrieveHandler {
    fn name(&self) -> &str {
        "retrieve"
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "retrieve".to_string(),
            description: "Fetch one knowledge item by its exact id. Returns title, content, \
                         tags and timestamps, or a not-found message."
                .to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "id": {
                        "type": "string",
                        "description": "Item identifier",
                        "minLength": 1
                    }
                },
                "required": ["id"]
            }),
        }
    }

    async fn execute(&self, args: Value) -> Result<ToolResult, McpError> {
        let args: RetrieveArgs = parse_args(args)?;

        let text = match self.services.store.retrieve(&args.id)? {
            Some(item) => format_item(&item, &item.title, MAX_CONTENT_CHARS),
            None => format!("Item `{}` not found.", args.id),
        };

        Ok(text_content(text))
    }
}
