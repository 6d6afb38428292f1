//! Delete tool handler

use super::handler::{parse_args, text_content, McpToolHandler};
use crate::core::services::Services;
use crate::mcp::error::McpError;
use crate::mcp::protocol::{ToolResult, ToolSchema};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

#[derive(Debug, Deserialize)]
struct DeleteArgs {
    id: String,
}

pub struct DeleteHandler {
    services: Arc<Services>,
}

impl DeleteHandler {
    pub fn new(services: Arc<Services>) -> Self {
        Self { services }
    }
}

#[async_trait]
impl McpToolHandler for DeleteHandler {
    fn name(&self) -> &str {
        "delete"
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "delete".to_string(),
            description: "Delete a knowledge item by id. The item disappears from retrieve, \
                         list and search at once. Deleting an unknown id is not an error."
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
        let args: DeleteArgs = parse_args(args)?;

        let text = if self.services.store.delete(&args.id)? {
            format!("Deleted item `{}`.", args.id)
        } else {
            format!("Item `{}` not found, nothing deleted.", args.id)
        };

        Ok(text_content(text))
    }
}
