//! Get tags tool handler

use super::handler::{text_content, McpToolHandler};
use crate::core::services::Services;
use crate::mcp::error::McpError;
use crate::mcp::protocol::{ToolResult, ToolSchema};
use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::Arc;

pub struct GetTagsHandler {
    services: Arc<Services>,
}

impl GetTagsHandler {
    pub fn new(services: Arc<Services>) -> Self {
        Self { services }
    }

    fn format_tags(&self, tags: &[String]) -> String {
        if tags.is_empty() {
            return "No tags in use.".to_string();
        }

        let mut output = format!("Tags in use ({}):\n\n", tags.len());
        for tag in tags {
            output.push_str(&format!("- {tag}\n"));
        }
        output
    }
}

#[async_trait]
impl McpToolHandler for GetTagsHandler {
    fn name(&self) -> &str {
        "get_tags"
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "get_tags".to_string(),
            description: "List every distinct tag carried by at least one stored item, \
                         sorted. Use it to discover values for search_advanced tag filters."
                .to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {},
                "required": []
            }),
        }
    }

    async fn execute(&self, _args: Value) -> Result<ToolResult, McpError> {
        let tags = self.services.store.get_tags()?;
        Ok(text_content(self.format_tags(&tags)))
    }
}
