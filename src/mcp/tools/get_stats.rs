//! Get stats tool handler

use super::handler::{text_content, McpToolHandler};
use super::helpers::format_bytes;
use crate::core::services::Services;
use crate::core::types::StoreStats;
use crate::mcp::error::McpError;
use crate::mcp::protocol::{ToolResult, ToolSchema};
use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::Arc;

pub struct GetStatsHandler {
    services: Arc<Services>,
}

impl GetStatsHandler {
    pub fn new(services: Arc<Services>) -> Self {
        Self { services }
    }

    fn format_stats(&self, stats: &StoreStats) -> String {
        let mut output = String::from("# Store Statistics\n\n");
        output.push_str(&format!("- **Items:** {}\n", stats.item_count));
        output.push_str(&format!("- **Distinct tags:** {}\n", stats.tag_count));
        output.push_str(&format!(
            "- **Size on disk:** {}\n",
            format_bytes(stats.size_on_disk)
        ));
        output.push_str(&format!(
            "- **Location:** {}\n",
            self.services.store.path().display()
        ));
        output
    }
}

#[async_trait]
impl McpToolHandler for GetStatsHandler {
    fn name(&self) -> &str {
        "get_stats"
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "get_stats".to_string(),
            description: "Show aggregate store statistics: item count, distinct tag count \
                         and size on disk."
                .to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {},
                "required": []
            }),
        }
    }

    async fn execute(&self, _args: Value) -> Result<ToolResult, McpError> {
        let stats = self.services.store.get_stats()?;
        Ok(text_content(self.format_stats(&stats)))
    }
}
