//! Optimize tool handler
//!
//! Runs store maintenance: checkpoint, segment merge, garbage collection.

use super::handler::{text_content, McpToolHandler};
use super::helpers::format_bytes;
use crate::core::services::Services;
use crate::core::types::OptimizeReport;
use crate::mcp::error::McpError;
use crate::mcp::protocol::{ToolResult, ToolSchema};
use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::Arc;

pub struct OptimizeHandler {
    services: Arc<Services>,
}

impl OptimizeHandler {
    pub fn new(services: Arc<Services>) -> Self {
        Self { services }
    }

    fn format_report(&self, report: &OptimizeReport) -> String {
        let mut output = format!("Optimization complete ({}ms)\n\n", report.duration_ms);
        output.push_str(&format!(
            "- **Segments:** {} -> {}\n",
            report.segments_before, report.segments_after
        ));
        output.push_str(&format!(
            "- **Size:** {} -> {}\n",
            format_bytes(report.size_before),
            format_bytes(report.size_after)
        ));
        output
    }
}

#[async_trait]
impl McpToolHandler for OptimizeHandler {
    fn name(&self) -> &str {
        "optimize"
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "optimize".to_string(),
            description: "Compact the store: merge index segments and reclaim space left by \
                         updates and deletes. Contents and search results are unchanged. \
                         May take a while on large stores."
                .to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {},
                "required": []
            }),
        }
    }

    async fn execute(&self, _args: Value) -> Result<ToolResult, McpError> {
        let services = Arc::clone(&self.services);
        let report = tokio::task::spawn_blocking(move || services.store.optimize())
            .await
            .map_err(|e| McpError::InternalError(format!("Optimize task failed: {e}")))??;

        Ok(text_content(self.format_report(&report)))
    }
}
