//! Show config tool handler
//!
//! Returns the configuration of the running memdex-mcp server.

use super::handler::{parse_args, text_content, McpToolHandler};
use crate::core::config::Config;
use crate::mcp::error::McpError;
use crate::mcp::protocol::{ToolResult, ToolSchema};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

#[derive(Debug, Default, Deserialize)]
struct ShowConfigArgs {
    #[serde(default)]
    detailed: bool,
}

pub struct ShowConfigHandler {
    config: Arc<Config>,
}

impl ShowConfigHandler {
    pub fn new(config: Arc<Config>) -> Self {
        Self { config }
    }

    fn format_config(&self) -> String {
        let mut output = String::from("# memdex MCP Configuration\n\n");

        output.push_str("## Storage\n");
        output.push_str(&format!(
            "- **Store Directory:** {}\n",
            self.config.storage.store_dir.display()
        ));
        output.push_str("- **Backup:** copy the whole store directory, not single files\n");
        output.push_str(&format!(
            "- **Writer Heap:** {} MB\n",
            self.config.storage.writer_heap_mb
        ));
        output.push_str(&format!(
            "- **Max ID Length:** {} bytes\n\n",
            self.config.storage.max_id_length
        ));

        output.push_str("## Search\n");
        output.push_str(&format!(
            "- **Default Limit:** {}\n",
            self.config.search.default_limit
        ));
        output.push_str(&format!(
            "- **Max Limit:** {}\n",
            self.config.search.max_limit
        ));
        output.push_str(&format!(
            "- **Max Query Length:** {}\n\n",
            self.config.search.max_query_length
        ));

        output.push_str("## List\n");
        output.push_str(&format!(
            "- **Default Limit:** {}\n",
            self.config.list.default_limit
        ));
        output.push_str(&format!("- **Max Limit:** {}\n", self.config.list.max_limit));

        output
    }

    fn format_config_detailed(&self) -> String {
        let mut output = self.format_config();

        output.push_str("\n## TOML\n```toml\n");
        match toml::to_string_pretty(self.config.as_ref()) {
            Ok(text) => output.push_str(&text),
            Err(e) => output.push_str(&format!("# unavailable: {e}\n")),
        }
        output.push_str("```\n");

        output
    }
}

#[async_trait]
impl McpToolHandler for ShowConfigHandler {
    fn name(&self) -> &str {
        "show_config"
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "show_config".to_string(),
            description: "Show the current configuration of the running memdex-mcp server: \
                         store location, writer heap and search/list limits."
                .to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "detailed": {
                        "type": "boolean",
                        "description": "Also show the effective configuration as TOML",
                        "default": false
                    }
                },
                "required": []
            }),
        }
    }

    async fn execute(&self, args: Value) -> Result<ToolResult, McpError> {
        let args: ShowConfigArgs = parse_args(args)?;

        let text = if args.detailed {
            self.format_config_detailed()
        } else {
            self.format_config()
        };

        Ok(text_content(text))
    }
}
