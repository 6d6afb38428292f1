//! Search tool handler

use super::handler::{parse_args, text_content, McpToolHandler};
use super::helpers::truncate_text;
use crate::core::services::Services;
use crate::core::types::SearchResponse;
use crate::mcp::error::McpError;
use crate::mcp::protocol::{ToolResult, ToolSchema};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

/// Characters of content shown per hit
const SNIPPET_CHARS: usize = 300;

#[derive(Debug, Deserialize)]
struct SearchArgs {
    query: String,
    #[serde(default)]
    limit: Option<usize>,
}

pub struct SearchHandler {
    services: Arc<Services>,
}

impl SearchHandler {
    pub fn new(services: Arc<Services>) -> Self {
        Self { services }
    }
}

/// Markdown rendering shared with `search_advanced`
pub(super) fn format_results(response: &SearchResponse) -> String {
    if response.results.is_empty() {
        return format!("No results found for query: '{}'", response.query);
    }

    let mut output = format!(
        "Found {} results for query '{}' ({}ms):\n\n",
        response.count, response.query, response.duration_ms
    );

    for (i, hit) in response.results.iter().enumerate() {
        output.push_str(&format!(
            "## {}. {} (score: {:.2})\n",
            i + 1,
            hit.item.title,
            hit.score
        ));
        output.push_str(&format!("- **ID:** `{}`\n", hit.item.id));
        if !hit.item.tags.is_empty() {
            output.push_str(&format!("- **Tags:** {}\n", hit.item.tags.join(", ")));
        }
        output.push_str(&format!(
            "- **Updated:** {}\n\n",
            hit.item.updated_at.to_rfc3339()
        ));
        if !hit.item.content.is_empty() {
            output.push_str(&truncate_text(&hit.item.content, SNIPPET_CHARS));
            output.push_str("\n\n");
        }
    }

    output
}

#[async_trait]
impl McpToolHandler for SearchHandler {
    fn name(&self) -> &str {
        "search"
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "search".to_string(),
            description: "Full-text BM25 search over item titles, contents and tags. \
                         Results are ranked by relevance, most relevant first. \
                         \
                         QUERY SYNTAX: \
                         - Words: rust async (all words, implicit AND) \
                         - Phrases: \"exact phrase\" \
                         - Boolean: rust AND (tokio OR async-std), rust NOT python \
                         - Prefix: optim* \
                         - Fields: title:deploy, content:error, tags:infra"
                .to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "query": {
                        "type": "string",
                        "description": "Search query",
                        "minLength": 1,
                        "maxLength": 500
                    },
                    "limit": {
                        "type": "integer",
                        "description": "Maximum results (default 10)",
                        "minimum": 0,
                        "maximum": 100
                    }
                },
                "required": ["query"]
            }),
        }
    }

    async fn execute(&self, args: Value) -> Result<ToolResult, McpError> {
        let args: SearchArgs = parse_args(args)?;

        let response = self.services.search.search(&args.query, args.limit)?;

        Ok(text_content(format_results(&response)))
    }
}
