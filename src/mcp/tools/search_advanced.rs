//! Filtered search tool handler

use super::handler::{parse_args, text_content, McpToolHandler};
use super::search::format_results;
use crate::core::services::Services;
use crate::core::types::{parse_timestamp, SearchFilters, TagSet};
use crate::mcp::error::McpError;
use crate::mcp::protocol::{ToolResult, ToolSchema};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

#[derive(Debug, Deserialize)]
struct SearchAdvancedArgs {
    query: String,
    #[serde(default)]
    limit: Option<usize>,
    #[serde(default)]
    tags: TagSet,
    #[serde(default)]
    date_from: Option<String>,
    #[serde(default)]
    date_to: Option<String>,
}

impl SearchAdvancedArgs {
    fn filters(&self) -> Result<SearchFilters, McpError> {
        let date_from = self
            .date_from
            .as_deref()
            .map(|d| parse_timestamp(d, false))
            .transpose()?;
        let date_to = self
            .date_to
            .as_deref()
            .map(|d| parse_timestamp(d, true))
            .transpose()?;

        Ok(SearchFilters {
            tags: self.tags.clone(),
            date_from,
            date_to,
        })
    }
}

pub struct SearchAdvancedHandler {
    services: Arc<Services>,
}

impl SearchAdvancedHandler {
    pub fn new(services: Arc<Services>) -> Self {
        Self { services }
    }
}

#[async_trait]
impl McpToolHandler for SearchAdvancedHandler {
    fn name(&self) -> &str {
        "search_advanced"
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "search_advanced".to_string(),
            description: "Full-text search with filters. Same query syntax and ranking as \
                         search, restricted to items carrying at least one of the given tags \
                         (exact match) and last updated within [date_from, date_to]. \
                         Dates are RFC 3339 or YYYY-MM-DD; a bare date_to covers the whole day."
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
                    },
                    "tags": {
                        "type": "array",
                        "items": {"type": "string"},
                        "description": "Keep items with at least one of these tags"
                    },
                    "date_from": {
                        "type": "string",
                        "description": "Earliest updated_at (inclusive)"
                    },
                    "date_to": {
                        "type": "string",
                        "description": "Latest updated_at (inclusive)"
                    }
                },
                "required": ["query"]
            }),
        }
    }

    async fn execute(&self, args: Value) -> Result<ToolResult, McpError> {
        let args: SearchAdvancedArgs = parse_args(args)?;
        let filters = args.filters()?;

        let response = self
            .services
            .search
            .search_advanced(&args.query, args.limit, &filters)?;

        Ok(text_content(format_results(&response)))
    }
}
