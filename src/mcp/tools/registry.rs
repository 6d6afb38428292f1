//! Tool registry for managing MCP tools

use super::handler::McpToolHandler;
use crate::mcp::protocol::ToolSchema;
use std::collections::HashMap;
use std::sync::Arc;

/// Registered tool handlers, looked up by name
///
/// `tools/list` reports tools in registration order. Registering a name
/// twice replaces the earlier handler in place.
#[derive(Default)]
pub struct ToolRegistry {
    handlers: Vec<Arc<dyn McpToolHandler>>,
    by_name: HashMap<String, usize>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool handler
    pub fn register(&mut self, handler: Arc<dyn McpToolHandler>) {
        let name = handler.name().to_string();
        match self.by_name.get(&name) {
            Some(&slot) => self.handlers[slot] = handler,
            None => {
                self.by_name.insert(name, self.handlers.len());
                self.handlers.push(handler);
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&Arc<dyn McpToolHandler>> {
        self.by_name.get(name).map(|&slot| &self.handlers[slot])
    }

    /// Tool schemas in registration order
    pub fn list(&self) -> Vec<ToolSchema> {
        self.handlers.iter().map(|handler| handler.schema()).collect()
    }

    /// Tool names in registration order
    pub fn names(&self) -> Vec<&str> {
        self.handlers.iter().map(|handler| handler.name()).collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}
