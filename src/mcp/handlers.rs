//! MCP protocol method handlers

use crate::core::services::Services;
use crate::mcp::error::McpError;
use crate::mcp::protocol::*;
use crate::mcp::tools::{
    DeleteHandler, GetServerInfoHandler, GetStatsHandler, GetTagsHandler, ListHandler,
    OptimizeHandler, RetrieveHandler, SearchAdvancedHandler, SearchHandler, ShowConfigHandler,
    StoreBatchHandler, StoreHandler, ToolRegistry,
};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{info, warn};

pub struct ProtocolHandlers {
    initialized: AtomicBool,
    tool_registry: ToolRegistry,
}

impl ProtocolHandlers {
    pub fn new(services: Arc<Services>) -> Self {
        let mut registry = ToolRegistry::new();

        // Register all available tools
        registry.register(Arc::new(StoreHandler::new(Arc::clone(&services))));
        registry.register(Arc::new(StoreBatchHandler::new(Arc::clone(&services))));
        registry.register(Arc::new(RetrieveHandler::new(Arc::clone(&services))));
        registry.register(Arc::new(SearchHandler::new(Arc::clone(&services))));
        registry.register(Arc::new(SearchAdvancedHandler::new(Arc::clone(&services))));
        registry.register(Arc::new(ListHandler::new(Arc::clone(&services))));
        registry.register(Arc::new(DeleteHandler::new(Arc::clone(&services))));
        registry.register(Arc::new(GetTagsHandler::new(Arc::clone(&services))));
        registry.register(Arc::new(GetStatsHandler::new(Arc::clone(&services))));
        registry.register(Arc::new(OptimizeHandler::new(Arc::clone(&services))));
        registry.register(Arc::new(GetServerInfoHandler::new()));
        registry.register(Arc::new(ShowConfigHandler::new(Arc::clone(
            &services.config,
        ))));

        Self {
            initialized: AtomicBool::new(false),
            tool_registry: registry,
        }
    }

    /// Whether the client sent the initialized notification
    pub fn is_initialized(&self) -> bool {
        self.initialized.load(Ordering::SeqCst)
    }

    /// Handle initialize request
    pub async fn handle_initialize(
        &self,
        request: JsonRpcRequest,
    ) -> Result<JsonRpcResponse, McpError> {
        let params: InitializeParams =
            serde_json::from_value(request.params.unwrap_or(Value::Null)).unwrap_or_default();

        match &params.client_info {
            Some(client) => info!("Client initialized: {}", client.name),
            None => info!("Client initialized"),
        }

        let result = InitializeResult {
            protocol_version: PROTOCOL_VERSION.to_string(),
            capabilities: ServerCapabilities {
                tools: ToolsCapability {
                    list_changed: false,
                },
            },
            server_info: ServerInfo {
                name: "memdex-mcp".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
        };

        Ok(JsonRpcResponse::success(
            request.id,
            serde_json::to_value(result)?,
        ))
    }

    /// Handle initialized notification
    pub async fn handle_initialized(
        &self,
        _request: JsonRpcRequest,
    ) -> Result<JsonRpcResponse, McpError> {
        self.initialized.store(true, Ordering::SeqCst);
        info!("Server initialized");

        // Initialized is a notification, no response needed
        Ok(JsonRpcResponse::empty())
    }

    /// Handle tools/list request
    pub async fn handle_tools_list(
        &self,
        request: JsonRpcRequest,
    ) -> Result<JsonRpcResponse, McpError> {
        let tools = self.tool_registry.list();
        Ok(JsonRpcResponse::success(request.id, json!({ "tools": tools })))
    }

    /// Handle tools/call request
    pub async fn handle_tools_call(
        &self,
        request: JsonRpcRequest,
    ) -> Result<JsonRpcResponse, McpError> {
        // Parse params
        let Some(params_value) = request.params.clone() else {
            return Ok(JsonRpcResponse::error(
                request.id,
                INVALID_PARAMS,
                "Missing params",
            ));
        };

        let params: ToolCallParams = match serde_json::from_value(params_value) {
            Ok(p) => p,
            Err(e) => {
                return Ok(JsonRpcResponse::error(
                    request.id,
                    INVALID_PARAMS,
                    format!("Invalid params: {e}"),
                ));
            }
        };

        // Get tool handler from registry
        let Some(handler) = self.tool_registry.get(&params.name) else {
            return Ok(JsonRpcResponse::error(
                request.id,
                INVALID_REQUEST,
                format!("Tool not found: {}", params.name),
            ));
        };

        // Execute tool and map errors to JSON-RPC codes
        match handler.execute(params.arguments).await {
            Ok(result) => Ok(JsonRpcResponse::success(
                request.id,
                serde_json::to_value(result)?,
            )),
            Err(e) => {
                let (code, message) = e.code_and_message();
                warn!("Tool '{}' failed ({}): {}", params.name, code, message);
                Ok(JsonRpcResponse::error(request.id, code, message))
            }
        }
    }

    /// Handle ping request
    pub async fn handle_ping(&self, request: JsonRpcRequest) -> Result<JsonRpcResponse, McpError> {
        Ok(JsonRpcResponse::success(request.id, json!({})))
    }
}
