//! MCP server implementation

use crate::core::services::Services;
use crate::mcp::error::McpError;
use crate::mcp::handlers::ProtocolHandlers;
use crate::mcp::protocol::*;
use crate::mcp::transport::StdioTransport;
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, BufReader};
use tracing::{debug, error, info};

pub struct McpServer {
    services: Arc<Services>,
    handlers: Arc<ProtocolHandlers>,
}

impl McpServer {
    pub fn new(services: Arc<Services>) -> Self {
        Self {
            handlers: Arc::new(ProtocolHandlers::new(Arc::clone(&services))),
            services,
        }
    }

    /// Run the MCP server over stdin/stdout until EOF or Ctrl+C
    pub async fn run(&self) -> Result<(), McpError> {
        let stdin = BufReader::new(tokio::io::stdin());
        let mut transport = StdioTransport::new();
        self.serve(stdin, &mut transport).await
    }

    /// Serve line-delimited requests from `input`
    ///
    /// Returns an error once the store reports a medium failure, so
    /// the binary can exit with a non-zero status.
    pub async fn serve<R, W>(
        &self,
        input: R,
        transport: &mut StdioTransport<W>,
    ) -> Result<(), McpError>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        info!("Starting memdex MCP server");

        let mut lines = input.lines();

        // Spawn signal handler
        let mut shutdown = tokio::spawn(async {
            tokio::signal::ctrl_c().await.ok();
        });

        // Main loop
        loop {
            tokio::select! {
                // Process incoming messages
                line = lines.next_line() => {
                    match line? {
                        Some(line) if !line.trim().is_empty() => {
                            let response = self.process_line(&line).await;
                            transport.send_response(response).await?;
                        }
                        None => break, // EOF
                        _ => continue,
                    }
                }

                // Handle Ctrl+C
                _ = &mut shutdown => {
                    info!("Received shutdown signal");
                    break;
                }
            }

            if self.services.store.is_failed() {
                error!("Store failed, refusing further requests");
                return Err(McpError::StoreFailed(
                    "storage medium failure, restart required".to_string(),
                ));
            }
        }

        shutdown.abort();
        info!("MCP server shutting down");
        Ok(())
    }

    /// Handle one raw message, always producing a response
    pub async fn process_line(&self, line: &str) -> JsonRpcResponse {
        debug!("Received: {}", line);

        match self.process_message(line).await {
            Ok(response) => response,
            Err(e) => {
                error!("Error processing message: {}", e);
                let (code, message) = e.code_and_message();
                JsonRpcResponse::error(None, code, message)
            }
        }
    }

    async fn process_message(&self, line: &str) -> Result<JsonRpcResponse, McpError> {
        // Parse JSON-RPC request
        let request: JsonRpcRequest =
            serde_json::from_str(line).map_err(|e| McpError::ParseError(e.to_string()))?;

        // Route to handler
        match request.method.as_str() {
            "initialize" => self.handlers.handle_initialize(request).await,
            "initialized" | "notifications/initialized" => {
                self.handlers.handle_initialized(request).await
            }
            "tools/list" => self.handlers.handle_tools_list(request).await,
            "tools/call" => self.handlers.handle_tools_call(request).await,
            "ping" => self.handlers.handle_ping(request).await,
            _ => Ok(JsonRpcResponse::error(
                request.id,
                METHOD_NOT_FOUND,
                format!("Unknown method: {}", request.method),
            )),
        }
    }
}
