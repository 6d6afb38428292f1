//! Line-delimited transport for MCP protocol

use crate::mcp::error::McpError;
use crate::mcp::protocol::JsonRpcResponse;
use tokio::io::{AsyncWrite, AsyncWriteExt, BufWriter};
use tracing::debug;

/// Writes one JSON-RPC message per line
///
/// Defaults to stdout; tests substitute an in-memory writer.
pub struct StdioTransport<W: AsyncWrite + Unpin = tokio::io::Stdout> {
    out: BufWriter<W>,
}

impl StdioTransport {
    pub fn new() -> Self {
        Self::with_writer(tokio::io::stdout())
    }
}

impl<W: AsyncWrite + Unpin> StdioTransport<W> {
    pub fn with_writer(writer: W) -> Self {
        Self {
            out: BufWriter::new(writer),
        }
    }

    /// Send JSON-RPC response
    pub async fn send_response(&mut self, response: JsonRpcResponse) -> Result<(), McpError> {
        // Skip responses for notifications
        if response.is_empty() {
            return Ok(());
        }

        let json = serde_json::to_string(&response)?;
        debug!("Sending: {}", json);

        // Write JSON + newline
        self.out.write_all(json.as_bytes()).await?;
        self.out.write_all(b"\n").await?;
        self.out.flush().await?;

        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.out.into_inner()
    }
}

impl Default for StdioTransport {
    fn default() -> Self {
        Self::new()
    }
}
