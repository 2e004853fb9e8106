//! STDIO transport: one MCP session over stdin/stdout.
//!
//! Logs go to stderr, so stdout carries protocol frames only.

use rmcp::ServiceExt;
use tracing::{info, instrument};

use super::{TransportError, TransportResult};
use crate::core::McpServer;

pub struct StdioTransport;

impl StdioTransport {
    /// Serve until the client closes stdin.
    #[instrument(skip_all, fields(server = %server.name()))]
    pub async fn run(server: McpServer) -> TransportResult<()> {
        info!("Serving MCP over stdin/stdout");

        let session = server
            .serve(rmcp::transport::stdio())
            .await
            .map_err(|e| TransportError::init(e.to_string()))?;

        let reason = session
            .waiting()
            .await
            .map_err(|e| TransportError::ServiceError(e.to_string()))?;

        info!("STDIO session ended: {:?}", reason);
        Ok(())
    }
}
