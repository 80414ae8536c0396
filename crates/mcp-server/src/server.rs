//! Main MCP server orchestration

use analyzer_client::Backend;
use std::sync::Arc;
use tracing::info;

use crate::protocol::RequestHandler;
use crate::transport::{HttpTransport, StdioTransport};

/// Server mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ServerMode {
    /// stdio transport (for desktop MCP clients)
    #[default]
    Stdio,
    /// HTTP transport
    Http { port: u16 },
}

/// MCP server
pub struct McpServer {
    handler: Arc<RequestHandler>,
    mode: ServerMode,
}

impl McpServer {
    /// Create a new MCP server forwarding tool calls to `backend`
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        info!("Forwarding tool calls to {}", backend.backend_name());

        Self {
            handler: Arc::new(RequestHandler::new(backend)),
            mode: ServerMode::default(),
        }
    }

    /// Set the server mode
    pub fn with_mode(mut self, mode: ServerMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn mode(&self) -> ServerMode {
        self.mode
    }

    /// Run the server
    pub async fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        match self.mode {
            ServerMode::Stdio => {
                info!("Starting MCP server in stdio mode");
                let transport = StdioTransport::new(self.handler.clone());
                transport.run().await
            }
            ServerMode::Http { port } => {
                info!("Starting MCP server in HTTP mode on port {}", port);
                let transport = HttpTransport::new(self.handler.clone(), port);
                transport.run().await
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::mock::MockBackend;
    use serde_json::json;

    #[test]
    fn test_default_mode_is_stdio() {
        let server = McpServer::new(Arc::new(MockBackend::replying(json!({}))));
        assert_eq!(server.mode(), ServerMode::Stdio);

        let server = server.with_mode(ServerMode::Http { port: 8080 });
        assert_eq!(server.mode(), ServerMode::Http { port: 8080 });
    }
}
