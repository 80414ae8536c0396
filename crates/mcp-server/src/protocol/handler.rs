//! MCP request handler

use analyzer_client::Backend;
use serde_json::Value;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, info, warn};

use super::capabilities::ServerCapabilities;
use super::types::*;
use crate::tools::{ToolExecutor, ToolName};

/// Name advertised to MCP clients
pub const SERVER_NAME: &str = "Solana Wallet Analyzer";

/// Handler for MCP requests
///
/// Shared across concurrently running requests; holds no per-call state.
pub struct RequestHandler {
    /// Tool executor
    tool_executor: ToolExecutor,
    /// Server name
    server_name: String,
    /// Server version
    server_version: String,
    /// Whether a client completed `initialize`
    initialized: AtomicBool,
}

impl RequestHandler {
    /// Create a new request handler
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        Self {
            tool_executor: ToolExecutor::new(backend),
            server_name: SERVER_NAME.to_string(),
            server_version: env!("CARGO_PKG_VERSION").to_string(),
            initialized: AtomicBool::new(false),
        }
    }

    /// Whether a client completed `initialize`
    pub fn is_initialized(&self) -> bool {
        self.initialized.load(Ordering::Acquire)
    }

    /// Handle an incoming message
    pub async fn handle(&self, message: McpMessage) -> Option<McpMessage> {
        match (message.method.as_deref(), message.id.clone()) {
            (Some(method), Some(id)) => {
                debug!("Handling request: {}", method);

                let result = match method {
                    "initialize" => self.handle_initialize(message.params),
                    "ping" => Ok(serde_json::json!({})),
                    "tools/list" => self.handle_tools_list(),
                    "tools/call" => self.handle_tools_call(message.params).await,
                    _ => Err(McpError::method_not_found()),
                };

                Some(match result {
                    Ok(result) => McpMessage::response(id, result),
                    Err(error) => McpMessage::error_response(Some(id), error),
                })
            }
            (Some(method), None) => {
                match method {
                    "notifications/initialized" | "initialized" => {
                        info!("Client initialized");
                    }
                    "notifications/cancelled" => {
                        // In-flight backend calls run to completion regardless
                        debug!("Request cancelled");
                    }
                    _ => {
                        debug!("Unknown notification: {}", method);
                    }
                }
                None
            }
            (None, id) if message.is_response() => {
                debug!("Ignoring client response {:?}", id);
                None
            }
            (None, id) => {
                warn!("Received message with neither method nor result");
                Some(McpMessage::error_response(
                    Some(id.unwrap_or(Value::Null)),
                    McpError::invalid_request(),
                ))
            }
        }
    }

    /// Handle initialize request
    fn handle_initialize(&self, params: Option<Value>) -> Result<Value, McpError> {
        let params: InitializeParams = params
            .map(serde_json::from_value)
            .transpose()
            .map_err(|e| McpError::invalid_params(e.to_string()))?
            .ok_or_else(|| McpError::invalid_params("Missing params"))?;

        info!(
            "Initializing session with client: {} v{} (protocol {})",
            params.client_info.name, params.client_info.version, params.protocol_version
        );
        debug!("Client capabilities: {}", params.capabilities);

        self.initialized.store(true, Ordering::Release);

        let result = InitializeResult {
            protocol_version: MCP_VERSION.to_string(),
            capabilities: ServerCapabilities::with_tools(),
            server_info: ServerInfo {
                name: self.server_name.clone(),
                version: self.server_version.clone(),
            },
        };

        serde_json::to_value(result).map_err(|e| McpError::internal_error(e.to_string()))
    }

    /// Handle tools/list request
    fn handle_tools_list(&self) -> Result<Value, McpError> {
        let result = ToolsListResult {
            tools: ToolName::definitions(),
        };
        serde_json::to_value(result).map_err(|e| McpError::internal_error(e.to_string()))
    }

    /// Handle tools/call request
    async fn handle_tools_call(&self, params: Option<Value>) -> Result<Value, McpError> {
        let params: ToolCallParams = params
            .map(serde_json::from_value)
            .transpose()
            .map_err(|e| McpError::invalid_params(e.to_string()))?
            .ok_or_else(|| McpError::invalid_params("Missing params"))?;

        debug!("Calling tool: {}", params.name);

        let result = self
            .tool_executor
            .execute(&params.name, params.arguments)
            .await?;

        serde_json::to_value(result).map_err(|e| McpError::internal_error(e.to_string()))
    }
}
