//! Execute MCP tools by forwarding them to the analyzer backend

use analyzer_client::{
    ApiError, ApiResult, Backend, BackendRequest, Endpoint, LeaderboardQuery, PnlQuery,
    TokenMints, TokenSearch, TopTokensQuery, TransactionSignatures,
};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::{debug, warn};

use super::registry::ToolName;
use crate::protocol::{McpError, ToolCallResult};

/// Tool arguments nested under a `params` object
#[derive(Deserialize)]
struct Params<T> {
    params: T,
}

/// Executor for MCP tools
pub struct ToolExecutor {
    backend: Arc<dyn Backend>,
}

impl ToolExecutor {
    /// Create a new tool executor
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        Self { backend }
    }

    /// Execute a tool by name
    ///
    /// Unknown tools and schema violations are protocol errors and never reach
    /// the backend. Everything after validation ends up in the tool result.
    pub async fn execute(
        &self,
        tool_name: &str,
        arguments: Option<Value>,
    ) -> Result<ToolCallResult, McpError> {
        let tool = ToolName::from_name(tool_name)
            .ok_or_else(|| McpError::invalid_params(format!("Tool {} not found", tool_name)))?;

        let arguments = arguments.unwrap_or_else(|| Value::Object(Map::new()));
        let request = prepare(tool, arguments).map_err(|e| {
            McpError::invalid_params(format!("Invalid arguments for tool {}: {}", tool, e))
        })?;

        debug!(
            "Executing tool {} -> {} {}",
            tool, request.method, request.path
        );

        Ok(self.dispatch(request).await)
    }

    /// Send a request and wrap the outcome as a single text item
    ///
    /// Success yields the pretty-printed JSON body, any failure yields
    /// `Error: <message>`.
    pub async fn dispatch(&self, request: BackendRequest) -> ToolCallResult {
        let path = request.path.clone();
        let outcome = match self.backend.send(request).await {
            Ok(value) => serde_json::to_string_pretty(&value).map_err(ApiError::from),
            Err(e) => Err(e),
        };

        match outcome {
            Ok(text) => ToolCallResult::text(text),
            Err(e) => {
                warn!(
                    "Request to {} via {} failed: {}",
                    path,
                    self.backend.backend_name(),
                    e
                );
                ToolCallResult::text(format!("Error: {}", e))
            }
        }
    }
}

/// Validate the arguments of a tool and map them onto a backend request
fn prepare(tool: ToolName, arguments: Value) -> ApiResult<BackendRequest> {
    match tool {
        ToolName::ParseTransactions => build::<TransactionSignatures>(arguments),
        ToolName::QueryPnls => build_params::<PnlQuery>(arguments),
        ToolName::GetTokenDetailsFromMints => build_params::<TokenMints>(arguments),
        ToolName::GetTokenMint => build_params::<TokenSearch>(arguments),
        ToolName::GetTopTokens => build_params::<TopTokensQuery>(arguments),
        ToolName::GetLeaderboard => build_params::<LeaderboardQuery>(arguments),
    }
}

fn build<E: Endpoint + DeserializeOwned>(arguments: Value) -> ApiResult<BackendRequest> {
    let input: E = serde_json::from_value(arguments)?;
    input.to_request()
}

fn build_params<E: Endpoint + DeserializeOwned>(arguments: Value) -> ApiResult<BackendRequest> {
    let Params { params } = serde_json::from_value::<Params<E>>(arguments)?;
    params.to_request()
}
