//! The fixed set of tools served to MCP clients

use analyzer_client::{DEFAULT_PNL_LIMIT, MAX_PNL_LIMIT, MIN_PNL_LIMIT};
use serde_json::{json, Map, Value};

use crate::protocol::{McpInputSchema, McpTool};

/// Tools exposed by the server, one per backend endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolName {
    ParseTransactions,
    QueryPnls,
    GetTokenDetailsFromMints,
    GetTokenMint,
    GetTopTokens,
    GetLeaderboard,
}

impl ToolName {
    /// All tools, in the order `tools/list` reports them
    pub const ALL: [ToolName; 6] = [
        ToolName::ParseTransactions,
        ToolName::QueryPnls,
        ToolName::GetTokenDetailsFromMints,
        ToolName::GetTokenMint,
        ToolName::GetTopTokens,
        ToolName::GetLeaderboard,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ToolName::ParseTransactions => "parseTransactions",
            ToolName::QueryPnls => "queryPnls",
            ToolName::GetTokenDetailsFromMints => "getTokenDetailsFromMints",
            ToolName::GetTokenMint => "getTokenMint",
            ToolName::GetTopTokens => "getTopTokens",
            ToolName::GetLeaderboard => "getLeaderboard",
        }
    }

    /// Look up a tool by its wire name (case-sensitive)
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|tool| tool.as_str() == name)
    }

    pub fn description(&self) -> &'static str {
        match self {
            ToolName::ParseTransactions => {
                "Parse transactions to human readable format from the transaction signature"
            }
            ToolName::QueryPnls => "Query Pnls of wallet(s) on token(s)",
            ToolName::GetTokenDetailsFromMints => {
                "Get token details from mint(s) like name/symbol to be use alongside the mint when mentionning the token"
            }
            ToolName::GetTokenMint => {
                "Get token mint from name or symbol, if result is unique then get the mint otherwise return the list of tokens (mint, name, symbol) for the user to choose from"
            }
            ToolName::GetTopTokens => "Get top token by their pnls over all the wallets",
            ToolName::GetLeaderboard => "Get leaderboard of wallets by realised profit",
        }
    }

    /// JSON Schema of the tool's `arguments` object
    pub fn input_schema(&self) -> McpInputSchema {
        let mut properties = Map::new();

        match self {
            // The only tool taking its fields at the top level
            ToolName::ParseTransactions => {
                properties.insert(
                    "signatures".to_string(),
                    json!({ "type": "array", "items": { "type": "string" } }),
                );
                object_schema(properties, &["signatures"])
            }
            ToolName::QueryPnls => {
                properties.insert(
                    "filter".to_string(),
                    json!({
                        "type": "object",
                        "properties": {
                            "wallet": { "type": "string" },
                            "token": { "type": "string" }
                        },
                        "additionalProperties": {},
                        "description": "Filters like token/wallet",
                        "default": {}
                    }),
                );
                properties.insert(
                    "limit".to_string(),
                    json!({
                        "type": "integer",
                        "minimum": MIN_PNL_LIMIT,
                        "maximum": MAX_PNL_LIMIT,
                        "description": "Maximum documents to return",
                        "default": DEFAULT_PNL_LIMIT
                    }),
                );
                properties.insert(
                    "projection".to_string(),
                    open_map("Fields to include/exclude"),
                );
                properties.insert(
                    "sort".to_string(),
                    open_map("Sort elements by either usd or pnl in ascending or descending order"),
                );
                params_schema(properties, &[])
            }
            ToolName::GetTokenDetailsFromMints => {
                properties.insert(
                    "mints".to_string(),
                    json!({ "type": "array", "items": { "type": "string" } }),
                );
                params_schema(properties, &["mints"])
            }
            ToolName::GetTokenMint => {
                properties.insert("name".to_string(), json!({ "type": "string" }));
                params_schema(properties, &[])
            }
            ToolName::GetTopTokens => {
                properties.insert("limit".to_string(), json!({ "type": "number" }));
                properties.insert("minTrades".to_string(), json!({ "type": "number" }));
                params_schema(properties, &["limit", "minTrades"])
            }
            ToolName::GetLeaderboard => {
                properties.insert("limit".to_string(), json!({ "type": "number" }));
                params_schema(properties, &["limit"])
            }
        }
    }

    /// Full MCP tool definition
    pub fn definition(&self) -> McpTool {
        McpTool {
            name: self.as_str().to_string(),
            description: Some(self.description().to_string()),
            input_schema: self.input_schema(),
        }
    }

    /// Definitions of every tool
    pub fn definitions() -> Vec<McpTool> {
        Self::ALL.iter().map(ToolName::definition).collect()
    }
}

impl std::fmt::Display for ToolName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

fn open_map(description: &str) -> Value {
    json!({
        "type": "object",
        "additionalProperties": {},
        "description": description,
        "default": {}
    })
}

fn object_schema(properties: Map<String, Value>, required: &[&str]) -> McpInputSchema {
    McpInputSchema {
        schema_type: "object".to_string(),
        properties: Some(properties),
        required: if required.is_empty() {
            None
        } else {
            Some(required.iter().map(|r| r.to_string()).collect())
        },
    }
}

/// Wrap the tool's fields in a required `params` object
fn params_schema(properties: Map<String, Value>, required: &[&str]) -> McpInputSchema {
    let mut params = Map::new();
    params.insert("type".to_string(), json!("object"));
    params.insert("properties".to_string(), Value::Object(properties));
    if !required.is_empty() {
        params.insert("required".to_string(), json!(required));
    }

    let mut outer = Map::new();
    outer.insert("params".to_string(), Value::Object(params));
    object_schema(outer, &["params"])
}
