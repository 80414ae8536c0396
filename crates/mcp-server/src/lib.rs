//! # wallet-analyzer-mcp
//!
//! MCP (Model Context Protocol) server for the Solana Wallet Analyzer.
//! Exposes the analyzer backend endpoints as tools over stdio or HTTP.

pub mod protocol;
mod server;
pub mod tools;
pub mod transport;

pub use protocol::{McpError, McpMessage, RequestHandler, ServerCapabilities};
pub use server::{McpServer, ServerMode};
pub use tools::{ToolExecutor, ToolName};
pub use transport::{HttpTransport, StdioTransport};
