//! HTTP transport for MCP

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::{debug, info};

use crate::protocol::{McpMessage, RequestHandler};

/// HTTP transport for MCP protocol
pub struct HttpTransport {
    handler: Arc<RequestHandler>,
    port: u16,
}

impl HttpTransport {
    /// Create a new HTTP transport
    pub fn new(handler: Arc<RequestHandler>, port: u16) -> Self {
        Self { handler, port }
    }

    /// Run the HTTP server
    pub async fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        let app = router(self.handler.clone());

        let addr = format!("0.0.0.0:{}", self.port);
        info!("Starting MCP HTTP server on {}", addr);

        let listener = tokio::net::TcpListener::bind(&addr).await?;
        axum::serve(listener, app).await?;

        Ok(())
    }
}

/// Routes served by the HTTP transport
pub(crate) fn router(handler: Arc<RequestHandler>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(health))
        .route("/health", get(health))
        .route("/mcp", post(handle_mcp_request))
        .layer(cors)
        .with_state(handler)
}

/// Health check endpoint
async fn health() -> &'static str {
    "OK"
}

/// Handle MCP JSON-RPC request via HTTP POST
async fn handle_mcp_request(
    State(handler): State<Arc<RequestHandler>>,
    Json(message): Json<McpMessage>,
) -> Json<McpMessage> {
    debug!("HTTP request: {:?}", message.method);

    match handler.handle(message).await {
        Some(response) => Json(response),
        // Notifications still need a body over HTTP
        None => Json(McpMessage::response(
            serde_json::Value::Null,
            serde_json::json!({}),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::mock::MockBackend;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn post_mcp(body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/mcp")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let backend = Arc::new(MockBackend::replying(json!({})));
        let app = router(Arc::new(RequestHandler::new(backend)));

        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&bytes[..], b"OK");
    }

    #[tokio::test]
    async fn test_tools_call_over_http() {
        let backend = Arc::new(MockBackend::replying(json!({ "ok": true })));
        let app = router(Arc::new(RequestHandler::new(backend)));

        let response = app
            .oneshot(post_mcp(json!({
                "jsonrpc": "2.0",
                "id": 1,
                "method": "tools/call",
                "params": { "name": "queryPnls", "arguments": { "params": {} } }
            })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["id"], 1);
        assert_eq!(body["result"]["content"][0]["text"], "{\n  \"ok\": true\n}");
    }

    #[tokio::test]
    async fn test_notification_over_http() {
        let backend = Arc::new(MockBackend::replying(json!({})));
        let app = router(Arc::new(RequestHandler::new(backend)));

        let response = app
            .oneshot(post_mcp(json!({
                "jsonrpc": "2.0",
                "method": "notifications/initialized"
            })))
            .await
            .unwrap();

        let body = body_json(response).await;
        assert_eq!(body["id"], Value::Null);
        assert_eq!(body["result"], json!({}));
    }
}
