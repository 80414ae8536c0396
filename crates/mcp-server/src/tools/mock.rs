//! Recording backend used by the server tests

use analyzer_client::{ApiError, ApiResult, Backend, BackendRequest};
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Mutex;

/// Backend that answers every request with the same outcome
pub(crate) struct MockBackend {
    reply: Result<Value, String>,
    requests: Mutex<Vec<BackendRequest>>,
}

impl MockBackend {
    /// Answer with a JSON body
    pub(crate) fn replying(value: Value) -> Self {
        Self {
            reply: Ok(value),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Fail every request with `message`
    pub(crate) fn failing(message: &str) -> Self {
        Self {
            reply: Err(message.to_string()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Requests received so far
    pub(crate) fn requests(&self) -> Vec<BackendRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Backend for MockBackend {
    async fn send(&self, request: BackendRequest) -> ApiResult<Value> {
        self.requests.lock().unwrap().push(request);
        self.reply.clone().map_err(ApiError::Backend)
    }

    fn backend_name(&self) -> &str {
        "mock"
    }
}
