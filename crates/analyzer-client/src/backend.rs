//! Backend transport

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::config::ClientConfig;
use crate::error::ApiResult;
use crate::request::{BackendRequest, HttpMethod};

/// Sends requests to the wallet analyzer backend
#[async_trait]
pub trait Backend: Send + Sync {
    /// Send a request and return the response body parsed as JSON
    async fn send(&self, request: BackendRequest) -> ApiResult<Value>;

    /// Get a human-readable name for this backend
    fn backend_name(&self) -> &str;
}

/// reqwest-based backend talking to a real HTTP origin
pub struct HttpBackend {
    config: ClientConfig,
    client: Client,
}

impl HttpBackend {
    /// Create a new HTTP backend
    pub fn new(config: ClientConfig) -> ApiResult<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self { config, client })
    }
}

#[async_trait]
impl Backend for HttpBackend {
    async fn send(&self, request: BackendRequest) -> ApiResult<Value> {
        let url = request.url(self.config.base_url())?;

        let method = match request.method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
        };

        info!("Executing {} {}", method, url);

        let mut builder = self
            .client
            .request(method, url)
            .header(CONTENT_TYPE, "application/json");

        if let Some(body) = &request.body {
            debug!("Request body: {}", body);
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status = response.status();
        let response_text = response.text().await?;

        debug!("Response status: {}", status);

        // Error statuses still carry JSON bodies; they are relayed unchanged
        if !status.is_success() {
            warn!("Backend answered {} for {}", status, request.path);
        }

        Ok(serde_json::from_str(&response_text)?)
    }

    fn backend_name(&self) -> &str {
        self.config.base_url()
    }
}
