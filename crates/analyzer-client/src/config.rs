//! Client configuration

use std::time::Duration;
use tracing::debug;
use url::Url;

use crate::error::ApiResult;

/// Origin of the hosted wallet analyzer backend
pub const DEFAULT_BASE_URL: &str = "https://wallet-analyzer-lovat.vercel.app";

/// Backend client configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Backend origin without a trailing slash
    base_url: String,
    /// Request timeout (None = reqwest default, i.e. no timeout)
    pub timeout: Option<Duration>,
}

impl ClientConfig {
    /// Create a configuration for the given backend origin
    pub fn new(base_url: &str) -> ApiResult<Self> {
        let trimmed = base_url.trim().trim_end_matches('/');
        Url::parse(trimmed)?;
        debug!("Backend origin: {}", trimmed);

        Ok(Self {
            base_url: trimmed.to_string(),
            timeout: None,
        })
    }

    /// Set a request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Backend origin
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: None,
        }
    }
}
