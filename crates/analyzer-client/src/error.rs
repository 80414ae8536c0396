//! Error types for the analyzer client

use thiserror::Error;

/// Result type alias for backend operations
pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// Backend client error types
///
/// Transport and decoding variants display the bare underlying message, so
/// callers can prefix it without doubling up on wording.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Request(#[from] reqwest::Error),

    #[error("{0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("{0}")]
    InvalidInput(String),

    /// Failure reported by a [`Backend`](crate::Backend) not built on reqwest
    #[error("{0}")]
    Backend(String),
}
