//! # analyzer-client
//!
//! Client for the Solana Wallet Analyzer backend.
//! Defines the typed inputs of every backend endpoint, maps them onto HTTP
//! requests and sends them through a pluggable [`Backend`].

mod backend;
mod config;
mod error;
mod request;
mod types;

pub use backend::{Backend, HttpBackend};
pub use config::{ClientConfig, DEFAULT_BASE_URL};
pub use error::{ApiError, ApiResult};
pub use request::{BackendRequest, Endpoint, HttpMethod};
pub use types::*;
