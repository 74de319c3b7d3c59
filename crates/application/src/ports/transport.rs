//! HTTP transport port.

use async_trait::async_trait;
use thiserror::Error;
use vitae_domain::{ApiRequest, ApiResponse};

/// Failures that occur before a response exists.
///
/// Anything the server actually answered, including error statuses,
/// comes back as an [`ApiResponse`] instead.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The request URL could not be parsed.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// The request timed out.
    #[error("request timed out after {timeout_ms} ms")]
    Timeout {
        /// Configured timeout in milliseconds.
        timeout_ms: u64,
    },

    /// The connection could not be established.
    #[error("connection failed: {0}")]
    Connection(String),

    /// The request body could not be constructed.
    #[error("invalid request body: {0}")]
    InvalidBody(String),

    /// Any other transport failure.
    #[error("transport error: {0}")]
    Other(String),
}

/// Port for dispatching HTTP requests to the backend.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Sends the request and returns the raw response.
    ///
    /// # Errors
    ///
    /// Returns a [`TransportError`] when no response was obtained.
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError>;
}
