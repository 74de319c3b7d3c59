//! Application error types

use thiserror::Error;
use vitae_domain::{AuthError, DomainError};

use crate::ports::TransportError;

/// Errors surfaced to callers of the API services.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced a response.
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// The session could not be recovered; the caller has been signed out.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// The credential was rejected again after a successful refresh.
    #[error("request was rejected as unauthorized")]
    Unauthorized,

    /// The backend answered with a non-success status.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Message extracted from the response body, or a fallback.
        message: String,
    },

    /// The response body did not match the expected shape.
    #[error("failed to decode response: {0}")]
    Decode(String),

    /// Client-side validation rejected the request before sending.
    #[error(transparent)]
    Validation(#[from] DomainError),
}

/// Result type alias for API operations.
pub type ApiResult<T> = Result<T, ApiError>;
