//! # API Errors
//!
//! Error types for resolver calls.

use thiserror::Error;

/// Errors that can occur while asking the resolution endpoint.
///
/// The link generator never shows these to the user; every variant is
/// treated as "no answer". They exist so callers can log or report them.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Network or HTTP error, including timeouts.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Resolver returned a non-success status.
    #[error("resolver error: {status} - {message}")]
    Endpoint {
        /// HTTP status code.
        status: u16,
        /// Response body, if any.
        message: String,
    },

    /// Resolver answered 2xx with a body of the wrong shape.
    #[error("invalid response format: {0}")]
    InvalidResponse(String),

    /// Nothing to resolve.
    #[error("empty reference")]
    EmptyReference,
}

impl ApiError {
    /// Returns true for request timeouts.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Network(e) if e.is_timeout())
    }
}

/// Result type for API operations.
pub type ApiResult<T> = Result<T, ApiError>;
