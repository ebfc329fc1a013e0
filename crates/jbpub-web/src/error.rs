//! Error types for the web gateway.

use askama::Template;
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use thiserror::Error;

use crate::templates::ErrorTemplate;

/// Web gateway errors.
#[derive(Debug, Error)]
pub enum WebError {
    /// Resource not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// Template rendering error.
    #[error("template error: {0}")]
    Template(String),
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            WebError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            WebError::Template(msg) => {
                tracing::error!(error = %msg, "Template rendering failed");
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
        };

        let page = ErrorTemplate {
            status: status.as_u16(),
            message,
        };
        match page.render() {
            Ok(html) => (status, Html(html)).into_response(),
            Err(e) => {
                tracing::error!(error = %e, "Error page rendering failed");
                (status, page.message).into_response()
            }
        }
    }
}

impl From<askama::Error> for WebError {
    fn from(err: askama::Error) -> Self {
        WebError::Template(err.to_string())
    }
}
