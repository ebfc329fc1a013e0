//! Web route handlers for the jbpub gateway.

use askama::Template;
use axum::{
    extract::{FromRef, Query, State},
    response::{Html, IntoResponse},
    routing::get,
    Json, Router,
};
use jbpub_client::{LinkGenerator, Resolve};
use jbpub_types::PublicBase;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::error::WebError;
use crate::templates::IndexTemplate;

/// Shared state for web routes.
#[derive(Clone)]
pub struct WebState {
    /// Base that share links are built under.
    pub base: PublicBase,
    /// Resolver used to classify submitted references.
    pub resolver: Arc<dyn Resolve>,
}

/// Create the web router.
pub fn web_routes<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
    WebState: FromRef<S>,
{
    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .fallback(not_found)
}

/// Creates the full gateway router with request tracing.
pub fn create_router(state: WebState) -> Router {
    web_routes()
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Query parameters for the link generator page.
#[derive(Debug, Default, Deserialize)]
pub struct IndexQuery {
    /// Raw input field text.
    #[serde(default)]
    pub repo: String,
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

/// Link generator page.
///
/// Without JavaScript there is no keystroke stream to debounce: a submitted
/// form is already settled, so the reference is resolved right away.
async fn index(
    State(state): State<WebState>,
    Query(query): Query<IndexQuery>,
) -> Result<impl IntoResponse, WebError> {
    let mut generator = LinkGenerator::new(state.base.clone());
    generator.set_input(&query.repo);

    let reference = generator.reference().clone();
    if let Some(ticket) = generator.settle(&reference) {
        let answer = state.resolver.resolve(ticket.reference()).await;
        tracing::info!(
            %reference,
            certainty = ?answer.as_ref().map(|a| a.certainty),
            "Resolved submitted reference"
        );
        generator.apply(ticket, answer);
    }

    let template = IndexTemplate::new(query.repo, generator.view());
    Ok(Html(template.render()?))
}

/// Liveness probe.
async fn health() -> impl IntoResponse {
    Json(HealthResponse {
        status: "up",
        version: env!("CARGO_PKG_VERSION"),
    })
}

async fn not_found(uri: axum::http::Uri) -> WebError {
    WebError::NotFound(format!("No page at '{}'", uri.path()))
}
