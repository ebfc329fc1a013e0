//! # Resolver Client
//!
//! HTTP client for the repository resolution endpoint.

use std::time::Duration;

use async_trait::async_trait;
use jbpub_types::{Answer, PublicBase, RepoReference};
use reqwest::Client;

use super::error::{ApiError, ApiResult};
use super::Resolve;

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP client for `GET /api/v1/resolve?q=<reference>`.
///
/// Issues exactly one request per call: no retries and no caching. The
/// client is cheaply cloneable and can be shared across tasks.
///
/// # Examples
///
/// ```rust,ignore
/// use jbpub_client::ResolverClient;
/// use jbpub_types::{normalize, PublicBase};
///
/// let base = PublicBase::parse("https://jupyterbook.pub")?;
/// let client = ResolverClient::new(base, DEFAULT_TIMEOUT)?;
///
/// if let Some(answer) = client.resolve(&normalize("github.com/a/b")).await {
///     println!("{} ({})", answer.kind, answer.certainty);
/// }
/// ```
#[derive(Clone)]
pub struct ResolverClient {
    base: PublicBase,
    http: Client,
}

impl ResolverClient {
    /// Creates a client for the resolver served under `base`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Network`] if the HTTP client cannot be built.
    pub fn new(base: PublicBase, timeout: Duration) -> ApiResult<Self> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self { base, http })
    }

    /// Returns the configured resolver base.
    #[must_use]
    pub fn base(&self) -> &PublicBase {
        &self.base
    }

    /// Checks if the resolver host is reachable and healthy.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Network`] if the request fails.
    pub async fn health(&self) -> ApiResult<bool> {
        let res = self.http.get(self.base.health_endpoint()).send().await?;
        Ok(res.status().is_success())
    }

    /// Asks the resolver about a reference.
    ///
    /// # Errors
    ///
    /// * [`ApiError::EmptyReference`] - Nothing to ask about
    /// * [`ApiError::Network`] - Request failed or timed out
    /// * [`ApiError::Endpoint`] - Resolver answered with a non-success status
    /// * [`ApiError::InvalidResponse`] - Body is not a valid answer
    pub async fn try_resolve(&self, reference: &RepoReference) -> ApiResult<Answer> {
        if reference.is_empty() {
            return Err(ApiError::EmptyReference);
        }

        let res = self
            .http
            .get(self.base.resolve_endpoint())
            .query(&[("q", reference.as_str())])
            .send()
            .await?;

        if !res.status().is_success() {
            return Err(ApiError::Endpoint {
                status: res.status().as_u16(),
                message: res.text().await.unwrap_or_default(),
            });
        }

        let body = res.bytes().await?;
        Answer::from_slice(&body).map_err(|e| ApiError::InvalidResponse(e.to_string()))
    }
}

#[async_trait]
impl Resolve for ResolverClient {
    async fn resolve(&self, reference: &RepoReference) -> Option<Answer> {
        match self.try_resolve(reference).await {
            Ok(answer) => {
                tracing::debug!(%reference, kind = %answer.kind, certainty = %answer.certainty, "Resolved");
                Some(answer)
            }
            Err(e) => {
                tracing::debug!(%reference, error = %e, "No answer from resolver");
                None
            }
        }
    }
}
