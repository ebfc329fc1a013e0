//! # API Client
//!
//! HTTP client for the external resolution endpoint.
//!
//! This module provides the [`ResolverClient`] and the [`Resolve`] seam the
//! session and the web gateway resolve references through.

mod client;
mod error;

use async_trait::async_trait;
use jbpub_types::{Answer, RepoReference};

pub use client::{ResolverClient, DEFAULT_TIMEOUT};
pub use error::{ApiError, ApiResult};

/// Something that can classify a repository reference.
///
/// Failures of any kind are reported as `None`: to the link generator a
/// failed call and a missing answer look the same.
#[async_trait]
pub trait Resolve: Send + Sync {
    /// Resolves a non-empty reference.
    async fn resolve(&self, reference: &RepoReference) -> Option<Answer>;
}
