//! Share links and endpoint URLs derived from an explicit deployment base.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use thiserror::Error;
use url::Url;

use crate::reference::RepoReference;

/// Characters left alone by `encodeURIComponent`; everything else is escaped.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Path segment under which the rendering service serves books.
pub const REPO_PATH_SEGMENT: &str = "repo/";

/// Path of the resolution endpoint, relative to the resolver base.
pub const RESOLVE_PATH: &str = "api/v1/resolve";

/// Path of the resolver liveness probe, relative to the resolver base.
pub const HEALTH_PATH: &str = "health";

/// Errors building a [`PublicBase`].
#[derive(Debug, Error)]
pub enum LinkError {
    /// The base URL could not be parsed.
    #[error("invalid base url '{url}': {source}")]
    InvalidBase {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// The base URL cannot carry a path (e.g. `mailto:`).
    #[error("base url '{0}' cannot be used as a base")]
    CannotBeABase(String),
}

/// Percent-encodes a whole reference as a single path segment.
///
/// Path separators are escaped too, so `a b/c` becomes `a%20b%2Fc`.
pub fn encode_component(value: &str) -> String {
    utf8_percent_encode(value, COMPONENT).to_string()
}

/// The public base URL a deployment is served under.
///
/// Always ends with `/`, so relative joins keep any path prefix
/// (`https://host/books` serves links under `https://host/books/repo/...`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicBase(Url);

impl PublicBase {
    /// Parses a base URL.
    pub fn parse(raw: &str) -> Result<Self, LinkError> {
        let url = Url::parse(raw).map_err(|source| LinkError::InvalidBase {
            url: raw.to_string(),
            source,
        })?;
        Self::from_url(url)
    }

    /// Wraps a parsed URL, dropping any query or fragment.
    pub fn from_url(mut url: Url) -> Result<Self, LinkError> {
        if url.cannot_be_a_base() {
            return Err(LinkError::CannotBeABase(url.to_string()));
        }
        url.set_query(None);
        url.set_fragment(None);
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }
        Ok(Self(url))
    }

    /// Returns the base URL.
    pub fn as_url(&self) -> &Url {
        &self.0
    }

    /// Builds the shareable link for a reference.
    ///
    /// Returns `None` for the empty reference.
    pub fn share_link(&self, reference: &RepoReference) -> Option<Url> {
        if reference.is_empty() {
            return None;
        }
        let relative = format!(
            "{REPO_PATH_SEGMENT}{}/",
            encode_component(reference.as_str())
        );
        self.0.join(&relative).ok()
    }

    /// Builds the resolution endpoint URL (without the query).
    pub fn resolve_endpoint(&self) -> Url {
        self.endpoint(RESOLVE_PATH)
    }

    /// Builds the resolver liveness probe URL.
    pub fn health_endpoint(&self) -> Url {
        self.endpoint(HEALTH_PATH)
    }

    fn endpoint(&self, relative: &str) -> Url {
        let mut url = self.0.clone();
        let path = format!("{}{relative}", url.path());
        url.set_path(&path);
        url
    }
}

impl std::fmt::Display for PublicBase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
