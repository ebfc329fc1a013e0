//! Repository references typed into the link generator.

use serde::{Deserialize, Serialize};
use url::Url;

/// Scheme prefix assumed for host-relative input such as `github.com/a/b`.
pub const SECURE_SCHEME_PREFIX: &str = "https://";

/// A normalized repository locator.
///
/// Either a best-effort absolute URL or the empty reference, which stands for
/// "nothing usable was typed".
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RepoReference(String);

impl RepoReference {
    /// The empty reference.
    pub const fn empty() -> Self {
        Self(String::new())
    }

    /// Wraps an already-normalized value without touching it.
    pub fn from_normalized(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns true for the empty reference.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the reference text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parses the reference as a URL, if it is one.
    pub fn to_url(&self) -> Option<Url> {
        Url::parse(&self.0).ok()
    }
}

impl std::fmt::Display for RepoReference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for RepoReference {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Normalizes raw input field text into a [`RepoReference`].
///
/// - text that already parses as an absolute URL is returned unchanged;
/// - text without the `https://` prefix gets it prepended and is accepted
///   as is;
/// - text that carries the prefix yet still fails to parse is rejected and
///   yields the empty reference.
///
/// Blank input yields the empty reference.
///
/// # Examples
///
/// ```
/// use jbpub_types::normalize;
///
/// assert_eq!(normalize("github.com/a/b").as_str(), "https://github.com/a/b");
/// assert_eq!(normalize("https://zenodo.org/records/1").as_str(), "https://zenodo.org/records/1");
/// assert!(normalize("https://").is_empty());
/// ```
pub fn normalize(raw: &str) -> RepoReference {
    if raw.trim().is_empty() {
        return RepoReference::empty();
    }

    if Url::parse(raw).is_ok() {
        return RepoReference(raw.to_string());
    }

    if raw.starts_with(SECURE_SCHEME_PREFIX) {
        RepoReference::empty()
    } else {
        RepoReference(format!("{SECURE_SCHEME_PREFIX}{raw}"))
    }
}
