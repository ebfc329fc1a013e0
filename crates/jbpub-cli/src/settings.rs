//! Layered configuration: defaults, optional file, `JBPUB_*` environment, flags.

use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;

use jbpub_types::{LinkError, PublicBase, DEFAULT_DEBOUNCE_MS};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Environment variable prefix, e.g. `JBPUB_BASE_URL`.
pub const ENV_PREFIX: &str = "JBPUB";

/// jbpub settings.
#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
#[serde(default)]
pub struct Settings {
    /// Public base URL share links are built under.
    #[validate(url)]
    pub base_url: String,

    /// Base URL of the resolution endpoint; defaults to `base_url`.
    #[validate(url)]
    pub resolver_url: Option<String>,

    /// Address the web gateway listens on.
    pub listen_addr: SocketAddr,

    /// Quiescence window before a typed reference is resolved.
    #[validate(range(min = 1, max = 60_000))]
    pub debounce_ms: u64,

    /// Per-request resolver timeout.
    #[validate(range(min = 1, max = 600))]
    pub request_timeout_secs: u64,

    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// `pretty` or `json`.
    pub log_format: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:9200/".to_string(),
            resolver_url: None,
            listen_addr: SocketAddr::from(([127, 0, 0, 1], 9200)),
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            request_timeout_secs: 30,
            log_level: "info".to_string(),
            log_format: "pretty".to_string(),
        }
    }
}

impl Settings {
    /// Loads settings from an optional file overlaid with `JBPUB_*` variables.
    ///
    /// A missing file is not an error; a malformed one is.
    pub fn load(path: Option<&Path>) -> Result<Self, config::ConfigError> {
        let mut builder = config::Config::builder();

        if let Some(path) = path {
            tracing::debug!(path = %path.display(), "Loading configuration file");
            builder = builder.add_source(config::File::from(path).required(false));
        }

        builder
            .add_source(config::Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()?
            .try_deserialize()
    }

    /// Parsed public base.
    pub fn public_base(&self) -> Result<PublicBase, LinkError> {
        PublicBase::parse(&self.base_url)
    }

    /// Parsed resolver base, falling back to the public base.
    pub fn resolver_base(&self) -> Result<PublicBase, LinkError> {
        PublicBase::parse(self.resolver_url.as_deref().unwrap_or(&self.base_url))
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
