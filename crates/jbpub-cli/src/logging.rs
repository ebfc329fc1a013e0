//! Structured logging initialization.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable output for terminals.
    Pretty,
    /// One JSON object per line.
    Json,
}

impl LogFormat {
    /// Parses a format name; anything other than `json` is pretty.
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "json" => LogFormat::Json,
            _ => LogFormat::Pretty,
        }
    }
}

const LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

/// Raises `base` by one level per `steps`, stopping at `trace`.
///
/// An unrecognized base counts as `info`.
pub fn raise_level(base: &str, steps: u8) -> &'static str {
    let start = LEVELS
        .iter()
        .position(|level| level.eq_ignore_ascii_case(base.trim()))
        .unwrap_or(2);
    LEVELS[(start + usize::from(steps)).min(LEVELS.len() - 1)]
}

/// Default filter directives for a level, used when `RUST_LOG` is unset.
pub fn default_directives(level: &str) -> String {
    format!("jbpub={level},tower_http=debug")
}

/// Installs the global subscriber. Logs go to stderr so command output stays clean.
pub fn init_logging(level: &str, format: LogFormat) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_directives(level).into());

    let registry = tracing_subscriber::registry().with(env_filter);

    match format {
        LogFormat::Json => registry
            .with(
                fmt::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_current_span(true)
                    .with_span_list(false)
                    .with_target(true),
            )
            .init(),
        LogFormat::Pretty => registry
            .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
            .init(),
    }

    tracing::debug!(level = %level, format = ?format, "Logging initialized");
}
