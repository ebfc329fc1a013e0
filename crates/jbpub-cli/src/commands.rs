//! CLI command implementations.

use std::sync::Arc;

use jbpub_client::{spawn_session, ApiError, Resolve, ResolverClient};
use jbpub_types::{normalize, Label, LinkError, LinkView};
use jbpub_web::{create_router, WebState};
use thiserror::Error;
use tokio::io::{AsyncBufReadExt, BufReader};
use validator::Validate;

use crate::settings::Settings;

/// CLI errors.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("invalid configuration: {0}")]
    Invalid(#[from] validator::ValidationErrors),

    #[error("invalid base URL: {0}")]
    Link(#[from] LinkError),

    #[error("resolver error: {0}")]
    Api(#[from] ApiError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CliError>;

fn resolver_client(settings: &Settings) -> Result<ResolverClient> {
    settings.validate()?;
    Ok(ResolverClient::new(
        settings.resolver_base()?,
        settings.request_timeout(),
    )?)
}

/// Prints the share link for a raw input.
pub fn link(settings: &Settings, input: &str) -> Result<()> {
    settings.validate()?;
    let base = settings.public_base()?;
    let reference = normalize(input);

    match base.share_link(&reference) {
        Some(url) => println!("{url}"),
        None => println!("(no link: input is empty or unusable)"),
    }
    Ok(())
}

/// Resolves a raw input once and prints the outcome.
pub async fn resolve(settings: &Settings, input: &str, json: bool) -> Result<()> {
    let client = resolver_client(settings)?;
    let reference = normalize(input);
    tracing::info!(%reference, "Resolving reference");

    let answer = client.try_resolve(&reference).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&answer)?);
        return Ok(());
    }

    println!("Reference: {reference}");
    println!("Certainty: {}", answer.certainty);
    println!("Kind:      {}", answer.kind);
    for (name, value) in &answer.data {
        println!("  {name}: {value}");
    }
    if let Some(url) = settings.public_base()?.share_link(&reference) {
        println!("Link:      {url}");
    }
    Ok(())
}

/// Reads lines from stdin as keystrokes and prints the latest view whenever it changes.
///
/// Views that are superseded before they are printed are skipped.
pub async fn watch(settings: &Settings) -> Result<()> {
    let client = resolver_client(settings)?;
    let base = settings.public_base()?;
    let resolver: Arc<dyn Resolve> = Arc::new(client);

    let mut session = spawn_session(base, resolver, settings.debounce());
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut input = Some(session.input);

    loop {
        tokio::select! {
            line = lines.next_line(), if input.is_some() => {
                match line? {
                    Some(line) => {
                        if let Some(tx) = &input {
                            if tx.send(line).await.is_err() {
                                input = None;
                            }
                        }
                    }
                    None => input = None,
                }
            }
            changed = session.views.changed() => {
                if changed.is_err() {
                    break;
                }
                println!("{}", render_view(&session.views.borrow_and_update()));
            }
        }
    }

    if let Err(e) = session.task.await {
        tracing::warn!(error = %e, "Session task ended abnormally");
    }
    Ok(())
}

/// Runs the web gateway until interrupted.
pub async fn serve(settings: &Settings) -> Result<()> {
    let client = resolver_client(settings)?;
    let state = WebState {
        base: settings.public_base()?,
        resolver: Arc::new(client),
    };

    let listener = tokio::net::TcpListener::bind(settings.listen_addr).await?;
    tracing::info!(
        addr = %settings.listen_addr,
        base = %state.base,
        "Web gateway listening"
    );

    axum::serve(listener, create_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Web gateway stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
}

/// Shows the effective configuration and whether the resolver is up.
pub async fn status(settings: &Settings) -> Result<()> {
    let client = resolver_client(settings)?;

    println!("Base URL:     {}", settings.public_base()?);
    println!("Resolver:     {}", client.base());
    println!("Debounce:     {} ms", settings.debounce_ms);
    println!("Timeout:      {} s", settings.request_timeout_secs);

    match client.health().await {
        Ok(true) => println!("Resolver health: up"),
        Ok(false) => println!("Resolver health: unhealthy"),
        Err(e) => println!("Resolver health: unreachable ({e})"),
    }
    Ok(())
}

/// Prints version information.
pub fn version() {
    println!("jbpub {}", env!("CARGO_PKG_VERSION"));
}

/// One-line terminal rendering of a view.
pub fn render_view(view: &LinkView) -> String {
    let label = match &view.label {
        Label::Placeholder { text } => text.clone(),
        Label::Badge { kind, fields } => {
            let values: Vec<&str> = fields.iter().map(|f| f.value.as_str()).collect();
            if values.is_empty() {
                format!("[{kind}]")
            } else {
                format!("[{kind}] {}", values.join(" "))
            }
        }
    };
    let link = view.share_link.as_deref().unwrap_or("-");
    let go = if view.can_go { "go" } else { "no-go" };

    format!("{:<17} {label} | {link} ({go})", view.state.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use jbpub_types::{InlineField, UiState};

    #[test]
    fn test_render_empty_view() {
        let line = render_view(&LinkView::empty());
        assert!(line.starts_with("empty"));
        assert!(line.contains("Enter your repository URL here"));
        assert!(line.ends_with("| - (no-go)"));
    }

    #[test]
    fn test_render_positive_view() {
        let view = LinkView {
            state: UiState::ResolvedPositive,
            label: Label::Badge {
                kind: "GitHub".to_string(),
                fields: vec![
                    InlineField {
                        name: "owner".to_string(),
                        value: "a".to_string(),
                    },
                    InlineField {
                        name: "repo".to_string(),
                        value: "b".to_string(),
                    },
                ],
            },
            share_link: Some("https://jupyterbook.pub/repo/x/".to_string()),
            can_go: true,
            can_copy: true,
        };

        let line = render_view(&view);
        assert!(line.starts_with("resolved-positive"));
        assert!(line.contains("[GitHub] a b"));
        assert!(line.ends_with("https://jupyterbook.pub/repo/x/ (go)"));
    }

    #[test]
    fn test_link_rejects_invalid_base() {
        let settings = Settings {
            base_url: "not a url".to_string(),
            ..Settings::default()
        };
        assert!(matches!(
            link(&settings, "github.com/a/b"),
            Err(CliError::Invalid(_))
        ));
    }
}
