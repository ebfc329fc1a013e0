//! End-to-end tests for the server-rendered link generator page.

use async_trait::async_trait;
use axum::{body::Body, http::Request};
use jbpub_client::Resolve;
use jbpub_types::{Answer, Certainty, PublicBase, RepoReference};
use jbpub_web::{create_router, WebState};
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

/// Answers every reference with a fixed answer and records what it was asked.
struct FixedResolver {
    answer: Option<Answer>,
    calls: Mutex<Vec<String>>,
}

impl FixedResolver {
    fn new(answer: Option<Answer>) -> Arc<Self> {
        Arc::new(Self {
            answer,
            calls: Mutex::new(Vec::new()),
        })
    }
}

#[async_trait]
impl Resolve for FixedResolver {
    async fn resolve(&self, reference: &RepoReference) -> Option<Answer> {
        self.calls.lock().unwrap().push(reference.to_string());
        self.answer.clone()
    }
}

fn create_test_app(resolver: Arc<FixedResolver>, base: &str) -> axum::Router {
    create_router(WebState {
        base: PublicBase::parse(base).unwrap(),
        resolver,
    })
}

async fn get_html(app: axum::Router, uri: &str) -> (u16, String) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    let status = response.status().as_u16();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, String::from_utf8(body.to_vec()).unwrap())
}

#[tokio::test]
async fn test_empty_page_disables_actions() {
    let resolver = FixedResolver::new(None);
    let app = create_test_app(resolver.clone(), "https://jupyterbook.pub");

    let (status, html) = get_html(app, "/").await;

    assert_eq!(status, 200);
    assert!(html.contains(r#"data-state="empty""#));
    assert!(html.contains("Enter your repository URL here"));
    assert!(html.contains(
        r#"<a href="https://github.com/yuvipanda/jupyterbook.pub/issues" id="file-issues">File Issues</a>"#
    ));
    assert!(html.contains(r#"id="go" type="button" disabled"#));
    assert!(html.contains(r#"id="copy" type="button" disabled"#));
    assert!(resolver.calls.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_existing_repository_shows_badge_and_link() {
    let answer = Answer::new(Certainty::Exists, "GitHub")
        .with_field("owner", "a")
        .with_field("repo", "b");
    let resolver = FixedResolver::new(Some(answer));
    let app = create_test_app(resolver.clone(), "https://jupyterbook.pub");

    let (status, html) = get_html(app, "/?repo=github.com%2Fa%2Fb").await;

    assert_eq!(status, 200);
    assert!(html.contains(r#"data-state="resolved-positive""#));
    assert!(html.contains(r#"id="repo-kind">GitHub</span>"#));
    assert!(html.contains(r#"<code title="owner">a</code>"#));
    assert!(html.contains(r#"<code title="repo">b</code>"#));
    assert!(html.contains(
        r#"href="https://jupyterbook.pub/repo/https%3A%2F%2Fgithub.com%2Fa%2Fb/""#
    ));
    assert!(html.contains(r#"class="btn btn-primary" id="go" href="#));
    assert_eq!(
        *resolver.calls.lock().unwrap(),
        vec!["https://github.com/a/b".to_string()]
    );
}

#[tokio::test]
async fn test_missing_repository_keeps_go_disabled() {
    let answer = Answer::new(Certainty::DoesNotExist, "GitHub").with_field("owner", "a");
    let resolver = FixedResolver::new(Some(answer));
    let app = create_test_app(resolver, "https://jupyterbook.pub");

    let (status, html) = get_html(app, "/?repo=github.com%2Fa%2Fmissing").await;

    assert_eq!(status, 200);
    assert!(html.contains(r#"data-state="resolved-negative""#));
    assert!(!html.contains("repo-kind"));
    assert!(html.contains(r#"id="go" type="button" disabled"#));
    // The share link is still offered for copying.
    assert!(html.contains(
        r#"value="https://jupyterbook.pub/repo/https%3A%2F%2Fgithub.com%2Fa%2Fmissing/""#
    ));
    assert!(!html.contains(r#"id="copy" type="button" disabled"#));
}

#[tokio::test]
async fn test_rejected_input_is_not_resolved() {
    let resolver = FixedResolver::new(None);
    let app = create_test_app(resolver.clone(), "https://jupyterbook.pub");

    let (status, html) = get_html(app, "/?repo=https%3A%2F%2F").await;

    assert_eq!(status, 200);
    assert!(html.contains(r#"data-state="empty""#));
    assert!(resolver.calls.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_share_link_uses_configured_base_path() {
    let resolver = FixedResolver::new(None);
    let app = create_test_app(resolver, "https://example.org/books");

    let (_, html) = get_html(app, "/?repo=zenodo.org%2Frecords%2F1").await;

    assert!(html.contains(
        r#"value="https://example.org/books/repo/https%3A%2F%2Fzenodo.org%2Frecords%2F1/""#
    ));
}

#[tokio::test]
async fn test_health() {
    let app = create_test_app(FixedResolver::new(None), "https://jupyterbook.pub");

    let (status, body) = get_html(app, "/health").await;

    assert_eq!(status, 200);
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["status"], "up");
}

#[tokio::test]
async fn test_unknown_path_is_html_404() {
    let app = create_test_app(FixedResolver::new(None), "https://jupyterbook.pub");

    let (status, html) = get_html(app, "/repo/anything/").await;

    assert_eq!(status, 404);
    assert!(html.contains("No page at"));
    assert!(html.contains("<title>Error 404 - JupyterBook.pub</title>"));
    assert!(html.contains(r#"id="file-issues""#));
}

#[tokio::test]
async fn test_error_page_escapes_the_requested_path() {
    let app = create_test_app(FixedResolver::new(None), "https://jupyterbook.pub");

    let (status, html) = get_html(app, "/it's").await;

    assert_eq!(status, 404);
    assert!(html.contains("No page at"));
    assert!(!html.contains("it's"));
}
