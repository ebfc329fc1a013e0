//! Askama template definitions.

use askama::Template;
use jbpub_types::{InlineField, Label, LinkView};

/// Link generator page.
///
/// Flattened from a [`LinkView`] so the template only deals in plain
/// strings and flags.
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    /// What the user submitted, echoed back into the input field.
    pub input: String,
    /// `empty`, `pending`, `resolved-negative` or `resolved-positive`.
    pub state: String,
    pub has_badge: bool,
    pub badge: String,
    pub fields: Vec<InlineField>,
    pub placeholder: String,
    pub share_link: String,
    pub can_go: bool,
    pub can_copy: bool,
}

impl IndexTemplate {
    pub fn new(input: impl Into<String>, view: LinkView) -> Self {
        let (has_badge, badge, fields, placeholder) = match view.label {
            Label::Badge { kind, fields } => (true, kind, fields, String::new()),
            Label::Placeholder { text } => (false, String::new(), Vec::new(), text),
        };

        Self {
            input: input.into(),
            state: view.state.to_string(),
            has_badge,
            badge,
            fields,
            placeholder,
            share_link: view.share_link.unwrap_or_default(),
            can_go: view.can_go,
            can_copy: view.can_copy,
        }
    }
}

/// Error page.
#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorTemplate {
    pub status: u16,
    pub message: String,
}
