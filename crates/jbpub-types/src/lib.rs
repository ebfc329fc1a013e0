//! Common types used throughout `jbpub`.
//!
//! This crate holds the pure, synchronous half of the link generator:
//! normalizing what the user typed into a [`RepoReference`], deriving the
//! shareable link from an explicit [`PublicBase`], the [`Answer`] shape
//! returned by the resolution endpoint, and the [`LinkView`] a front end
//! renders for the current state.

mod answer;
mod link;
mod reference;
mod view;

pub use answer::{Answer, AnswerError, Certainty};
pub use link::{
    encode_component, LinkError, PublicBase, HEALTH_PATH, REPO_PATH_SEGMENT, RESOLVE_PATH,
};
pub use reference::{normalize, RepoReference, SECURE_SCHEME_PREFIX};
pub use view::{InlineField, Label, LinkView, Resolution, UiState, PLACEHOLDER_LABEL};

/// Debounce window observed in the browser front end.
pub const DEFAULT_DEBOUNCE_MS: u64 = 1000;
