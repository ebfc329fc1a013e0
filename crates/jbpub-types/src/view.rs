//! What the link generator shows for a given resolution state.

use serde::Serialize;
use url::Url;

use crate::answer::Answer;

/// Label shown inside the input field until a repository is confirmed.
pub const PLACEHOLDER_LABEL: &str = "Enter your repository URL here";

/// Resolution progress for the current reference.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Resolution {
    /// Nothing usable has been typed.
    #[default]
    Empty,
    /// Waiting for the input to settle or for the resolver to answer.
    Pending,
    /// The resolver finished; `None` means no usable answer.
    Settled(Option<Answer>),
}

/// The four visible states of the link generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum UiState {
    Empty,
    Pending,
    ResolvedNegative,
    ResolvedPositive,
}

impl std::fmt::Display for UiState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Empty => "empty",
            Self::Pending => "pending",
            Self::ResolvedNegative => "resolved-negative",
            Self::ResolvedPositive => "resolved-positive",
        };
        f.write_str(s)
    }
}

/// A data value rendered inline next to the badge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InlineField {
    /// Field name, shown as a tooltip.
    pub name: String,
    /// Display value.
    pub value: String,
}

/// Contents of the input field label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Label {
    /// Generic prompt.
    Placeholder { text: String },
    /// Confirmed repository: kind badge plus extracted values.
    Badge {
        kind: String,
        fields: Vec<InlineField>,
    },
}

/// Everything a front end needs to render the link generator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkView {
    pub state: UiState,
    pub label: Label,
    /// Shareable link, if the reference is non-empty.
    pub share_link: Option<String>,
    /// Whether the "Go" action may navigate to the share link.
    pub can_go: bool,
    /// Whether the copy-to-clipboard action is available.
    pub can_copy: bool,
}

impl LinkView {
    /// Derives the view from the current share link and resolution state.
    ///
    /// Navigation is only enabled for an answer with certainty `Exists`;
    /// copying only needs a share link.
    pub fn derive(share_link: Option<&Url>, resolution: &Resolution) -> Self {
        let confirmed = match resolution {
            Resolution::Settled(Some(answer)) if answer.exists() => Some(answer),
            _ => None,
        };

        let state = match resolution {
            Resolution::Empty => UiState::Empty,
            Resolution::Pending => UiState::Pending,
            Resolution::Settled(_) if confirmed.is_some() => UiState::ResolvedPositive,
            Resolution::Settled(_) => UiState::ResolvedNegative,
        };

        let label = match confirmed {
            Some(answer) => Label::Badge {
                kind: answer.kind.clone(),
                fields: answer
                    .data
                    .iter()
                    .map(|(name, value)| InlineField {
                        name: name.clone(),
                        value: value.clone(),
                    })
                    .collect(),
            },
            None => Label::Placeholder {
                text: PLACEHOLDER_LABEL.to_string(),
            },
        };

        let share_link = share_link.map(Url::to_string);

        Self {
            state,
            can_go: confirmed.is_some() && share_link.is_some(),
            can_copy: share_link.is_some(),
            label,
            share_link,
        }
    }

    /// The empty view shown before anything is typed.
    pub fn empty() -> Self {
        Self::derive(None, &Resolution::Empty)
    }

    /// Returns the badge text, if a repository is confirmed.
    pub fn badge(&self) -> Option<&str> {
        match &self.label {
            Label::Badge { kind, .. } => Some(kind.as_str()),
            Label::Placeholder { .. } => None,
        }
    }

    /// Returns the inline values shown after the badge.
    pub fn inline_values(&self) -> Vec<&str> {
        match &self.label {
            Label::Badge { fields, .. } => fields.iter().map(|f| f.value.as_str()).collect(),
            Label::Placeholder { .. } => Vec::new(),
        }
    }
}

impl Default for LinkView {
    fn default() -> Self {
        Self::empty()
    }
}
