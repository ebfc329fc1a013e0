//! Answers returned by the resolution endpoint.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// How sure the resolver is that a reference points at a real repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Certainty {
    /// The repository was found.
    Exists,
    /// The reference looks like a repository but was not confirmed.
    MaybeExists,
    /// The repository was confirmed absent.
    DoesNotExist,
}

impl std::fmt::Display for Certainty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Exists => "Exists",
            Self::MaybeExists => "MaybeExists",
            Self::DoesNotExist => "DoesNotExist",
        };
        f.write_str(s)
    }
}

/// Reasons a resolver body is rejected even though it was valid JSON.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AnswerError {
    /// A data field held an object or array instead of a displayable scalar.
    #[error("data field '{0}' is not a displayable value")]
    UnsupportedValue(String),
}

/// The body exactly as it travels on the wire.
///
/// The resolver spells the certainty key `certainity`.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct WireAnswer {
    certainity: Certainty,
    kind: String,
    data: Map<String, Value>,
}

/// A validated resolution answer.
///
/// `data` keeps the order in which the resolver listed its fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "WireAnswer", into = "WireAnswer")]
pub struct Answer {
    /// Resolver confidence.
    pub certainty: Certainty,
    /// Detected repository type, e.g. `GitHub` or `Zenodo`.
    pub kind: String,
    /// Extracted fields as `(name, display value)` pairs.
    pub data: Vec<(String, String)>,
}

impl Answer {
    /// Creates an answer with no data fields.
    pub fn new(certainty: Certainty, kind: impl Into<String>) -> Self {
        Self {
            certainty,
            kind: kind.into(),
            data: Vec::new(),
        }
    }

    /// Appends a data field.
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.data.push((name.into(), value.into()));
        self
    }

    /// Returns true when the resolver confirmed the repository exists.
    pub fn exists(&self) -> bool {
        self.certainty == Certainty::Exists
    }

    /// Looks up a data field by name.
    pub fn field(&self, name: &str) -> Option<&str> {
        self.data
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Parses and validates a resolver response body.
    pub fn from_slice(body: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(body)
    }
}

impl TryFrom<WireAnswer> for Answer {
    type Error = AnswerError;

    fn try_from(wire: WireAnswer) -> Result<Self, Self::Error> {
        let data = wire
            .data
            .into_iter()
            .map(|(key, value)| {
                let display = match value {
                    Value::String(s) => s,
                    Value::Number(n) => n.to_string(),
                    Value::Bool(b) => b.to_string(),
                    Value::Null => String::new(),
                    Value::Array(_) | Value::Object(_) => {
                        return Err(AnswerError::UnsupportedValue(key))
                    }
                };
                Ok((key, display))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            certainty: wire.certainity,
            kind: wire.kind,
            data,
        })
    }
}

impl From<Answer> for WireAnswer {
    fn from(answer: Answer) -> Self {
        Self {
            certainity: answer.certainty,
            kind: answer.kind,
            data: answer
                .data
                .into_iter()
                .map(|(key, value)| (key, Value::String(value)))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_exists_answer_keeps_field_order() {
        let body = json!({
            "certainity": "Exists",
            "kind": "GitHub",
            "data": { "repo": "b", "owner": "a", "ref": "HEAD" }
        });
        let answer = Answer::from_slice(body.to_string().as_bytes()).unwrap();

        assert!(answer.exists());
        assert_eq!(answer.kind, "GitHub");
        let keys: Vec<&str> = answer.data.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["repo", "owner", "ref"]);
        assert_eq!(answer.field("owner"), Some("a"));
    }

    #[test]
    fn test_scalar_values_are_displayed() {
        let body = json!({
            "certainity": "MaybeExists",
            "kind": "Zenodo",
            "data": { "record_id": 1234, "sandbox": false }
        });
        let answer = Answer::from_slice(body.to_string().as_bytes()).unwrap();

        assert_eq!(answer.certainty, Certainty::MaybeExists);
        assert_eq!(answer.field("record_id"), Some("1234"));
        assert_eq!(answer.field("sandbox"), Some("false"));
    }

    #[test]
    fn test_malformed_bodies_are_rejected() {
        let unknown_certainty = json!({ "certainity": "Probably", "kind": "GitHub", "data": {} });
        assert!(Answer::from_slice(unknown_certainty.to_string().as_bytes()).is_err());

        let missing_kind = json!({ "certainity": "Exists", "data": {} });
        assert!(Answer::from_slice(missing_kind.to_string().as_bytes()).is_err());

        let nested = json!({ "certainity": "Exists", "kind": "GitHub", "data": { "x": [1] } });
        assert!(Answer::from_slice(nested.to_string().as_bytes()).is_err());

        assert!(Answer::from_slice(b"not json").is_err());
    }

    #[test]
    fn test_serializes_with_wire_spelling() {
        let answer = Answer::new(Certainty::DoesNotExist, "Dataverse").with_field("doi", "10.1/x");
        let value = serde_json::to_value(&answer).unwrap();

        assert_eq!(value["certainity"], "DoesNotExist");
        assert_eq!(value["data"]["doi"], "10.1/x");
    }
}
