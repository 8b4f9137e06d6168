use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// A single question's recorded value.
///
/// Serialized untagged, so a stored answer is the plain JSON value the UI
/// submitted (`"text"`, `3`, `true`, `["a", "b"]`). Numbers keep their JSON
/// form: `3` reads back as `3` and `2.5` as `2.5`. An absent answer is
/// represented by `None`/`null` at the map level, never by a variant here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(untagged)]
#[ts(export)]
pub enum Answer {
    Boolean(bool),
    Number(serde_json::Number),
    Text(String),
    MultiSelect(Vec<String>),
}

impl Answer {
    /// Whether this value counts as an answer for completion purposes.
    ///
    /// Numeric zero and `false` are real answers. Blank text and a
    /// selection with no non-blank entries are not. JSON numbers are always
    /// finite, so every number counts.
    pub fn is_answered(&self) -> bool {
        match self {
            Answer::Boolean(_) | Answer::Number(_) => true,
            Answer::Text(s) => !s.trim().is_empty(),
            Answer::MultiSelect(items) => items.iter().any(|s| !s.trim().is_empty()),
        }
    }
}

/// Presence-aware variant of [`Answer::is_answered`]: `None` is unanswered.
pub fn is_answered(answer: Option<&Answer>) -> bool {
    answer.is_some_and(Answer::is_answered)
}

impl From<&str> for Answer {
    fn from(value: &str) -> Self {
        Answer::Text(value.to_string())
    }
}

impl From<String> for Answer {
    fn from(value: String) -> Self {
        Answer::Text(value)
    }
}

impl From<serde_json::Number> for Answer {
    fn from(value: serde_json::Number) -> Self {
        Answer::Number(value)
    }
}

impl From<i64> for Answer {
    fn from(value: i64) -> Self {
        Answer::Number(value.into())
    }
}

impl From<bool> for Answer {
    fn from(value: bool) -> Self {
        Answer::Boolean(value)
    }
}

impl From<Vec<String>> for Answer {
    fn from(value: Vec<String>) -> Self {
        Answer::MultiSelect(value)
    }
}
