use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::answer::{Answer, is_answered};

/// Answers for one category, keyed by question id.
///
/// A key mapped to `None` is kept as submitted but counts as unanswered.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CategoryResponses(BTreeMap<String, Option<Answer>>);

impl CategoryResponses {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, question_id: impl Into<String>, answer: impl Into<Answer>) -> Self {
        self.0.insert(question_id.into(), Some(answer.into()));
        self
    }

    /// Builder-style insert of an explicit `null`.
    pub fn with_null(mut self, question_id: impl Into<String>) -> Self {
        self.0.insert(question_id.into(), None);
        self
    }

    pub fn get(&self, question_id: &str) -> Option<&Answer> {
        self.0.get(question_id).and_then(Option::as_ref)
    }

    pub fn is_answered(&self, question_id: &str) -> bool {
        is_answered(self.get(question_id))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, Option<&Answer>)> {
        self.0.iter().map(|(k, v)| (k, v.as_ref()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, Option<Answer>)> for CategoryResponses {
    fn from_iter<I: IntoIterator<Item = (String, Option<Answer>)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// The full nested answer structure of one assessment: category id to
/// [`CategoryResponses`].
///
/// This is a value type. Merging produces a new map rather than mutating the
/// one read from the store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ResponseMap(BTreeMap<String, CategoryResponses>);

impl ResponseMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answers saved for a category, or `None` if it was never saved.
    pub fn category(&self, category_id: &str) -> Option<&CategoryResponses> {
        self.0.get(category_id)
    }

    /// Return a copy with `category_id` replaced wholesale by `responses`.
    /// Every other category is carried over untouched.
    pub fn with_category(
        &self,
        category_id: impl Into<String>,
        responses: CategoryResponses,
    ) -> Self {
        let mut next = self.0.clone();
        next.insert(category_id.into(), responses);
        Self(next)
    }

    pub fn categories(&self) -> impl Iterator<Item = (&String, &CategoryResponses)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, CategoryResponses)> for ResponseMap {
    fn from_iter<I: IntoIterator<Item = (String, CategoryResponses)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
