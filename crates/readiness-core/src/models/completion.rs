use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Derived completion state of one category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum CompletionStatus {
    NotStarted,
    Partial,
    Completed,
}

impl CompletionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CompletionStatus::NotStarted => "not_started",
            CompletionStatus::Partial => "partial",
            CompletionStatus::Completed => "completed",
        }
    }
}

/// Completion summary for one category.
///
/// Always derivable from the questionnaire definition, the category's saved
/// answers and its last save time. Copies found on stored documents are a
/// cache and are never used to make decisions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CategoryCompletion {
    pub category_id: String,
    pub status: CompletionStatus,
    pub completion_percentage: u8,
    pub required_questions_count: u32,
    pub answered_required_count: u32,
    pub total_questions_count: u32,
    pub answered_total_count: u32,
    /// Unanswered required question ids, in definition order.
    #[serde(default)]
    pub missing_required: Vec<String>,
    pub last_modified: Option<jiff::Timestamp>,
}

impl CategoryCompletion {
    pub fn is_complete(&self) -> bool {
        self.status == CompletionStatus::Completed
    }
}

/// Assessment-wide view over every category of the questionnaire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct AssessmentProgress {
    /// One entry per questionnaire category, in definition order.
    pub categories: Vec<CategoryCompletion>,
    pub all_categories_complete: bool,
    pub required_questions_count: u32,
    pub answered_required_count: u32,
    pub completion_percentage: u8,
}

impl AssessmentProgress {
    /// Categories whose required questions are not all answered.
    pub fn incomplete_categories(&self) -> Vec<CategoryCompletion> {
        self.categories
            .iter()
            .filter(|c| !c.is_complete())
            .cloned()
            .collect()
    }

    pub fn category(&self, category_id: &str) -> Option<&CategoryCompletion> {
        self.categories
            .iter()
            .find(|c| c.category_id == category_id)
    }
}
