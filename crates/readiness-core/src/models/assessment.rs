use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use super::completion::{AssessmentProgress, CategoryCompletion};
use super::responses::ResponseMap;
use crate::document::Document;
use crate::keys;

/// Lifecycle state. Transitions only move forward:
/// `Draft -> InProgress -> Completed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export)]
pub enum AssessmentStatus {
    Draft,
    InProgress,
    Completed,
}

impl AssessmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssessmentStatus::Draft => "DRAFT",
            AssessmentStatus::InProgress => "IN_PROGRESS",
            AssessmentStatus::Completed => "COMPLETED",
        }
    }
}

impl std::fmt::Display for AssessmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

fn active() -> bool {
    true
}

/// Aggregate root: one questionnaire run against one company.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Assessment {
    pub id: Uuid,
    pub name: String,
    pub company_id: Uuid,
    pub assessment_type: String,
    pub questionnaire_version: u32,
    pub current_category: Option<String>,
    #[serde(default)]
    pub current_step: u32,
    pub status: AssessmentStatus,
    #[serde(default)]
    pub responses: ResponseMap,
    /// Last save time per category.
    #[serde(default)]
    pub response_timestamps: BTreeMap<String, jiff::Timestamp>,
    /// Cached completion per category. Refreshed on every read.
    #[serde(default)]
    pub category_statuses: BTreeMap<String, CategoryCompletion>,
    #[serde(default)]
    pub all_categories_complete: bool,
    /// Missing on documents written before soft delete existed.
    #[serde(default = "active")]
    pub is_active: bool,
    pub created_at: jiff::Timestamp,
    pub updated_at: jiff::Timestamp,
    pub completed_at: Option<jiff::Timestamp>,
    #[serde(default)]
    pub deleted_at: Option<jiff::Timestamp>,
}

impl Assessment {
    /// A fresh draft with no responses.
    pub fn new_draft(
        name: impl Into<String>,
        company_id: Uuid,
        assessment_type: impl Into<String>,
        questionnaire_version: u32,
        first_category: Option<String>,
    ) -> Self {
        let now = jiff::Timestamp::now();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            company_id,
            assessment_type: assessment_type.into(),
            questionnaire_version,
            current_category: first_category,
            current_step: 0,
            status: AssessmentStatus::Draft,
            responses: ResponseMap::new(),
            response_timestamps: BTreeMap::new(),
            category_statuses: BTreeMap::new(),
            all_categories_complete: false,
            is_active: true,
            created_at: now,
            updated_at: now,
            completed_at: None,
            deleted_at: None,
        }
    }

    pub fn is_locked(&self) -> bool {
        self.status == AssessmentStatus::Completed
    }

    /// Overwrite the cached completion fields with a freshly computed view.
    pub fn apply_progress(&mut self, progress: &AssessmentProgress) {
        self.category_statuses = progress
            .categories
            .iter()
            .map(|c| (c.category_id.clone(), c.clone()))
            .collect();
        self.all_categories_complete = progress.all_categories_complete;
    }
}

impl Document for Assessment {
    fn key(&self) -> String {
        keys::assessment(self.id)
    }
}
