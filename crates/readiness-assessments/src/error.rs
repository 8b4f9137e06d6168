use readiness_core::error::CoreError;
use readiness_core::models::assessment::AssessmentStatus;
use readiness_core::models::completion::CategoryCompletion;
use readiness_questionnaire::error::QuestionnaireError;
use readiness_storage::error::StorageError;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum AssessmentError {
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: Uuid },

    #[error("category '{category_id}' is not part of questionnaire '{assessment_type}' v{version}")]
    InvalidCategory {
        category_id: String,
        assessment_type: String,
        version: u32,
    },

    #[error("assessment {assessment_id} is completed and can no longer be modified")]
    AssessmentLocked {
        assessment_id: Uuid,
        completed_at: Option<jiff::Timestamp>,
    },

    /// Carries every blocking category with its unanswered required questions.
    #[error("assessment {assessment_id} has {} incomplete categories", .categories.len())]
    IncompleteAssessment {
        assessment_id: Uuid,
        categories: Vec<CategoryCompletion>,
    },

    /// Completion requested before any answer moved the assessment out of
    /// DRAFT.
    #[error("assessment {assessment_id} has not been started")]
    NotStarted { assessment_id: Uuid },

    #[error("assessment {assessment_id} cannot be deleted in status {status}")]
    DeleteNotAllowed {
        assessment_id: Uuid,
        status: AssessmentStatus,
    },

    #[error("invalid {field}: {reason}")]
    InvalidInput { field: &'static str, reason: String },

    #[error("assessment {assessment_id} kept changing while completing; retry")]
    Conflict { assessment_id: Uuid },

    #[error(transparent)]
    Questionnaire(#[from] QuestionnaireError),

    #[error(transparent)]
    Store(#[from] StorageError),

    #[error("corrupt document: {0}")]
    Document(#[from] CoreError),
}

impl AssessmentError {
    pub(crate) fn assessment_not_found(id: Uuid) -> Self {
        AssessmentError::NotFound {
            kind: "assessment",
            id,
        }
    }

    pub(crate) fn company_not_found(id: Uuid) -> Self {
        AssessmentError::NotFound { kind: "company", id }
    }
}
