use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use readiness_assessments::AssessmentError;
use readiness_core::models::completion::CategoryCompletion;
use readiness_questionnaire::error::QuestionnaireError;

/// Unified API error type for all route handlers.
#[derive(Debug)]
pub enum ApiError {
    NotFound(String),
    BadRequest(String),
    Conflict(String),
    /// Write attempted on a completed assessment.
    Locked {
        message: String,
        completed_at: Option<String>,
    },
    /// Completion attempted with required questions unanswered.
    Incomplete {
        message: String,
        categories: Vec<CategoryCompletion>,
    },
    Internal(String),
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    completed_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    incomplete_categories: Option<Vec<CategoryCompletion>>,
}

impl ErrorBody {
    fn message(error: String) -> Self {
        Self {
            error,
            completed_at: None,
            incomplete_categories: None,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, ErrorBody::message(msg)),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, ErrorBody::message(msg)),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, ErrorBody::message(msg)),
            ApiError::Locked {
                message,
                completed_at,
            } => (
                StatusCode::CONFLICT,
                ErrorBody {
                    completed_at,
                    ..ErrorBody::message(message)
                },
            ),
            ApiError::Incomplete {
                message,
                categories,
            } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ErrorBody {
                    incomplete_categories: Some(categories),
                    ..ErrorBody::message(message)
                },
            ),
            ApiError::Internal(msg) => {
                tracing::error!("internal error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody::message("internal server error".to_string()),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<AssessmentError> for ApiError {
    fn from(e: AssessmentError) -> Self {
        let message = e.to_string();
        match e {
            AssessmentError::NotFound { .. } => ApiError::NotFound(message),
            AssessmentError::InvalidCategory { .. } | AssessmentError::InvalidInput { .. } => {
                ApiError::BadRequest(message)
            }
            AssessmentError::AssessmentLocked { completed_at, .. } => ApiError::Locked {
                message,
                completed_at: completed_at.map(|t| t.to_string()),
            },
            AssessmentError::IncompleteAssessment { categories, .. } => ApiError::Incomplete {
                message,
                categories,
            },
            AssessmentError::NotStarted { .. }
            | AssessmentError::DeleteNotAllowed { .. }
            | AssessmentError::Conflict { .. } => ApiError::Conflict(message),
            AssessmentError::Questionnaire(e) => e.into(),
            AssessmentError::Store(_) | AssessmentError::Document(_) => ApiError::Internal(message),
        }
    }
}

impl From<QuestionnaireError> for ApiError {
    fn from(e: QuestionnaireError) -> Self {
        match e {
            QuestionnaireError::UnknownQuestionnaire { .. } => ApiError::NotFound(e.to_string()),
            other => ApiError::Internal(other.to_string()),
        }
    }
}
