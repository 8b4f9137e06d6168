use readiness_core::document::Document;
use readiness_core::fields;
use readiness_core::keys;
use readiness_core::models::assessment::{Assessment, AssessmentStatus};
use readiness_core::models::completion::AssessmentProgress;
use readiness_questionnaire::QuestionnaireDefinition;
use readiness_questionnaire::completion;
use readiness_storage::{Condition, DocumentStore, FieldPath, UpdateOutcome};
use serde_json::Value;
use uuid::Uuid;

use crate::error::AssessmentError;

/// Filter clause: the document has not been soft-deleted. Documents written
/// before soft delete existed have no flag and count as active.
pub(crate) fn active(field: &str) -> Condition {
    Condition::NotEquals(FieldPath::field(field), Value::Bool(false))
}

/// Filter clause: the assessment is not completed.
pub(crate) fn unlocked() -> Condition {
    Condition::NotEquals(
        FieldPath::field(fields::assessment::STATUS),
        status_value(AssessmentStatus::Completed),
    )
}

pub(crate) fn status_value(status: AssessmentStatus) -> Value {
    Value::String(status.as_str().to_string())
}

/// Load an assessment with its raw stored document. Soft-deleted assessments
/// are reported as not found.
pub(crate) async fn load_assessment<S: DocumentStore>(
    store: &S,
    id: Uuid,
) -> Result<(Assessment, Value), AssessmentError> {
    let raw = store
        .find_one(&keys::assessment(id))
        .await?
        .ok_or_else(|| AssessmentError::assessment_not_found(id))?;
    let assessment = Assessment::from_document(raw.clone())?;
    if !assessment.is_active {
        return Err(AssessmentError::assessment_not_found(id));
    }
    Ok((assessment, raw))
}

pub(crate) fn locked(assessment: &Assessment) -> AssessmentError {
    AssessmentError::AssessmentLocked {
        assessment_id: assessment.id,
        completed_at: assessment.completed_at,
    }
}

/// Turn the outcome of a guarded assessment update into the updated
/// assessment, or the error explaining which guard rejected it.
pub(crate) fn updated_assessment(
    id: Uuid,
    outcome: UpdateOutcome,
) -> Result<Assessment, AssessmentError> {
    match outcome {
        UpdateOutcome::Updated(doc) => Ok(Assessment::from_document(doc)?),
        UpdateOutcome::Missing => Err(AssessmentError::assessment_not_found(id)),
        UpdateOutcome::FilterRejected(doc) => {
            let current = Assessment::from_document(doc)?;
            if !current.is_active {
                Err(AssessmentError::assessment_not_found(id))
            } else if current.is_locked() {
                Err(locked(&current))
            } else {
                Err(AssessmentError::Conflict { assessment_id: id })
            }
        }
    }
}

/// Recompute completion from the stored responses and overwrite the cached
/// fields on `assessment`.
pub(crate) fn refresh(
    assessment: &mut Assessment,
    definition: &QuestionnaireDefinition,
) -> AssessmentProgress {
    let progress = completion::evaluate(
        definition,
        &assessment.responses,
        &assessment.response_timestamps,
    );
    assessment.apply_progress(&progress);
    progress
}
