use std::sync::Arc;

use readiness_core::fields::assessment as field;
use readiness_core::keys;
use readiness_core::models::assessment::{Assessment, AssessmentStatus};
use readiness_core::models::responses::{CategoryResponses, ResponseMap};
use readiness_questionnaire::QuestionnaireProvider;
use readiness_questionnaire::completion;
use readiness_storage::{DocumentStore, FieldPath, Update};
use uuid::Uuid;

use crate::documents;
use crate::error::AssessmentError;

/// Holds and merges per-category answers of assessments.
///
/// A save replaces one category's answers as a unit. Other categories are
/// never read back and rewritten, so concurrent saves of different
/// categories cannot overwrite each other.
pub struct ResponseStore<S, Q> {
    store: Arc<S>,
    questionnaires: Arc<Q>,
}

impl<S, Q> Clone for ResponseStore<S, Q> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            questionnaires: Arc::clone(&self.questionnaires),
        }
    }
}

impl<S: DocumentStore, Q: QuestionnaireProvider> ResponseStore<S, Q> {
    pub fn new(store: Arc<S>, questionnaires: Arc<Q>) -> Self {
        Self {
            store,
            questionnaires,
        }
    }

    /// Replace the answers of `category_id` and return the updated assessment
    /// with completion recomputed. Durable before it returns.
    pub async fn merge_category_responses(
        &self,
        assessment_id: Uuid,
        category_id: &str,
        answers: CategoryResponses,
    ) -> Result<Assessment, AssessmentError> {
        let (current, _) = documents::load_assessment(self.store.as_ref(), assessment_id).await?;
        if current.is_locked() {
            tracing::warn!(%assessment_id, category_id, "save rejected: assessment is completed");
            return Err(documents::locked(&current));
        }

        let definition = self
            .questionnaires
            .get_definition(&current.assessment_type, current.questionnaire_version)?;
        let category = definition
            .category(category_id)
            .ok_or_else(|| AssessmentError::InvalidCategory {
                category_id: category_id.to_string(),
                assessment_type: current.assessment_type.clone(),
                version: current.questionnaire_version,
            })?;

        let now = jiff::Timestamp::now();
        let category_completion =
            completion::evaluate_category(category, Some(&answers), Some(now));
        let starts_progress = category_completion.answered_total_count > 0;

        let mut update = Update::new()
            .when(documents::active(field::IS_ACTIVE))
            .when(documents::unlocked())
            .set_serialized(FieldPath::field(field::RESPONSES).child(category_id), &answers)?
            .set_serialized(FieldPath::field(field::RESPONSE_TIMESTAMPS).child(category_id), &now)?
            .set_serialized(
                FieldPath::field(field::CATEGORY_STATUSES).child(category_id),
                &category_completion,
            )?
            .set_serialized(FieldPath::field(field::UPDATED_AT), &now)?;
        if starts_progress {
            update = update.set(
                FieldPath::field(field::STATUS),
                documents::status_value(AssessmentStatus::InProgress),
            );
        }

        let outcome = self
            .store
            .update_one(&keys::assessment(assessment_id), &update)
            .await?;
        let mut assessment = documents::updated_assessment(assessment_id, outcome)?;
        documents::refresh(&mut assessment, &definition);

        if starts_progress && current.status == AssessmentStatus::Draft {
            tracing::info!(%assessment_id, "assessment started");
        }
        tracing::debug!(
            %assessment_id,
            category_id,
            status = category_completion.status.as_str(),
            answered = category_completion.answered_total_count,
            "category responses saved"
        );
        Ok(assessment)
    }

    /// All saved answers. Categories never saved are absent from the map.
    pub async fn get_responses(&self, assessment_id: Uuid) -> Result<ResponseMap, AssessmentError> {
        let (assessment, _) = documents::load_assessment(self.store.as_ref(), assessment_id).await?;
        Ok(assessment.responses)
    }
}
