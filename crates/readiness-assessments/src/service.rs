use std::collections::BTreeMap;
use std::sync::Arc;

use readiness_core::document::Document;
use readiness_core::fields::assessment as field;
use readiness_core::keys;
use readiness_core::models::assessment::{Assessment, AssessmentStatus};
use readiness_core::models::completion::AssessmentProgress;
use readiness_core::models::company::Company;
use readiness_core::models::responses::{CategoryResponses, ResponseMap};
use readiness_questionnaire::completion;
use readiness_questionnaire::{QuestionnaireDefinition, QuestionnaireProvider};
use readiness_storage::{Condition, DocumentStore, FieldPath, Update, UpdateOutcome};
use uuid::Uuid;

use crate::config::{DeleteMode, ServiceConfig};
use crate::documents;
use crate::error::AssessmentError;
use crate::responses::ResponseStore;

/// Attempts to complete against a snapshot before giving up with
/// [`AssessmentError::Conflict`].
const COMPLETE_ATTEMPTS: usize = 3;

/// Assessment lifecycle: `DRAFT -> IN_PROGRESS -> COMPLETED`.
///
/// Every read returns completion recomputed from the stored responses; the
/// cached statuses on the document are only ever written, never consulted.
pub struct AssessmentService<S, Q> {
    store: Arc<S>,
    questionnaires: Arc<Q>,
    responses: ResponseStore<S, Q>,
    config: ServiceConfig,
}

impl<S, Q> Clone for AssessmentService<S, Q> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            questionnaires: Arc::clone(&self.questionnaires),
            responses: self.responses.clone(),
            config: self.config.clone(),
        }
    }
}

impl<S: DocumentStore, Q: QuestionnaireProvider> AssessmentService<S, Q> {
    pub fn new(store: Arc<S>, questionnaires: Arc<Q>, config: ServiceConfig) -> Self {
        let responses = ResponseStore::new(Arc::clone(&store), Arc::clone(&questionnaires));
        Self {
            store,
            questionnaires,
            responses,
            config,
        }
    }

    pub fn responses(&self) -> &ResponseStore<S, Q> {
        &self.responses
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// Create a DRAFT assessment pinned to the latest questionnaire version
    /// of `assessment_type`.
    pub async fn create_assessment(
        &self,
        name: &str,
        company_id: Uuid,
        assessment_type: &str,
    ) -> Result<Assessment, AssessmentError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AssessmentError::InvalidInput {
                field: "name",
                reason: "must not be empty".to_string(),
            });
        }

        let company = self
            .store
            .find_one(&keys::company(company_id))
            .await?
            .map(Company::from_document)
            .transpose()?
            .filter(|c| c.is_active)
            .ok_or_else(|| AssessmentError::company_not_found(company_id))?;

        let definition = self.questionnaires.latest(assessment_type)?;
        let mut assessment = Assessment::new_draft(
            name,
            company.id,
            &definition.assessment_type,
            definition.version,
            definition.first_category().map(|c| c.id.clone()),
        );
        documents::refresh(&mut assessment, &definition);

        self.store
            .insert_one(&assessment.key(), assessment.to_document()?)
            .await?;

        tracing::info!(
            assessment_id = %assessment.id,
            company_id = %company.id,
            assessment_type = %definition.assessment_type,
            version = definition.version,
            "assessment created"
        );
        Ok(assessment)
    }

    /// Replace one category's answers. Fails with
    /// [`AssessmentError::AssessmentLocked`] once the assessment is completed.
    pub async fn save_category_responses(
        &self,
        assessment_id: Uuid,
        category_id: &str,
        answers: CategoryResponses,
    ) -> Result<Assessment, AssessmentError> {
        self.responses
            .merge_category_responses(assessment_id, category_id, answers)
            .await
    }

    pub async fn get_assessment(&self, assessment_id: Uuid) -> Result<Assessment, AssessmentError> {
        let (mut assessment, _) =
            documents::load_assessment(self.store.as_ref(), assessment_id).await?;
        let definition = self.definition_for(&assessment)?;
        documents::refresh(&mut assessment, &definition);
        Ok(assessment)
    }

    pub async fn get_responses(&self, assessment_id: Uuid) -> Result<ResponseMap, AssessmentError> {
        self.responses.get_responses(assessment_id).await
    }

    pub async fn get_progress(
        &self,
        assessment_id: Uuid,
    ) -> Result<AssessmentProgress, AssessmentError> {
        let (mut assessment, _) =
            documents::load_assessment(self.store.as_ref(), assessment_id).await?;
        let definition = self.definition_for(&assessment)?;
        Ok(documents::refresh(&mut assessment, &definition))
    }

    /// Active assessments of a company, newest first.
    pub async fn list_assessments(
        &self,
        company_id: Uuid,
    ) -> Result<Vec<Assessment>, AssessmentError> {
        let documents = self.store.list(keys::ASSESSMENTS_PREFIX).await?;
        let mut assessments = Vec::new();
        for (_, raw) in documents {
            let mut assessment = Assessment::from_document(raw)?;
            if !assessment.is_active || assessment.company_id != company_id {
                continue;
            }
            let definition = self.definition_for(&assessment)?;
            documents::refresh(&mut assessment, &definition);
            assessments.push(assessment);
        }
        assessments.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(assessments)
    }

    /// Move the navigation pointer. Any category of the questionnaire may be
    /// targeted; completeness of the current one is not checked.
    pub async fn advance_category(
        &self,
        assessment_id: Uuid,
        target_category_id: &str,
    ) -> Result<Assessment, AssessmentError> {
        let (current, _) = documents::load_assessment(self.store.as_ref(), assessment_id).await?;
        if current.is_locked() {
            return Err(documents::locked(&current));
        }

        let definition = self.definition_for(&current)?;
        let step = definition
            .category_index(target_category_id)
            .ok_or_else(|| AssessmentError::InvalidCategory {
                category_id: target_category_id.to_string(),
                assessment_type: current.assessment_type.clone(),
                version: current.questionnaire_version,
            })?;

        let update = Update::new()
            .when(documents::active(field::IS_ACTIVE))
            .when(documents::unlocked())
            .set_serialized(FieldPath::field(field::CURRENT_CATEGORY), &target_category_id)?
            .set_serialized(FieldPath::field(field::CURRENT_STEP), &step)?
            .set_serialized(FieldPath::field(field::UPDATED_AT), &jiff::Timestamp::now())?;

        let outcome = self
            .store
            .update_one(&keys::assessment(assessment_id), &update)
            .await?;
        let mut assessment = documents::updated_assessment(assessment_id, outcome)?;
        documents::refresh(&mut assessment, &definition);

        tracing::debug!(
            %assessment_id,
            category_id = target_category_id,
            step,
            "category selected"
        );
        Ok(assessment)
    }

    /// Terminal transition, allowed only from IN_PROGRESS. Completion is
    /// re-evaluated from the stored responses at the moment of the
    /// transition, and the write is conditioned on the document not having
    /// changed since.
    pub async fn complete_assessment(
        &self,
        assessment_id: Uuid,
    ) -> Result<Assessment, AssessmentError> {
        let key = keys::assessment(assessment_id);
        let (mut current, mut raw) =
            documents::load_assessment(self.store.as_ref(), assessment_id).await?;

        for _ in 0..COMPLETE_ATTEMPTS {
            if !current.is_active {
                return Err(AssessmentError::assessment_not_found(assessment_id));
            }
            if current.is_locked() {
                return Err(documents::locked(&current));
            }

            let definition = self.definition_for(&current)?;
            let progress = completion::evaluate(
                &definition,
                &current.responses,
                &current.response_timestamps,
            );
            if !progress.all_categories_complete {
                let categories = progress.incomplete_categories();
                tracing::warn!(
                    %assessment_id,
                    incomplete = categories.len(),
                    "completion rejected: required questions unanswered"
                );
                return Err(AssessmentError::IncompleteAssessment {
                    assessment_id,
                    categories,
                });
            }
            if current.status == AssessmentStatus::Draft {
                tracing::warn!(%assessment_id, "completion rejected: assessment not started");
                return Err(AssessmentError::NotStarted { assessment_id });
            }

            let updated_at = FieldPath::field(field::UPDATED_AT);
            let snapshot = updated_at.get(&raw).cloned().unwrap_or_default();
            let now = jiff::Timestamp::now();
            let statuses: BTreeMap<_, _> = progress
                .categories
                .iter()
                .map(|c| (c.category_id.as_str(), c))
                .collect();

            let update = Update::new()
                .when(documents::active(field::IS_ACTIVE))
                .when(Condition::Equals(
                    FieldPath::field(field::STATUS),
                    documents::status_value(AssessmentStatus::InProgress),
                ))
                .when(Condition::Equals(updated_at.clone(), snapshot))
                .set(
                    FieldPath::field(field::STATUS),
                    documents::status_value(AssessmentStatus::Completed),
                )
                .set_serialized(FieldPath::field(field::COMPLETED_AT), &now)?
                .set_serialized(updated_at, &now)?
                .set_serialized(FieldPath::field(field::CATEGORY_STATUSES), &statuses)?
                .set_serialized(FieldPath::field(field::ALL_CATEGORIES_COMPLETE), &true)?;

            match self.store.update_one(&key, &update).await? {
                UpdateOutcome::Updated(doc) => {
                    let mut assessment = Assessment::from_document(doc)?;
                    documents::refresh(&mut assessment, &definition);
                    tracing::info!(%assessment_id, "assessment completed");
                    return Ok(assessment);
                }
                UpdateOutcome::Missing => {
                    return Err(AssessmentError::assessment_not_found(assessment_id));
                }
                UpdateOutcome::FilterRejected(doc) => {
                    // Changed underneath us; evaluate the new state.
                    current = Assessment::from_document(doc.clone())?;
                    raw = doc;
                }
            }
        }

        Err(AssessmentError::Conflict { assessment_id })
    }

    /// Delete per the configured policy. Returns `false` when there is no
    /// active assessment with this id.
    pub async fn delete_assessment(&self, assessment_id: Uuid) -> Result<bool, AssessmentError> {
        let key = keys::assessment(assessment_id);
        let current = match documents::load_assessment(self.store.as_ref(), assessment_id).await {
            Ok((assessment, _)) => assessment,
            Err(AssessmentError::NotFound { .. }) => return Ok(false),
            Err(e) => return Err(e),
        };

        let policy = self.config.delete_policy;
        if policy.draft_only && current.status != AssessmentStatus::Draft {
            tracing::warn!(%assessment_id, status = %current.status, "delete rejected");
            return Err(AssessmentError::DeleteNotAllowed {
                assessment_id,
                status: current.status,
            });
        }

        let deleted = match policy.mode {
            DeleteMode::Hard => self.store.delete_one(&key).await?,
            DeleteMode::Soft => {
                let now = jiff::Timestamp::now();
                let mut update = Update::new().when(documents::active(field::IS_ACTIVE));
                if policy.draft_only {
                    update = update.when(Condition::Equals(
                        FieldPath::field(field::STATUS),
                        documents::status_value(AssessmentStatus::Draft),
                    ));
                }
                let update = update
                    .set_serialized(FieldPath::field(field::IS_ACTIVE), &false)?
                    .set_serialized(FieldPath::field(field::DELETED_AT), &now)?
                    .set_serialized(FieldPath::field(field::UPDATED_AT), &now)?;

                match self.store.update_one(&key, &update).await? {
                    UpdateOutcome::Updated(_) => true,
                    UpdateOutcome::Missing => false,
                    UpdateOutcome::FilterRejected(doc) => {
                        let raced = Assessment::from_document(doc)?;
                        if !raced.is_active {
                            false
                        } else {
                            return Err(AssessmentError::DeleteNotAllowed {
                                assessment_id,
                                status: raced.status,
                            });
                        }
                    }
                }
            }
        };

        if deleted {
            tracing::info!(%assessment_id, mode = ?policy.mode, "assessment deleted");
        }
        Ok(deleted)
    }

    fn definition_for(
        &self,
        assessment: &Assessment,
    ) -> Result<Arc<QuestionnaireDefinition>, AssessmentError> {
        Ok(self
            .questionnaires
            .get_definition(&assessment.assessment_type, assessment.questionnaire_version)?)
    }
}
