use axum::Json;
use axum::extract::{Path, State};
use serde::Serialize;

use readiness_questionnaire::{QuestionnaireDefinition, QuestionnaireProvider};

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionnaireSummary {
    assessment_type: String,
    version: u32,
    name: String,
    category_count: usize,
}

pub async fn list_questionnaires(State(state): State<AppState>) -> Json<Vec<QuestionnaireSummary>> {
    let questionnaires = state
        .questionnaires
        .list()
        .iter()
        .map(|q| QuestionnaireSummary {
            assessment_type: q.assessment_type.clone(),
            version: q.version,
            name: q.name.clone(),
            category_count: q.categories.len(),
        })
        .collect();
    Json(questionnaires)
}

pub async fn get_questionnaire(
    State(state): State<AppState>,
    Path((assessment_type, version)): Path<(String, u32)>,
) -> Result<Json<QuestionnaireDefinition>, ApiError> {
    let definition = state
        .questionnaires
        .get_definition(&assessment_type, version)?;
    Ok(Json(definition.as_ref().clone()))
}
