use axum::Json;
use axum::extract::{Path, State};
use serde::Deserialize;
use uuid::Uuid;

use readiness_core::models::assessment::Assessment;
use readiness_core::models::completion::AssessmentProgress;
use readiness_core::models::responses::CategoryResponses;

use crate::error::ApiError;
use crate::routes::companies::Deleted;
use crate::state::AppState;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAssessment {
    pub name: String,
    pub company_id: Uuid,
    pub assessment_type: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentCategory {
    pub category_id: String,
}

pub async fn create_assessment(
    State(state): State<AppState>,
    Json(req): Json<CreateAssessment>,
) -> Result<Json<Assessment>, ApiError> {
    let assessment = state
        .assessments
        .create_assessment(&req.name, req.company_id, &req.assessment_type)
        .await?;
    Ok(Json(assessment))
}

pub async fn get_assessment(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Assessment>, ApiError> {
    Ok(Json(state.assessments.get_assessment(id).await?))
}

pub async fn get_progress(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<AssessmentProgress>, ApiError> {
    Ok(Json(state.assessments.get_progress(id).await?))
}

pub async fn save_category_responses(
    State(state): State<AppState>,
    Path((id, category_id)): Path<(Uuid, String)>,
    Json(answers): Json<CategoryResponses>,
) -> Result<Json<Assessment>, ApiError> {
    let assessment = state
        .assessments
        .save_category_responses(id, &category_id, answers)
        .await?;
    Ok(Json(assessment))
}

pub async fn set_current_category(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<CurrentCategory>,
) -> Result<Json<Assessment>, ApiError> {
    Ok(Json(state.assessments.advance_category(id, &req.category_id).await?))
}

pub async fn complete_assessment(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Assessment>, ApiError> {
    Ok(Json(state.assessments.complete_assessment(id).await?))
}

pub async fn delete_assessment(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Deleted>, ApiError> {
    let deleted = state.assessments.delete_assessment(id).await?;
    Ok(Json(Deleted { deleted }))
}
