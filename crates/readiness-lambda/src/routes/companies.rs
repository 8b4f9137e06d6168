use axum::Json;
use axum::extract::{Path, State};
use serde::Serialize;
use uuid::Uuid;

use readiness_assessments::{CompanyChanges, NewCompany};
use readiness_core::models::assessment::Assessment;
use readiness_core::models::company::Company;

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Serialize)]
pub struct Deleted {
    pub deleted: bool,
}

pub async fn list_companies(State(state): State<AppState>) -> Result<Json<Vec<Company>>, ApiError> {
    Ok(Json(state.companies.list_companies().await?))
}

pub async fn create_company(
    State(state): State<AppState>,
    Json(new): Json<NewCompany>,
) -> Result<Json<Company>, ApiError> {
    Ok(Json(state.companies.create_company(new).await?))
}

pub async fn get_company(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Company>, ApiError> {
    Ok(Json(state.companies.get_company(id).await?))
}

pub async fn update_company(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(changes): Json<CompanyChanges>,
) -> Result<Json<Company>, ApiError> {
    Ok(Json(state.companies.update_company(id, changes).await?))
}

pub async fn delete_company(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Deleted>, ApiError> {
    let deleted = state.companies.delete_company(id).await?;
    Ok(Json(Deleted { deleted }))
}

pub async fn list_company_assessments(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<Assessment>>, ApiError> {
    state.companies.get_company(id).await?;
    Ok(Json(state.assessments.list_assessments(id).await?))
}
