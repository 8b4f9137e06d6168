//! readiness-lambda
//!
//! REST surface over the assessment service, served on AWS Lambda.

use axum::Router;
use axum::middleware as axum_mw;
use axum::routing::{get, post, put};
use tower_http::cors::{Any, CorsLayer};

pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod state;

use state::AppState;

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(routes::health::health_check))
        .route("/questionnaires", get(routes::questionnaires::list_questionnaires))
        .route(
            "/questionnaires/{assessment_type}/{version}",
            get(routes::questionnaires::get_questionnaire),
        )
        .route(
            "/companies",
            get(routes::companies::list_companies).post(routes::companies::create_company),
        )
        .route(
            "/companies/{id}",
            get(routes::companies::get_company)
                .put(routes::companies::update_company)
                .delete(routes::companies::delete_company),
        )
        .route(
            "/companies/{id}/assessments",
            get(routes::companies::list_company_assessments),
        )
        .route("/assessments", post(routes::assessments::create_assessment))
        .route(
            "/assessments/{id}",
            get(routes::assessments::get_assessment).delete(routes::assessments::delete_assessment),
        )
        .route(
            "/assessments/{id}/progress",
            get(routes::assessments::get_progress),
        )
        .route(
            "/assessments/{id}/responses/{category_id}",
            put(routes::assessments::save_category_responses),
        )
        .route(
            "/assessments/{id}/current-category",
            put(routes::assessments::set_current_category),
        )
        .route(
            "/assessments/{id}/complete",
            post(routes::assessments::complete_assessment),
        )
        .layer(axum_mw::from_fn(middleware::audit::audit_log))
        .layer(cors)
        .with_state(state)
}
