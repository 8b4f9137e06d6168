use axum::extract::{MatchedPath, Request};
use axum::middleware::Next;
use axum::response::Response;

/// One `api_request` event per call.
///
/// `route` is the matched template (`/assessments/{id}/complete`), so
/// requests for different assessments aggregate under one key; `path` keeps
/// the concrete ids. Server errors are logged at `warn`.
pub async fn audit_log(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let route = req
        .extensions()
        .get::<MatchedPath>()
        .map(|m| m.as_str().to_string())
        .unwrap_or_default();
    let started = std::time::Instant::now();

    let response = next.run(req).await;

    let status = response.status();
    let elapsed_ms = started.elapsed().as_millis() as u64;
    if status.is_server_error() {
        tracing::warn!(%method, %route, %path, status = status.as_u16(), elapsed_ms, "api_request");
    } else {
        tracing::info!(%method, %route, %path, status = status.as_u16(), elapsed_ms, "api_request");
    }

    response
}
