use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use serde::Serialize;
use serde_json::json;
use stack_advisor::advisor::sessions::{advisor_router, AdvisorSessionService, SessionRepository};
use stack_advisor::advisor::{minimum_questions, Candidate, Catalog};
use std::sync::Arc;

#[derive(Debug, Serialize)]
pub(crate) struct CatalogResponse {
    pub(crate) count: usize,
    pub(crate) minimum_questions: u32,
    pub(crate) stacks: Vec<Arc<Candidate>>,
}

pub(crate) fn with_advisor_routes<R>(service: Arc<AdvisorSessionService<R>>) -> axum::Router
where
    R: SessionRepository + 'static,
{
    advisor_router(service)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route("/api/v1/catalog", axum::routing::get(catalog_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn catalog_endpoint(
    Extension(catalog): Extension<Arc<Catalog>>,
) -> Json<CatalogResponse> {
    Json(CatalogResponse {
        count: catalog.len(),
        minimum_questions: minimum_questions(catalog.len()),
        stacks: catalog.candidates().to_vec(),
    })
}
