use crate::infra::{AppState, InMemorySurveyRepository};
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::json;
use sondar::analytics::{
    analytics_router, AnalyticsError, AnalyticsService, FormId, SurveyCsvImporter,
    SurveyRepository,
};
use sondar::error::AppError;
use std::io::Cursor;
use std::sync::Arc;

pub(crate) fn with_analytics_routes<R>(service: Arc<AnalyticsService<R>>) -> axum::Router
where
    R: SurveyRepository + 'static,
{
    analytics_router(service)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
}

/// Import routes mutate the store, so they are bound to the in-memory
/// repository rather than the generic analytics seam.
pub(crate) fn import_router(repository: Arc<InMemorySurveyRepository>) -> axum::Router {
    axum::Router::new()
        .route(
            "/api/v1/analytics/import",
            axum::routing::post(import_endpoint),
        )
        .with_state(repository)
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

#[derive(Debug, Deserialize)]
pub(crate) struct ImportRequest {
    pub(crate) form_id: String,
    pub(crate) csv: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct ImportSummary {
    pub(crate) submissions: usize,
    pub(crate) profiles: usize,
    pub(crate) departments: usize,
}

pub(crate) async fn import_endpoint(
    State(repository): State<Arc<InMemorySurveyRepository>>,
    Json(payload): Json<ImportRequest>,
) -> Result<Json<ImportSummary>, AppError> {
    let form_id = FormId(payload.form_id);
    let questions = repository
        .question_set(&form_id)
        .ok_or_else(|| AnalyticsError::FormNotFound(form_id.clone()))
        .map_err(AppError::from)?;

    let reader = Cursor::new(payload.csv.into_bytes());
    let imported = SurveyCsvImporter::from_reader(reader, &form_id, &questions)?;
    let summary = ImportSummary {
        submissions: imported.submissions.len(),
        profiles: imported.profiles.len(),
        departments: imported.departments.len(),
    };

    repository.absorb(&form_id, imported);
    Ok(Json(summary))
}
