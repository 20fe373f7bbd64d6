use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::json;

use super::domain::{DepartmentId, FormId};
use super::recommend::DateRange;
use super::repository::{RepositoryError, SurveyRepository};
use super::service::{AnalyticsError, AnalyticsService};

/// Router builder exposing the analytics report endpoints.
pub fn analytics_router<R>(service: Arc<AnalyticsService<R>>) -> Router
where
    R: SurveyRepository + 'static,
{
    Router::new()
        .route("/api/v1/analytics/form", post(form_handler::<R>))
        .route(
            "/api/v1/analytics/departments",
            post(departments_handler::<R>),
        )
        .route("/api/v1/analytics/radar", post(radar_handler::<R>))
        .route(
            "/api/v1/analytics/recommendations",
            post(recommendations_handler::<R>),
        )
        .route("/api/v1/analytics/qs", post(qs_handler::<R>))
        .with_state(service)
}

#[derive(Debug, Deserialize)]
pub(crate) struct FormRequest {
    pub(crate) form_id: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct DepartmentsRequest {
    pub(crate) form_id: String,
    #[serde(default)]
    pub(crate) department_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RadarRequest {
    pub(crate) form_id: String,
    #[serde(default)]
    pub(crate) top_k: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RecommendationsRequest {
    pub(crate) form_id: String,
    #[serde(default)]
    pub(crate) from: Option<NaiveDate>,
    #[serde(default)]
    pub(crate) to: Option<NaiveDate>,
}

pub(crate) async fn form_handler<R>(
    State(service): State<Arc<AnalyticsService<R>>>,
    axum::Json(request): axum::Json<FormRequest>,
) -> Response
where
    R: SurveyRepository + 'static,
{
    respond(service.form_analytics(&FormId(request.form_id)))
}

pub(crate) async fn departments_handler<R>(
    State(service): State<Arc<AnalyticsService<R>>>,
    axum::Json(request): axum::Json<DepartmentsRequest>,
) -> Response
where
    R: SurveyRepository + 'static,
{
    let department = request.department_id.map(DepartmentId);
    respond(service.department_reports(&FormId(request.form_id), department.as_ref()))
}

pub(crate) async fn radar_handler<R>(
    State(service): State<Arc<AnalyticsService<R>>>,
    axum::Json(request): axum::Json<RadarRequest>,
) -> Response
where
    R: SurveyRepository + 'static,
{
    respond(service.domain_radar(&FormId(request.form_id), request.top_k))
}

pub(crate) async fn recommendations_handler<R>(
    State(service): State<Arc<AnalyticsService<R>>>,
    axum::Json(request): axum::Json<RecommendationsRequest>,
) -> Response
where
    R: SurveyRepository + 'static,
{
    let range = match (request.from, request.to) {
        (Some(from), Some(to)) => Some(DateRange { from, to }),
        (None, None) => None,
        _ => {
            let payload = json!({ "error": "from and to must be supplied together" });
            return (StatusCode::BAD_REQUEST, axum::Json(payload)).into_response();
        }
    };
    respond(service.recommendations(&FormId(request.form_id), range.as_ref()))
}

pub(crate) async fn qs_handler<R>(
    State(service): State<Arc<AnalyticsService<R>>>,
    axum::Json(request): axum::Json<FormRequest>,
) -> Response
where
    R: SurveyRepository + 'static,
{
    respond(service.qs_report(&FormId(request.form_id)))
}

fn respond<T: serde::Serialize>(result: Result<T, AnalyticsError>) -> Response {
    match result {
        Ok(value) => (StatusCode::OK, axum::Json(value)).into_response(),
        Err(error) => {
            let status = match &error {
                AnalyticsError::FormNotFound(_)
                | AnalyticsError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
                AnalyticsError::UnsupportedFamily { .. } => StatusCode::UNPROCESSABLE_ENTITY,
                AnalyticsError::Repository(RepositoryError::Unavailable(_)) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            };
            let payload = json!({ "error": error.to_string() });
            (status, axum::Json(payload)).into_response()
        }
    }
}
