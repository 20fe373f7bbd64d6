use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use chrono::NaiveDate;
use serde_json::json;
use tower::ServiceExt;

use super::common::*;
use crate::analytics::router::{
    self, analytics_router, DepartmentsRequest, FormRequest, RecommendationsRequest,
};
use crate::analytics::service::AnalyticsService;

fn march(day: u32) -> chrono::NaiveDateTime {
    completed_on(NaiveDate::from_ymd_opt(2026, 3, day).expect("valid date"))
}

fn copsoq_service() -> Arc<AnalyticsService<MemoryRepository>> {
    let questions = copsoq_questions();
    let submission = submitted("s-1", "p-1", &questions, &["sempre"; 8], Some(march(2)));
    Arc::new(service(MemoryRepository::copsoq(vec![submission])))
}

#[tokio::test]
async fn form_handler_returns_the_report() {
    let response = router::form_handler::<MemoryRepository>(
        State(copsoq_service()),
        axum::Json(FormRequest {
            form_id: "f-1".to_string(),
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body["participation"], json!(50.0));
    assert!(body["dimensions"].is_array());
}

#[tokio::test]
async fn form_handler_returns_not_found_for_unknown_forms() {
    let response = router::form_handler::<MemoryRepository>(
        State(copsoq_service()),
        axum::Json(FormRequest {
            form_id: "missing".to_string(),
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn qs_handler_rejects_scale_questionnaires() {
    let response = router::qs_handler::<MemoryRepository>(
        State(copsoq_service()),
        axum::Json(FormRequest {
            form_id: "f-1".to_string(),
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = read_json_body(response).await;
    assert!(body["error"].as_str().unwrap_or_default().contains("COPSOQ"));
}

#[tokio::test]
async fn recommendations_handler_rejects_half_open_windows() {
    let response = router::recommendations_handler::<MemoryRepository>(
        State(copsoq_service()),
        axum::Json(RecommendationsRequest {
            form_id: "f-1".to_string(),
            from: Some(NaiveDate::from_ymd_opt(2026, 3, 1).expect("valid")),
            to: None,
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn departments_handler_narrows_to_the_requested_department() {
    let response = router::departments_handler::<MemoryRepository>(
        State(copsoq_service()),
        axum::Json(DepartmentsRequest {
            form_id: "f-1".to_string(),
            department_id: Some("dep-2".to_string()),
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body.as_array().map(|reports| reports.len()), Some(1));
    assert_eq!(body[0]["department"], json!("Comercial"));
}

#[tokio::test]
async fn handlers_surface_repository_outages_as_server_errors() {
    let service = Arc::new(AnalyticsService::new(Arc::new(UnavailableRepository)));

    let response = router::radar_handler::<UnavailableRepository>(
        State(service),
        axum::Json(router::RadarRequest {
            form_id: "f-1".to_string(),
            top_k: None,
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn analytics_routes_accept_json_payloads() {
    let router = analytics_router(copsoq_service());

    let response = router
        .oneshot(
            axum::http::Request::post("/api/v1/analytics/radar")
                .header(axum::http::header::CONTENT_TYPE, "application/json")
                .body(axum::body::Body::from(
                    serde_json::to_vec(&json!({ "form_id": "f-1", "top_k": 2 })).expect("payload"),
                ))
                .expect("request"),
        )
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body.as_array().map(|entries| entries.len()), Some(2));
}
