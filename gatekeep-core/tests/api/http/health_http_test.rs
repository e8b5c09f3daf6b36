//! Health, readiness, metrics and fallback tests

use super::{build_test_router, get_json, TestAppState};
use gatekeep_core::api::health::{HealthResponse, ReadinessResponse};
use gatekeep_core::error::ErrorResponse;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use std::sync::atomic::Ordering;
use tower::ServiceExt;

#[tokio::test]
async fn test_health() {
    let app = build_test_router(TestAppState::new());

    let (status, body): (StatusCode, Option<HealthResponse>) = get_json(&app, "/health").await;

    assert_eq!(status, StatusCode::OK);
    let body = body.unwrap();
    assert_eq!(body.status, "healthy");
    assert_eq!(body.version, env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_ready_reflects_database() {
    let state = TestAppState::new();
    let app = build_test_router(state.clone());

    let (status, body): (StatusCode, Option<ReadinessResponse>) = get_json(&app, "/ready").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.unwrap().database, "up");

    state.db_ready.store(false, Ordering::SeqCst);
    let (status, body): (StatusCode, Option<ReadinessResponse>) = get_json(&app, "/ready").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    let body = body.unwrap();
    assert_eq!(body.status, "not_ready");
    assert_eq!(body.database, "down");
}

#[tokio::test]
async fn test_metrics_disabled_is_not_found() {
    let app = build_test_router(TestAppState::new());

    let (status, _): (StatusCode, Option<()>) = get_json(&app, "/metrics").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_unknown_route_uses_error_payload() {
    let app = build_test_router(TestAppState::new());

    let (status, body): (StatusCode, Option<ErrorResponse>) = get_json(&app, "/nope").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body.unwrap().code, 404);
}

#[tokio::test]
async fn test_request_id_is_generated_and_echoed() {
    let app = build_test_router(TestAppState::new());

    let generated = app
        .clone()
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert!(generated.headers().contains_key("x-request-id"));

    let echoed = app
        .oneshot(
            Request::get("/health")
                .header("x-request-id", "req-123")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(echoed.headers().get("x-request-id").unwrap(), "req-123");
}
