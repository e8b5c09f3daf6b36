//! Role API HTTP handler tests

use super::{
    build_test_router, create_test_config, delete_json, get_json, post_json, post_raw, put_json,
    TestAppState,
};
use crate::api::create_test_role;
use gatekeep_core::api::role::{RoleResponse, RolesResponse};
use gatekeep_core::error::ErrorResponse;
use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use std::time::Duration;

#[tokio::test]
async fn test_search_roles_lists_all() {
    let state = TestAppState::new();
    state
        .role_repo
        .add_role(create_test_role("ADMIN", "Administrator"))
        .await;
    state
        .role_repo
        .add_role(create_test_role("USER", "Regular user"))
        .await;
    let app = build_test_router(state);

    let (status, body): (StatusCode, Option<RolesResponse>) = get_json(&app, "/roles").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.unwrap().roles.len(), 2);
}

#[tokio::test]
async fn test_search_roles_by_visible_name() {
    let state = TestAppState::new();
    state
        .role_repo
        .add_role(create_test_role("ADMIN", "Administrator"))
        .await;
    state
        .role_repo
        .add_role(create_test_role("USER", "Regular user"))
        .await;
    let app = build_test_router(state);

    let (status, body): (StatusCode, Option<RolesResponse>) =
        get_json(&app, "/roles?visibleName=Admin").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body.unwrap().roles,
        vec![create_test_role("ADMIN", "Administrator")]
    );
}

#[tokio::test]
async fn test_search_roles_wire_shape() {
    let state = TestAppState::new();
    state
        .role_repo
        .add_role(create_test_role("ADMIN", "Administrator"))
        .await;
    let app = build_test_router(state);

    let (_, body): (StatusCode, Option<Value>) = get_json(&app, "/roles").await;

    assert_eq!(
        body.unwrap(),
        json!({"roles": [{"name": "ADMIN", "visibleName": "Administrator"}]})
    );
}

#[tokio::test]
async fn test_create_and_get_role() {
    let state = TestAppState::new();
    let app = build_test_router(state.clone());

    let (status, body): (StatusCode, Option<Value>) = post_json(
        &app,
        "/roles",
        &json!({"name": "ADMIN", "visibleName": "Administrator"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.is_none());

    let (status, body): (StatusCode, Option<RoleResponse>) = get_json(&app, "/roles/ADMIN").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.unwrap().role, create_test_role("ADMIN", "Administrator"));
}

#[tokio::test]
async fn test_create_duplicate_role_conflicts() {
    let state = TestAppState::new();
    state
        .role_repo
        .add_role(create_test_role("ADMIN", "Administrator"))
        .await;
    let app = build_test_router(state);

    let (status, body): (StatusCode, Option<ErrorResponse>) = post_json(
        &app,
        "/roles",
        &json!({"name": "ADMIN", "visibleName": "Other"}),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    let body = body.unwrap();
    assert_eq!(body.code, 409);
    assert_eq!(body.message, "Role already existing");
}

#[tokio::test]
async fn test_create_lowercase_role_is_rejected() {
    let state = TestAppState::new();
    let app = build_test_router(state.clone());

    let (status, body): (StatusCode, Option<ErrorResponse>) = post_json(
        &app,
        "/roles",
        &json!({"name": "admin", "visibleName": "Administrator"}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body.unwrap().error, "validation");
    assert_eq!(state.role_repo.stats.begun(), 0);
}

#[tokio::test]
async fn test_create_with_missing_field_is_rejected() {
    let state = TestAppState::new();
    let app = build_test_router(state);

    let (status, body): (StatusCode, Option<ErrorResponse>) =
        post_json(&app, "/roles", &json!({"name": "ADMIN"})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.unwrap().message.contains("visible_name"));
}

#[tokio::test]
async fn test_create_with_malformed_body_is_bad_request() {
    let state = TestAppState::new();
    let app = build_test_router(state);

    let (status, body): (StatusCode, Option<ErrorResponse>) =
        post_raw(&app, "/roles", "{not json").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body.unwrap().error, "bad_request");
}

#[tokio::test]
async fn test_get_missing_role_is_bad_request() {
    let state = TestAppState::new();
    let app = build_test_router(state);

    let (status, body): (StatusCode, Option<ErrorResponse>) = get_json(&app, "/roles/GHOST").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body.unwrap().message, "No role found with the given name");
}

#[tokio::test]
async fn test_update_role() {
    let state = TestAppState::new();
    state
        .role_repo
        .add_role(create_test_role("ADMIN", "Administrator"))
        .await;
    let app = build_test_router(state.clone());

    let (status, _): (StatusCode, Option<Value>) =
        put_json(&app, "/roles/ADMIN", &json!({"visibleName": "Super Admin"})).await;
    assert_eq!(status, StatusCode::OK);

    assert_eq!(
        state.role_repo.roles().await,
        vec![create_test_role("ADMIN", "Super Admin")]
    );
}

#[tokio::test]
async fn test_update_missing_role_is_not_found() {
    let state = TestAppState::new();
    let app = build_test_router(state);

    let (status, body): (StatusCode, Option<ErrorResponse>) =
        put_json(&app, "/roles/GHOST", &json!({"visibleName": "Ghost"})).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body.unwrap().code, 404);
}

#[tokio::test]
async fn test_delete_role() {
    let state = TestAppState::new();
    state
        .role_repo
        .add_role(create_test_role("ADMIN", "Administrator"))
        .await;
    let app = build_test_router(state.clone());

    let (status, body): (StatusCode, Option<Value>) = delete_json(&app, "/roles/ADMIN").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.is_none());
    assert!(state.role_repo.roles().await.is_empty());

    let (status, _): (StatusCode, Option<ErrorResponse>) = delete_json(&app, "/roles/ADMIN").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_admin_scenario_over_http() {
    let state = TestAppState::new();
    let app = build_test_router(state);
    let admin = json!({"name": "ADMIN", "visibleName": "Administrator"});

    let (status, _): (StatusCode, Option<Value>) = post_json(&app, "/roles", &admin).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _): (StatusCode, Option<Value>) = post_json(&app, "/roles", &admin).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _): (StatusCode, Option<Value>) =
        put_json(&app, "/roles/ADMIN", &json!({"visibleName": "Root"})).await;
    assert_eq!(status, StatusCode::OK);

    let (_, body): (StatusCode, Option<RoleResponse>) = get_json(&app, "/roles/ADMIN").await;
    assert_eq!(body.unwrap().role.visible_name, "Root");

    let (status, _): (StatusCode, Option<Value>) = delete_json(&app, "/roles/ADMIN").await;
    assert_eq!(status, StatusCode::OK);

    let (status, _): (StatusCode, Option<Value>) = get_json(&app, "/roles/ADMIN").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_slow_request_times_out_with_error_payload() {
    let mut config = create_test_config();
    config.request_timeout_secs = 1;
    let state = TestAppState::with_config(config);
    state
        .role_repo
        .add_role(create_test_role("ADMIN", "Administrator"))
        .await;
    state.role_repo.set_begin_delay(Duration::from_secs(5));
    let app = build_test_router(state.clone());

    let (status, body): (StatusCode, Option<ErrorResponse>) =
        get_json(&app, "/roles/ADMIN").await;

    assert_eq!(status, StatusCode::REQUEST_TIMEOUT);
    let body = body.unwrap();
    assert_eq!(body.error, "timeout");
    assert_eq!(body.code, 408);
    assert_eq!(state.role_repo.stats.committed(), 0);
}
