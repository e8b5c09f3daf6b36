//! Role API handlers

use crate::api::extract::ValidatedJson;
use crate::domain::{Role, RoleCreationRequest, RoleUpdateRequest};
use crate::error::Result;
use crate::state::HasServices;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchQuery {
    pub visible_name: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RolesResponse {
    pub roles: Vec<Role>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RoleResponse {
    pub role: Role,
}

/// GET /roles?visibleName=
pub async fn search<S: HasServices>(
    State(state): State<S>,
    Query(query): Query<SearchQuery>,
) -> Result<impl IntoResponse> {
    let roles = state
        .role_service()
        .search_by_visible_name(&query.visible_name)
        .await?;
    Ok(Json(RolesResponse { roles }))
}

/// POST /roles
pub async fn create<S: HasServices>(
    State(state): State<S>,
    ValidatedJson(request): ValidatedJson<RoleCreationRequest>,
) -> Result<impl IntoResponse> {
    state.role_service().create(&request).await?;
    Ok(StatusCode::OK)
}

/// GET /roles/{name}
pub async fn get<S: HasServices>(
    State(state): State<S>,
    Path(name): Path<String>,
) -> Result<impl IntoResponse> {
    let role = state.role_service().get(&name).await?;
    Ok(Json(RoleResponse { role }))
}

/// PUT /roles/{name}
pub async fn update<S: HasServices>(
    State(state): State<S>,
    Path(name): Path<String>,
    ValidatedJson(request): ValidatedJson<RoleUpdateRequest>,
) -> Result<impl IntoResponse> {
    state.role_service().update(&name, &request).await?;
    Ok(StatusCode::OK)
}

/// DELETE /roles/{name}
pub async fn delete<S: HasServices>(
    State(state): State<S>,
    Path(name): Path<String>,
) -> Result<impl IntoResponse> {
    state.role_service().delete(&name).await?;
    Ok(StatusCode::OK)
}
