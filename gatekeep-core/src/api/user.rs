//! User API handlers

use crate::api::extract::ValidatedJson;
use crate::domain::RegistrationRequest;
use crate::error::Result;
use crate::state::HasServices;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};

/// POST /users/registration
pub async fn registration<S: HasServices>(
    State(state): State<S>,
    ValidatedJson(request): ValidatedJson<RegistrationRequest>,
) -> Result<impl IntoResponse> {
    state
        .user_service()
        .registration(
            &request.first_name,
            &request.last_name,
            &request.email,
            &request.password,
        )
        .await?;
    Ok(StatusCode::OK)
}

/// POST /users/{email}/verify
pub async fn verify<S: HasServices>(
    State(state): State<S>,
    Path(email): Path<String>,
) -> Result<impl IntoResponse> {
    state.user_service().verify(&email).await?;
    Ok(StatusCode::OK)
}
