//! Liveness and readiness probes
//!
//! `/health` answers as long as the process serves HTTP. `/ready` also
//! requires the database to answer, so an orchestrator stops routing role and
//! user traffic to an instance whose pool is gone.

use crate::state::HasServices;
use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ReadinessResponse {
    /// `ready` or `not_ready`
    pub status: String,
    /// `up` or `down`
    pub database: String,
}

impl ReadinessResponse {
    fn from_database(up: bool) -> (StatusCode, Self) {
        if up {
            (
                StatusCode::OK,
                Self {
                    status: "ready".to_string(),
                    database: "up".to_string(),
                },
            )
        } else {
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Self {
                    status: "not_ready".to_string(),
                    database: "down".to_string(),
                },
            )
        }
    }
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

pub async fn ready<S: HasServices>(
    State(state): State<S>,
) -> (StatusCode, Json<ReadinessResponse>) {
    let database_up = state.check_ready().await;
    if !database_up {
        tracing::warn!("Readiness probe failed: database unreachable");
    }

    let (status, body) = ReadinessResponse::from_database(database_up);
    (status, Json(body))
}
