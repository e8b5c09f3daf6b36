//! Unified error handling for Gatekeep Core
//!
//! Every failure a service can signal is an [`AppError`]. Variants that carry
//! a message are *classified*: they keep their intended status code all the
//! way to the HTTP boundary. `Database` and `Internal` are unclassified and
//! always render as a generic server fault.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Application-wide result type
pub type Result<T> = std::result::Result<T, AppError>;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    /// A mandatory parameter was missing or empty, or a keyed lookup failed.
    #[error("Bad input: {0}")]
    BadInput(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    /// A keyed mutation affected zero rows.
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Response code carried by this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadInput(_) | AppError::BadRequest(_) | AppError::Validation(_) => {
                StatusCode::BAD_REQUEST
            }
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Database(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Whether the error was raised deliberately by a service with an
    /// intended response code.
    pub fn is_classified(&self) -> bool {
        self.carried_message().is_some()
    }

    fn carried_message(&self) -> Option<&str> {
        match self {
            AppError::BadInput(msg)
            | AppError::BadRequest(msg)
            | AppError::Validation(msg)
            | AppError::Conflict(msg)
            | AppError::NotFound(msg) => Some(msg.as_str()),
            AppError::Database(_) | AppError::Internal(_) => None,
        }
    }

    fn error_type(&self) -> &'static str {
        match self {
            AppError::BadInput(_) => "bad_input",
            AppError::BadRequest(_) => "bad_request",
            AppError::Validation(_) => "validation",
            AppError::Conflict(_) => "conflict",
            AppError::NotFound(_) => "not_found",
            AppError::Database(_) => "database_error",
            AppError::Internal(_) => "internal_error",
        }
    }
}

/// Error response body
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub code: u16,
    /// Unix seconds at render time
    pub timestamp: i64,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, message: impl Into<String>, status: StatusCode) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            code: status.as_u16(),
            timestamp: chrono::Utc::now().timestamp(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = if self.is_classified() {
            tracing::debug!(code = status.as_u16(), "Classified error: {}", self);
            self.carried_message().unwrap_or_default().to_string()
        } else {
            tracing::error!("Unclassified error: {:?}", self);
            match self {
                AppError::Database(_) => "A database error occurred".to_string(),
                _ => "An internal error occurred".to_string(),
            }
        };

        let body = Json(ErrorResponse::new(self.error_type(), message, status));

        (status, body).into_response()
    }
}

// Conversion from validation errors
impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::Validation(crate::domain::validation::describe(&errors))
    }
}
