//! User domain models

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// User entity, keyed by `email`
///
/// `password` holds derived secret material and is never serialized.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(skip_serializing, default)]
    pub password: String,
    pub verified: bool,
}

impl User {
    /// Build the row inserted by a registration; users always start unverified.
    pub fn for_registration(
        first_name: &str,
        last_name: &str,
        email: &str,
        stored_password: String,
    ) -> Self {
        Self {
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            email: email.to_string(),
            password: stored_password,
            verified: false,
        }
    }
}

/// Registration payload
///
/// First and last names must be exactly 50 characters long.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct RegistrationRequest {
    #[validate(length(equal = 50))]
    pub first_name: String,
    #[validate(length(equal = 50))]
    pub last_name: String,
    #[validate(email, length(min = 1, max = 255))]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}
