//! Role domain models

use super::validation::validate_uppercase;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Role entity, keyed by its immutable upper-case `name`
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Role {
    pub name: String,
    pub visible_name: String,
}

impl From<&RoleCreationRequest> for Role {
    fn from(request: &RoleCreationRequest) -> Self {
        Self {
            name: request.name.clone(),
            visible_name: request.visible_name.clone(),
        }
    }
}

/// Input for creating a role
///
/// Missing JSON fields decode as empty strings so that they surface as
/// validation failures rather than decoding errors.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct RoleCreationRequest {
    #[validate(
        length(min = 1, max = 255),
        custom(function = "validate_uppercase")
    )]
    pub name: String,
    #[validate(length(min = 1, max = 255))]
    pub visible_name: String,
}

/// Input for updating a role; only the display label is mutable
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct RoleUpdateRequest {
    #[validate(length(min = 1, max = 255))]
    pub visible_name: String,
}
