//! Domain models for Gatekeep Core

pub mod role;
pub mod user;
pub mod validation;

pub use role::{Role, RoleCreationRequest, RoleUpdateRequest};
pub use user::{RegistrationRequest, User};
