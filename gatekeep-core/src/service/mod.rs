//! Business logic layer
//!
//! Every operation runs inside exactly one repository transaction and
//! reports failures as a classified [`crate::error::AppError`].

pub mod role;
pub mod user;

pub use role::RoleService;
pub use user::UserService;
