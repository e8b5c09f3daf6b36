//! Gatekeep Core - Identity Service Backend
//!
//! Users and roles over a transactional service layer, exposed as a REST
//! API. Every service operation runs in its own database transaction and
//! reports failures as a classified [`AppError`].

pub mod api;
pub mod config;
pub mod crypto;
pub mod domain;
pub mod error;
pub mod middleware;
pub mod migration;
pub mod repository;
pub mod server;
pub mod service;
pub mod state;
pub mod telemetry;

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, Result};
