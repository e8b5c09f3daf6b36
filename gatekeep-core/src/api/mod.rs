//! REST API handlers
//!
//! Handlers are thin: decode the request, call one service operation and
//! map the outcome to a response.

pub mod extract;
pub mod health;
pub mod metrics;
pub mod role;
pub mod user;
