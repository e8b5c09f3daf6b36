//! HTTP middleware for Gatekeep Core
//!
//! - Request id, span and Prometheus metrics per request
//! - TraceLayer span maker with query redaction
//! - Normalization of framework error responses

pub mod error_response;
pub mod metrics;
pub mod trace;

pub use error_response::normalize_error_response;
pub use metrics::ObservabilityLayer;
pub use trace::SanitizedMakeSpan;
