//! TraceLayer span maker that redacts sensitive query parameters.

use axum::http::Request;
use tower_http::trace::MakeSpan;
use tracing::Span;

/// Query parameter names whose values must be redacted in logs.
const SENSITIVE_PARAMS: &[&str] = &["password", "secret", "secret_key", "token", "email"];

/// A `MakeSpan` implementation that logs the request URI with sensitive
/// query values replaced by `[REDACTED]`.
#[derive(Clone, Debug)]
pub struct SanitizedMakeSpan;

impl<B> MakeSpan<B> for SanitizedMakeSpan {
    fn make_span(&mut self, request: &Request<B>) -> Span {
        let method = request.method();
        let sanitized = sanitize_uri(request.uri());

        tracing::info_span!(
            "http",
            method = %method,
            uri = %sanitized,
            version = ?request.version(),
        )
    }
}

/// Example: `/roles?visibleName=Admin&password=pw`
/// becomes `/roles?visibleName=Admin&password=[REDACTED]`
fn sanitize_uri(uri: &axum::http::Uri) -> String {
    let query = match uri.query() {
        Some(q) => q,
        None => return uri.path().to_string(),
    };

    let sanitized_pairs: Vec<String> = query
        .split('&')
        .map(|pair| match pair.split_once('=') {
            Some((key, _value))
                if SENSITIVE_PARAMS
                    .iter()
                    .any(|s| key.eq_ignore_ascii_case(s)) =>
            {
                format!("{key}=[REDACTED]")
            }
            _ => pair.to_string(),
        })
        .collect();

    format!("{}?{}", uri.path(), sanitized_pairs.join("&"))
}
