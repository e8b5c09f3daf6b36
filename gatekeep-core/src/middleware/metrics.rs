//! Request correlation and HTTP metrics
//!
//! Every request gets an `x-request-id` (the caller's, if sent) that is echoed
//! on the response and carried by a `request` span, so the service logs of a
//! role or user operation can be grouped per request. Counters and latency
//! histograms are labelled with the route shape, never with a role name or an
//! email address.

use axum::{
    body::Body,
    http::{HeaderValue, Request},
    response::Response,
};
use metrics::{counter, gauge, histogram};
use std::{
    future::Future,
    pin::Pin,
    task::{Context, Poll},
    time::Instant,
};
use tower::{Layer, Service};
use tracing::Instrument;
use uuid::Uuid;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

#[derive(Clone)]
pub struct ObservabilityLayer;

impl<S> Layer<S> for ObservabilityLayer {
    type Service = ObservabilityMiddleware<S>;

    fn layer(&self, inner: S) -> Self::Service {
        ObservabilityMiddleware { inner }
    }
}

#[derive(Clone)]
pub struct ObservabilityMiddleware<S> {
    inner: S,
}

impl<S> Service<Request<Body>> for ObservabilityMiddleware<S>
where
    S: Service<Request<Body>, Response = Response> + Clone + Send + 'static,
    S::Future: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, request: Request<Body>) -> Self::Future {
        let request_id = request_id(&request);
        let timing = RequestTiming::start(request.method().as_str(), request.uri().path());
        let span = tracing::info_span!("request", request_id = %request_id);

        let mut inner = self.inner.clone();

        Box::pin(
            async move {
                let result = inner.call(request).await;

                match result {
                    Ok(mut response) => {
                        timing.finish(response.status().as_u16());
                        if let Ok(value) = HeaderValue::from_str(&request_id) {
                            response.headers_mut().insert(REQUEST_ID_HEADER, value);
                        }
                        Ok(response)
                    }
                    Err(e) => {
                        timing.abandon();
                        Err(e)
                    }
                }
            }
            .instrument(span),
        )
    }
}

fn request_id(request: &Request<Body>) -> String {
    request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| Uuid::new_v4().to_string())
}

/// In-flight bookkeeping for one request.
struct RequestTiming {
    method: String,
    route: String,
    started: Instant,
}

impl RequestTiming {
    fn start(method: &str, path: &str) -> Self {
        gauge!("gatekeep_http_requests_in_flight").increment(1.0);
        Self {
            method: method.to_string(),
            route: route_label(path),
            started: Instant::now(),
        }
    }

    fn finish(self, status: u16) {
        let elapsed = self.started.elapsed().as_secs_f64();
        counter!(
            "gatekeep_http_requests_total",
            "method" => self.method.clone(),
            "path" => self.route.clone(),
            "status" => status.to_string()
        )
        .increment(1);
        histogram!(
            "gatekeep_http_request_duration_seconds",
            "method" => self.method.clone(),
            "path" => self.route.clone()
        )
        .record(elapsed);
        self.abandon();
    }

    fn abandon(self) {
        gauge!("gatekeep_http_requests_in_flight").decrement(1.0);
    }
}

/// Route shape used as the `path` label.
///
/// `/roles/ADMIN` becomes `/roles/{name}` and `/users/jane@x.com/verify`
/// becomes `/users/{email}/verify`; `/users/registration` is a fixed route.
fn route_label(path: &str) -> String {
    let mut previous = "";
    path.split('/')
        .map(|seg| {
            let label = match previous {
                "roles" if !seg.is_empty() => "{name}",
                "users" if !seg.is_empty() && seg != "registration" => "{email}",
                _ => seg,
            };
            previous = seg;
            label
        })
        .collect::<Vec<_>>()
        .join("/")
}
