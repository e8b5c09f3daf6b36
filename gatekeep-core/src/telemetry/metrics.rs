//! Prometheus metrics setup and metric definitions

use metrics::{describe_counter, describe_gauge, describe_histogram, gauge};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

/// Install the Prometheus recorder and return a handle for rendering metrics.
pub fn install_prometheus_recorder() -> anyhow::Result<PrometheusHandle> {
    // Seconds; Prometheus defaults plus sub-millisecond buckets.
    let buckets = [
        0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0,
    ];

    let handle = PrometheusBuilder::new()
        .set_buckets(&buckets)?
        .install_recorder()?;
    Ok(handle)
}

/// Register metric descriptions so HELP/TYPE lines are present from startup.
pub fn describe_metrics() {
    describe_counter!(
        "gatekeep_http_requests_total",
        "Total number of HTTP requests"
    );
    describe_histogram!(
        "gatekeep_http_request_duration_seconds",
        "HTTP request duration in seconds"
    );
    describe_gauge!(
        "gatekeep_http_requests_in_flight",
        "Number of HTTP requests currently being processed"
    );

    gauge!("gatekeep_http_requests_in_flight").set(0.0);
}
