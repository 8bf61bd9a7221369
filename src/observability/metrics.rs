//! Metrics collection and exposition.
//!
//! # Metrics
//! - `catalog_proxy_requests_total` (counter): requests by resource, status
//! - `catalog_proxy_request_duration_seconds` (histogram): latency by resource
//! - `catalog_proxy_upstream_errors_total` (counter): upstream failures by kind
//!
//! # Design Decisions
//! - Recording is a no-op until a recorder is installed
//! - Prometheus exporter serves its own HTTP listener

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus recorder and its scrape endpoint.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

/// Record a completed `/api/{resource}` request.
pub fn record_request(resource: &str, status: u16, start: Instant) {
    metrics::counter!(
        "catalog_proxy_requests_total",
        "resource" => resource.to_string(),
        "status" => status.to_string()
    )
    .increment(1);

    metrics::histogram!(
        "catalog_proxy_request_duration_seconds",
        "resource" => resource.to_string()
    )
    .record(start.elapsed().as_secs_f64());
}

/// Record a failed upstream fetch or unusable upstream payload.
pub fn record_upstream_error(kind: &'static str) {
    metrics::counter!("catalog_proxy_upstream_errors_total", "kind" => kind).increment(1);
}
