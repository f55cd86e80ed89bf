//! Metrics collection and exposition.
//!
//! # Metrics
//! - `bff_requests_total` (counter): inbound requests by route, status
//! - `bff_request_duration_seconds` (histogram): inbound latency by route
//! - `bff_upstream_requests_total` (counter): explorer calls by endpoint, outcome

use metrics::{counter, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};
use std::net::SocketAddr;
use std::time::Instant;

/// Install the Prometheus recorder and its scrape listener.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics exporter listening");
    Ok(())
}

/// Record one completed inbound request.
pub fn record_request(route: &str, status: u16, start: Instant) {
    let route = route.to_string();
    counter!(
        "bff_requests_total",
        "route" => route.clone(),
        "status" => status.to_string()
    )
    .increment(1);
    histogram!("bff_request_duration_seconds", "route" => route)
        .record(start.elapsed().as_secs_f64());
}

/// Record one explorer call.
pub fn record_upstream(endpoint: &'static str, ok: bool) {
    let outcome = if ok { "success" } else { "failure" };
    counter!(
        "bff_upstream_requests_total",
        "endpoint" => endpoint,
        "outcome" => outcome
    )
    .increment(1);
}
