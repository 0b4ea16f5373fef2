//! Metrics collection and exposition.
//!
//! # Metrics
//! - `influx_proxy_requests_total` (counter): relayed requests by method, status
//! - `influx_proxy_upstream_duration_seconds` (histogram): upstream round trip
//! - `influx_proxy_errors_total` (counter): failed requests by error kind
//!
//! The `metrics` macros are no-ops until a recorder is installed, so the
//! request path records unconditionally.

use std::net::SocketAddr;
use std::time::Duration;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Install the Prometheus recorder and its scrape endpoint.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

/// Record a request that was relayed from the upstream.
pub fn record_request(method: &str, status: u16, upstream_elapsed: Duration) {
    counter!(
        "influx_proxy_requests_total",
        "method" => method.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
    histogram!("influx_proxy_upstream_duration_seconds", "method" => method.to_string())
        .record(upstream_elapsed.as_secs_f64());
}

/// Record a request that ended in a local 500.
pub fn record_error(method: &str, kind: &'static str) {
    counter!(
        "influx_proxy_errors_total",
        "method" => method.to_string(),
        "kind" => kind
    )
    .increment(1);
}
