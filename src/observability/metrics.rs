//! Metrics collection and exposition.
//!
//! # Metrics
//! - `gateway_requests_total` (counter): requests by mode and status
//! - `gateway_request_duration_seconds` (histogram): handler latency by mode
//! - `gateway_backend_errors_total` (counter): forwarding failures by kind
//!
//! Recording is a no-op until a recorder is installed, so handlers can call
//! these unconditionally.

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Install the Prometheus recorder and its scrape listener.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

pub fn record_request(mode: &'static str, status: u16, start: Instant) {
    counter!("gateway_requests_total", "mode" => mode, "status" => status.to_string()).increment(1);
    histogram!("gateway_request_duration_seconds", "mode" => mode)
        .record(start.elapsed().as_secs_f64());
}

pub fn record_backend_error(kind: &'static str) {
    counter!("gateway_backend_errors_total", "kind" => kind).increment(1);
}
