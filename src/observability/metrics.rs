//! Metrics collection and exposition.
//!
//! # Responsibilities
//! - Define gateway metrics (requests, latency, failures, routing decisions)
//! - Expose Prometheus-compatible metrics endpoint
//! - Track per-backend metrics
//!
//! # Metrics
//! - `gateway_requests_total` (counter): forwarded requests by backend, status
//! - `gateway_forward_duration_seconds` (histogram): outbound call latency
//! - `gateway_forward_failures_total` (counter): transport failures by backend
//! - `gateway_routing_decisions_total` (counter): selector picks by backend
//!
//! Recording is a no-op until [`init_metrics`] installs the exporter.

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

use crate::load_balancer::BackendId;

/// Install the Prometheus exporter with its own HTTP listener.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics exporter listening");
    Ok(())
}

/// Record a completed forward, successful or not.
pub fn record_forward(backend: BackendId, status: u16, start: Instant) {
    ::metrics::counter!(
        "gateway_requests_total",
        "backend" => backend.as_str(),
        "status" => status.to_string()
    )
    .increment(1);
    ::metrics::histogram!("gateway_forward_duration_seconds", "backend" => backend.as_str())
        .record(start.elapsed().as_secs_f64());
}

pub fn record_failure(backend: BackendId) {
    ::metrics::counter!("gateway_forward_failures_total", "backend" => backend.as_str())
        .increment(1);
}

pub fn record_decision(backend: BackendId) {
    ::metrics::counter!("gateway_routing_decisions_total", "backend" => backend.as_str())
        .increment(1);
}
