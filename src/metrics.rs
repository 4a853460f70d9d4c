//! Prometheus metrics for mode changes and request latency.
//!
//! This module provides metrics for:
//! - Accepted mode changes, labelled by the new mode
//! - Rejected mode changes, labelled by reason
//! - HTTP request latency per endpoint

use std::time::Instant;

use metrics::{counter, describe_counter, describe_histogram, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};
use tracing::debug;

// === Metric Name Constants ===

/// Accepted mode changes counter metric name.
pub const METRIC_MODE_CHANGES: &str = "mode_changes_total";
/// Rejected mode changes counter metric name.
pub const METRIC_MODE_CHANGES_REJECTED: &str = "mode_change_rejected_total";
/// HTTP request latency metric name.
pub const METRIC_HTTP_REQUEST_LATENCY: &str = "http_request_latency_ms";

/// Initialize all metric descriptions.
/// Call this once at startup to register metrics with descriptions.
pub fn init_metrics() {
    describe_counter!(METRIC_MODE_CHANGES, "Total number of accepted mode changes");
    describe_counter!(
        METRIC_MODE_CHANGES_REJECTED,
        "Total number of mode change requests that were rejected"
    );
    describe_histogram!(
        METRIC_HTTP_REQUEST_LATENCY,
        "HTTP request latency in milliseconds"
    );

    debug!("Metrics initialized");
}

/// Install the global Prometheus recorder.
///
/// Must be called at most once per process.
pub fn install_recorder() -> Result<PrometheusHandle, BuildError> {
    PrometheusBuilder::new().install_recorder()
}

/// Increment accepted mode changes counter.
pub fn inc_mode_changes(mode: &str) {
    counter!(METRIC_MODE_CHANGES, "mode" => mode.to_string()).increment(1);
}

/// Increment rejected mode changes counter.
pub fn inc_mode_changes_rejected(reason: &'static str) {
    counter!(METRIC_MODE_CHANGES_REJECTED, "reason" => reason).increment(1);
}

/// Record HTTP request latency.
pub fn record_http_latency(start: Instant, endpoint: &str) {
    let latency_ms = start.elapsed().as_secs_f64() * 1000.0;
    histogram!(METRIC_HTTP_REQUEST_LATENCY, "endpoint" => endpoint.to_string()).record(latency_ms);
}
