//! Metrics for request tracking and monitoring.
//!
//! This module provides metrics for:
//! - Reveal requests served
//! - HTTPS redirects issued
//! - HTTP request latency

use std::time::Instant;

use metrics::{counter, describe_counter, describe_histogram, histogram};
use tracing::debug;

// === Metric Name Constants ===

/// Reveal requests served counter metric name.
pub const METRIC_REQUESTS_SERVED: &str = "reveal_requests_total";
/// HTTPS redirects issued counter metric name.
pub const METRIC_REDIRECTS_ISSUED: &str = "https_redirects_total";
/// HTTP request latency metric name.
pub const METRIC_REQUEST_LATENCY: &str = "http_request_latency_ms";

/// Initialize all metric descriptions.
/// Call this once at startup to register metrics with descriptions.
pub fn init_metrics() {
    describe_histogram!(
        METRIC_REQUEST_LATENCY,
        "HTTP request latency in milliseconds"
    );

    describe_counter!(
        METRIC_REQUESTS_SERVED,
        "Total number of reveal requests served"
    );
    describe_counter!(
        METRIC_REDIRECTS_ISSUED,
        "Total number of HTTP to HTTPS redirects issued"
    );

    debug!("Metrics initialized");
}

/// Record HTTP request latency.
pub fn record_request_latency(start: Instant) {
    let latency_ms = start.elapsed().as_secs_f64() * 1000.0;
    histogram!(METRIC_REQUEST_LATENCY).record(latency_ms);
}

/// Increment reveal requests served counter.
pub fn inc_requests_served() {
    counter!(METRIC_REQUESTS_SERVED).increment(1);
}

/// Increment redirects issued counter.
pub fn inc_redirects_issued() {
    counter!(METRIC_REDIRECTS_ISSUED).increment(1);
}
