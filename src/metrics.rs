//! Prometheus metrics for authentication observability.
//!
//! Metrics are exposed via a dedicated HTTP listener (default port: 9090).
//!
//! # Available Metrics
//!
//! - `hmac_gate_auth_requests_total` - verification outcomes
//!   (label: outcome = authenticated | rejected)
//! - `hmac_gate_auth_rejections_total` - rejections by wire code
//!   (label: code, e.g. `INVALID_SIGNATURE`)
//!
//! Recording is fire-and-forget: with no exporter installed the macros are
//! no-ops, so unit tests and metrics-disabled deployments pay nothing.

use std::net::SocketAddr;

use metrics::{counter, describe_counter};
use metrics_exporter_prometheus::PrometheusBuilder;
use tracing::{error, info};

/// Metric names as constants for consistency.
pub mod names {
    pub const AUTH_REQUESTS_TOTAL: &str = "hmac_gate_auth_requests_total";
    pub const AUTH_REJECTIONS_TOTAL: &str = "hmac_gate_auth_rejections_total";
}

/// Initialize the Prometheus metrics exporter.
///
/// # Errors
///
/// Returns an error message when the exporter cannot be installed (for
/// example, when the listener port is already bound).
pub fn init_metrics(metrics_addr: SocketAddr) -> Result<(), String> {
    PrometheusBuilder::new()
        .with_http_listener(metrics_addr)
        .install()
        .map_err(|e| format!("Failed to install Prometheus exporter: {e}"))?;

    describe_counter!(
        names::AUTH_REQUESTS_TOTAL,
        "Total requests seen by the authentication layer, by outcome"
    );
    describe_counter!(
        names::AUTH_REJECTIONS_TOTAL,
        "Total authentication rejections, by error code"
    );

    info!(addr = %metrics_addr, "Prometheus metrics endpoint started");
    Ok(())
}

/// Try to initialize metrics, logging any errors but not failing.
pub fn try_init_metrics(metrics_addr: SocketAddr) {
    if let Err(e) = init_metrics(metrics_addr) {
        error!(error = %e, "Failed to initialize metrics, continuing without metrics");
    }
}

/// Record a verification outcome ("authenticated" or "rejected").
pub fn record_auth_outcome(outcome: &str) {
    counter!(names::AUTH_REQUESTS_TOTAL, "outcome" => outcome.to_string()).increment(1);
}

/// Record a rejection by wire code.
pub fn record_auth_rejection(code: &str) {
    counter!(names::AUTH_REJECTIONS_TOTAL, "code" => code.to_string()).increment(1);
}
