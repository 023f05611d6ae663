//! Metrics collection and exposition.
//!
//! # Metrics
//! - `relay_connections_total` (counter, label `role`): accepted connections
//! - `relay_source_bytes_total` (counter): bytes read from the source client
//! - `relay_replayed_bytes_total` (counter): bytes sent to replay clients
//! - `relay_forwarded_bytes_total` (counter): bytes relayed to the source
//! - `relay_buffered_bytes` (gauge): current buffer occupancy
//!
//! # Design Decisions
//! - Low-overhead metric updates at the relay's hot call sites
//! - Exporter is optional; with it disabled the macros are no-ops

use std::net::SocketAddr;

use metrics::{describe_counter, describe_gauge};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter on the given address and register metric
/// descriptions. Failure to install is logged, not fatal: the relay works
/// without its metrics endpoint.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => {
            tracing::info!(address = %addr, "Metrics endpoint started");
        }
        Err(e) => {
            tracing::error!(address = %addr, error = %e, "Failed to start metrics endpoint");
            return;
        }
    }

    describe_counter!(
        "relay_connections_total",
        "Total connections accepted, by listener role"
    );
    describe_counter!(
        "relay_source_bytes_total",
        "Total bytes read from the source client"
    );
    describe_counter!(
        "relay_replayed_bytes_total",
        "Total bytes sent to replay clients"
    );
    describe_counter!(
        "relay_forwarded_bytes_total",
        "Total bytes relayed from forward clients to the source client"
    );
    describe_gauge!("relay_buffered_bytes", "Bytes currently buffered");
}
