//! Per-request Firestore metrics.

use std::time::Duration;

use metrics::{counter, histogram};

pub mod names {
    /// Requests by operation, collection and HTTP status.
    pub const REQUESTS_TOTAL: &str = "firestore_requests_total";

    /// Wall time of each request, by operation.
    pub const LATENCY_SECONDS: &str = "firestore_latency_seconds";
}

/// Record one finished request. A no-op until a recorder is installed.
pub fn record_request(operation: &'static str, collection: &str, status: u16, elapsed: Duration) {
    counter!(
        names::REQUESTS_TOTAL,
        "operation" => operation,
        "collection" => collection.to_string(),
        "status" => status.to_string()
    )
    .increment(1);

    histogram!(names::LATENCY_SECONDS, "operation" => operation).record(elapsed.as_secs_f64());
}
