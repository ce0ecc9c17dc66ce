//! Import metrics.

use metrics::counter;

pub mod names {
    /// Records processed, by collection and outcome.
    pub const RECORDS_TOTAL: &str = "import_records_total";
}

/// Count one processed record.
pub fn record_outcome(collection: &str, outcome: &'static str) {
    counter!(
        names::RECORDS_TOTAL,
        "collection" => collection.to_string(),
        "outcome" => outcome
    )
    .increment(1);
}
