//! Import outcome models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Result of writing one record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RecordOutcome {
    /// Written as a new document with the store-generated id.
    Written { id: String },
    /// Write failed; the batch carried on.
    Failed { error: String },
}

impl RecordOutcome {
    pub fn is_written(&self) -> bool {
        matches!(self, RecordOutcome::Written { .. })
    }

    /// Generated document id, if the write succeeded.
    pub fn document_id(&self) -> Option<&str> {
        match self {
            RecordOutcome::Written { id } => Some(id),
            RecordOutcome::Failed { .. } => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RecordOutcome::Written { .. } => "written",
            RecordOutcome::Failed { .. } => "failed",
        }
    }
}

/// Outcome of one record, tagged with its input position and title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordReport {
    /// Zero-based position in the source file.
    pub index: usize,
    /// Display title of the record.
    pub title: String,
    pub outcome: RecordOutcome,
}

/// Aggregate result of an import run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportSummary {
    /// Target collection.
    pub collection: String,
    /// Number of records processed.
    pub total: usize,
    /// Records written.
    pub succeeded: usize,
    /// Records that failed to write.
    pub failed: usize,
    /// Per-record detail, in input order.
    pub records: Vec<RecordReport>,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl ImportSummary {
    /// Build a summary from per-record reports.
    ///
    /// Counts are derived from the reports, so `succeeded + failed == total`
    /// holds by construction.
    pub fn from_reports(
        collection: impl Into<String>,
        records: Vec<RecordReport>,
        started_at: DateTime<Utc>,
    ) -> Self {
        let succeeded = records.iter().filter(|r| r.outcome.is_written()).count();
        let total = records.len();

        Self {
            collection: collection.into(),
            total,
            succeeded,
            failed: total - succeeded,
            records,
            started_at,
            finished_at: Utc::now(),
        }
    }

    /// Reports for records that failed.
    pub fn failures(&self) -> impl Iterator<Item = &RecordReport> {
        self.records.iter().filter(|r| !r.outcome.is_written())
    }

    pub fn has_failures(&self) -> bool {
        self.failed > 0
    }

    /// Generated ids of written documents, in input order.
    pub fn document_ids(&self) -> Vec<&str> {
        self.records
            .iter()
            .filter_map(|r| r.outcome.document_id())
            .collect()
    }

    /// Wall-clock duration of the run in milliseconds.
    pub fn elapsed_ms(&self) -> i64 {
        (self.finished_at - self.started_at).num_milliseconds()
    }
}
