//! Batch importer.
//!
//! Each record becomes one new document. Records are independent: a failed
//! write is captured in that record's outcome and the batch carries on, so
//! `succeeded + failed == total` for every run.

use std::path::Path;

use chrono::Utc;
use futures::stream::{self, StreamExt};
use serenity_firestore::types::fields_from_json;
use serenity_firestore::{DocumentStore, NewDocument};
use serenity_models::{ImportSummary, RecordOutcome, RecordReport, ResourceRecord};
use tracing::Instrument;

use crate::config::ImportConfig;
use crate::error::ImportResult;
use crate::logging::ImportLogger;
use crate::metrics::record_outcome;
use crate::source::load_records;

/// Writes resource records into one collection.
pub struct Importer<'a> {
    store: &'a dyn DocumentStore,
    collection: String,
    timestamp_field: String,
    title_field: String,
    concurrency: usize,
}

impl<'a> Importer<'a> {
    pub fn new(store: &'a dyn DocumentStore, config: &ImportConfig) -> Self {
        Self {
            store,
            collection: config.collection.clone(),
            timestamp_field: config.timestamp_field.clone(),
            title_field: config.title_field.clone(),
            concurrency: config.concurrency.max(1),
        }
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// Load `path` and import its records.
    ///
    /// Nothing is written when the file is missing or malformed.
    pub async fn import_file(&self, path: &Path) -> ImportResult<ImportSummary> {
        let records = load_records(path).await?;
        Ok(self.import_all(records).await)
    }

    /// Import records in input order.
    ///
    /// With a concurrency of 1 each write completes before the next starts.
    /// Larger values keep up to that many writes in flight; outcomes are
    /// still reported in input order.
    pub async fn import_all(&self, records: Vec<ResourceRecord>) -> ImportSummary {
        let logger = ImportLogger::new(&self.collection);
        let started_at = Utc::now();
        logger.log_start(records.len());

        let reports: Vec<RecordReport> = stream::iter(records.into_iter().enumerate())
            .map(|(index, record)| self.import_one(index, record, &logger))
            .buffered(self.concurrency)
            .collect::<Vec<_>>()
            .instrument(logger.create_span())
            .await;

        let summary = ImportSummary::from_reports(&self.collection, reports, started_at);
        logger.log_completion(&summary);
        summary
    }

    async fn import_one(&self, index: usize, record: ResourceRecord, logger: &ImportLogger) -> RecordReport {
        let title = record.label(&self.title_field).to_string();
        let doc = self.prepare(&record);

        let outcome = match self.store.add_document(&self.collection, doc).await {
            Ok(id) => {
                logger.log_written(index, &title, &id);
                RecordOutcome::Written { id }
            }
            Err(e) => {
                let error = e.to_string();
                logger.log_failed(index, &title, &error);
                RecordOutcome::Failed { error }
            }
        };
        record_outcome(&self.collection, outcome.as_str());

        RecordReport {
            index,
            title,
            outcome,
        }
    }

    /// Convert a record to a document, asking the store to stamp the
    /// creation time when the record has none.
    pub fn prepare(&self, record: &ResourceRecord) -> NewDocument {
        let doc = NewDocument::new(fields_from_json(record.fields()));
        if record.contains_field(&self.timestamp_field) {
            doc
        } else {
            doc.with_server_timestamp(self.timestamp_field.as_str())
        }
    }
}
