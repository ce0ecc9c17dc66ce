//! Tracing setup and structured import logging.

use serenity_models::ImportSummary;
use tracing::{error, info, Span};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use uuid::Uuid;

/// Install the global tracing subscriber.
///
/// `LOG_FORMAT=json` selects JSON lines, anything else ANSI text. `RUST_LOG`
/// adds to the default `serenity=info` directive.
pub fn init_tracing() {
    let use_json = std::env::var("LOG_FORMAT")
        .map(|v| v.to_lowercase() == "json")
        .unwrap_or(false);

    let mut env_filter = EnvFilter::from_default_env();
    if let Ok(directive) = "serenity=info".parse() {
        env_filter = env_filter.add_directive(directive);
    }

    if use_json {
        tracing_subscriber::registry()
            .with(fmt::layer().json())
            .with(env_filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_ansi(true)
                    .with_target(false)
                    .with_thread_ids(false),
            )
            .with(env_filter)
            .init();
    }
}

/// Logger for one import run.
///
/// Every event carries the run id and the target collection.
#[derive(Debug, Clone)]
pub struct ImportLogger {
    run_id: String,
    collection: String,
}

impl ImportLogger {
    pub fn new(collection: &str) -> Self {
        Self {
            run_id: Uuid::new_v4().to_string(),
            collection: collection.to_string(),
        }
    }

    pub fn log_start(&self, total: usize) {
        info!(
            run_id = %self.run_id,
            collection = %self.collection,
            total,
            "Importing {} educational resources...", total
        );
    }

    pub fn log_written(&self, index: usize, title: &str, doc_id: &str) {
        info!(
            run_id = %self.run_id,
            collection = %self.collection,
            index,
            doc_id = %doc_id,
            "Imported: {} (ID: {})", title, doc_id
        );
    }

    pub fn log_failed(&self, index: usize, title: &str, err: &str) {
        error!(
            run_id = %self.run_id,
            collection = %self.collection,
            index,
            "Error importing {}: {}", title, err
        );
    }

    pub fn log_completion(&self, summary: &ImportSummary) {
        info!(
            run_id = %self.run_id,
            collection = %self.collection,
            total = summary.total,
            succeeded = summary.succeeded,
            failed = summary.failed,
            elapsed_ms = summary.elapsed_ms(),
            "Import finished"
        );
    }

    pub fn run_id(&self) -> &str {
        &self.run_id
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// Span covering the whole run.
    pub fn create_span(&self) -> Span {
        tracing::info_span!(
            "import",
            run_id = %self.run_id,
            collection = %self.collection
        )
    }
}
