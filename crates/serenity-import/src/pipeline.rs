//! End-to-end import run.

use serenity_firestore::{ConnectionRegistry, MemoryStore};
use serenity_models::ImportSummary;
use tracing::{info, warn};

use crate::config::ImportConfig;
use crate::error::ImportResult;
use crate::importer::Importer;

/// Connect, then import the configured source file.
///
/// The connection is resolved before the source file is touched; either
/// failing aborts the run before any write.
pub async fn run(config: &ImportConfig, registry: &mut ConnectionRegistry) -> ImportResult<ImportSummary> {
    let client = registry.resolve()?;
    info!(
        source = %config.source_file.display(),
        collection = %config.collection,
        "Connected to Firestore project {}", client.project_id()
    );

    if config.dry_run {
        warn!("Dry run: records are written to an in-memory store, not Firestore");
        let store = MemoryStore::new();
        return Importer::new(&store, config)
            .import_file(&config.source_file)
            .await;
    }

    Importer::new(&client, config)
        .import_file(&config.source_file)
        .await
}
