//! Import configuration.

use std::path::PathBuf;

/// Default source file, relative to the working directory.
pub const DEFAULT_SOURCE_FILE: &str = "sample_educational_resources.json";

/// Default target collection.
pub const DEFAULT_COLLECTION: &str = "educational_resources";

/// Default creation-timestamp field.
pub const DEFAULT_TIMESTAMP_FIELD: &str = "createdAt";

/// Import run configuration.
#[derive(Debug, Clone)]
pub struct ImportConfig {
    /// JSON array of resource records
    pub source_file: PathBuf,
    /// Collection receiving one new document per record
    pub collection: String,
    /// Field set to the server write time when a record lacks it
    pub timestamp_field: String,
    /// Field used as the record title in logs
    pub title_field: String,
    /// Maximum writes in flight; 1 writes strictly one after another
    pub concurrency: usize,
    /// Write to an in-memory store instead of Firestore
    pub dry_run: bool,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            source_file: PathBuf::from(DEFAULT_SOURCE_FILE),
            collection: DEFAULT_COLLECTION.to_string(),
            timestamp_field: DEFAULT_TIMESTAMP_FIELD.to_string(),
            title_field: serenity_models::DEFAULT_TITLE_FIELD.to_string(),
            concurrency: 1,
            dry_run: false,
        }
    }
}

impl ImportConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            source_file: std::env::var("IMPORT_SOURCE_FILE")
                .map(PathBuf::from)
                .unwrap_or(defaults.source_file),
            collection: std::env::var("IMPORT_COLLECTION").unwrap_or(defaults.collection),
            timestamp_field: std::env::var("IMPORT_TIMESTAMP_FIELD")
                .unwrap_or(defaults.timestamp_field),
            title_field: std::env::var("IMPORT_TITLE_FIELD").unwrap_or(defaults.title_field),
            concurrency: std::env::var("IMPORT_CONCURRENCY")
                .ok()
                .and_then(|s| s.parse::<usize>().ok())
                .unwrap_or(defaults.concurrency)
                .max(1),
            dry_run: std::env::var("IMPORT_DRY_RUN")
                .map(|v| matches!(v.to_lowercase().as_str(), "1" | "true" | "yes"))
                .unwrap_or(false),
        }
    }
}
