//! Import source loading.

use std::io::ErrorKind;
use std::path::Path;

use serenity_models::ResourceRecord;
use tracing::debug;

use crate::error::{ImportError, ImportResult};

/// Read the resource records from a JSON array file.
///
/// The whole file is validated before anything is returned: every element
/// must be a JSON object.
pub async fn load_records(path: &Path) -> ImportResult<Vec<ResourceRecord>> {
    let raw = tokio::fs::read_to_string(path).await.map_err(|e| match e.kind() {
        ErrorKind::NotFound => ImportError::SourceNotFound(path.to_path_buf()),
        _ => ImportError::source_format(path, e.to_string()),
    })?;

    let records = parse_records(path, &raw)?;
    debug!(path = %path.display(), count = records.len(), "Loaded import source");
    Ok(records)
}

fn parse_records(path: &Path, raw: &str) -> ImportResult<Vec<ResourceRecord>> {
    serde_json::from_str(raw).map_err(|e| ImportError::source_format(path, e.to_string()))
}
