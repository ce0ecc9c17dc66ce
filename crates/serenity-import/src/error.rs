//! Import error types.

use std::path::PathBuf;

use serenity_firestore::FirestoreError;
use thiserror::Error;

pub type ImportResult<T> = Result<T, ImportError>;

/// Errors that abort an import run before any record is written.
///
/// Failures of individual writes are not errors of the run; they are
/// recorded as [`serenity_models::RecordOutcome::Failed`].
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("Source file not found: {}", .0.display())]
    SourceNotFound(PathBuf),

    #[error("Malformed source file {}: {reason}", path.display())]
    SourceFormat { path: PathBuf, reason: String },

    #[error(transparent)]
    Firestore(#[from] FirestoreError),
}

impl ImportError {
    pub fn source_format(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::SourceFormat {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// True when no service account key could be found.
    pub fn is_missing_credential(&self) -> bool {
        matches!(self, ImportError::Firestore(FirestoreError::MissingCredential(_)))
    }
}
