//! Service account credential discovery.
//!
//! Candidate key files are checked in a fixed priority order and the first
//! existing file wins. Partial credentials are never merged across files.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::error::{FirestoreError, FirestoreResult};

/// Conventional file name of a Firebase service account key.
pub const SERVICE_ACCOUNT_FILE: &str = "serviceAccountKey.json";

/// Environment variable naming an explicit key file.
pub const CREDENTIALS_ENV: &str = "GOOGLE_APPLICATION_CREDENTIALS";

/// Ordered list of places a key file may live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialCandidates {
    paths: Vec<PathBuf>,
}

impl CredentialCandidates {
    pub fn new<I, P>(paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            paths: paths.into_iter().map(Into::into).collect(),
        }
    }

    /// The fixed relative locations, relative to the working directory.
    pub fn defaults() -> Self {
        Self::new([
            PathBuf::from(SERVICE_ACCOUNT_FILE),
            Path::new("..").join(SERVICE_ACCOUNT_FILE),
            Path::new("firebase_setup").join(SERVICE_ACCOUNT_FILE),
        ])
    }

    /// Defaults, preceded by `GOOGLE_APPLICATION_CREDENTIALS` when set.
    pub fn from_env() -> Self {
        let mut candidates = Self::defaults();
        if let Ok(explicit) = std::env::var(CREDENTIALS_ENV) {
            if !explicit.trim().is_empty() {
                candidates.paths.insert(0, PathBuf::from(explicit));
            }
        }
        candidates
    }

    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    /// First candidate that exists as a file.
    pub fn locate(&self) -> FirestoreResult<&Path> {
        for path in &self.paths {
            if path.is_file() {
                debug!(path = %path.display(), "Found service account key");
                return Ok(path);
            }
            debug!(path = %path.display(), "No service account key at candidate path");
        }
        Err(FirestoreError::MissingCredential(self.paths.clone()))
    }
}

#[derive(Deserialize)]
struct KeyFile {
    #[serde(rename = "type")]
    key_type: Option<String>,
    project_id: Option<String>,
    client_email: Option<String>,
    private_key: Option<String>,
}

/// A parsed service account key.
///
/// The raw document is kept so the signer can be built from it; it never
/// appears in `Debug` output.
#[derive(Clone)]
pub struct ServiceAccountKey {
    path: PathBuf,
    project_id: String,
    client_email: String,
    raw: String,
}

impl ServiceAccountKey {
    /// Read and validate a key file.
    pub fn load(path: &Path) -> FirestoreResult<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            FirestoreError::initialization(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::parse(path, raw)
    }

    /// Validate key content already in memory.
    pub fn parse(path: impl Into<PathBuf>, raw: String) -> FirestoreResult<Self> {
        let path = path.into();
        let key: KeyFile = serde_json::from_str(&raw).map_err(|e| {
            FirestoreError::initialization(format!("{} is not valid JSON: {}", path.display(), e))
        })?;

        match key.key_type.as_deref() {
            Some("service_account") => {}
            other => {
                return Err(FirestoreError::initialization(format!(
                    "{} is not a service account key (type: {})",
                    path.display(),
                    other.unwrap_or("missing")
                )))
            }
        }

        let require = |value: Option<String>, field: &str| {
            value.filter(|v| !v.trim().is_empty()).ok_or_else(|| {
                FirestoreError::initialization(format!("{} has no {}", path.display(), field))
            })
        };

        let project_id = require(key.project_id, "project_id")?;
        let client_email = require(key.client_email, "client_email")?;
        require(key.private_key, "private_key")?;

        Ok(Self {
            path,
            project_id,
            client_email,
            raw,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    pub fn client_email(&self) -> &str {
        &self.client_email
    }

    pub fn raw_json(&self) -> &str {
        &self.raw
    }
}

impl fmt::Debug for ServiceAccountKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceAccountKey")
            .field("path", &self.path)
            .field("project_id", &self.project_id)
            .field("client_email", &self.client_email)
            .finish_non_exhaustive()
    }
}
