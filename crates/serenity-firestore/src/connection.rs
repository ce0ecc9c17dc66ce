//! Process-wide Firestore connection ownership.
//!
//! [`ConnectionRegistry`] resolves credentials and builds the client at most
//! once; later calls hand back the same session.

use tracing::info;

use crate::client::{FirestoreClient, FirestoreConfig};
use crate::credentials::{CredentialCandidates, ServiceAccountKey};
use crate::error::FirestoreResult;

/// Owner of the single Firestore connection handle.
pub struct ConnectionRegistry {
    candidates: CredentialCandidates,
    emulator_host: Option<String>,
    handle: Option<FirestoreClient>,
    initializations: usize,
}

impl ConnectionRegistry {
    pub fn new(candidates: CredentialCandidates) -> Self {
        Self {
            candidates,
            emulator_host: None,
            handle: None,
            initializations: 0,
        }
    }

    /// Registry over the default candidate paths plus `GOOGLE_APPLICATION_CREDENTIALS`.
    pub fn from_env() -> Self {
        Self::new(CredentialCandidates::from_env())
    }

    /// Target a local emulator regardless of `FIRESTORE_EMULATOR_HOST`.
    pub fn with_emulator_host(mut self, host: impl Into<String>) -> Self {
        self.emulator_host = Some(host.into());
        self
    }

    pub fn candidates(&self) -> &CredentialCandidates {
        &self.candidates
    }

    pub fn is_initialized(&self) -> bool {
        self.handle.is_some()
    }

    /// Number of times a session was actually established.
    pub fn initializations(&self) -> usize {
        self.initializations
    }

    pub fn handle(&self) -> Option<&FirestoreClient> {
        self.handle.as_ref()
    }

    /// Resolve credentials and connect, or return the existing handle.
    pub fn resolve(&mut self) -> FirestoreResult<FirestoreClient> {
        if let Some(handle) = &self.handle {
            info!(
                project_id = %handle.project_id(),
                "Firestore already initialized, reusing existing connection"
            );
            return Ok(handle.clone());
        }

        let key = ServiceAccountKey::load(self.candidates.locate()?)?;

        let mut config = FirestoreConfig::from_env(Some(key.project_id()))?;
        if let Some(host) = &self.emulator_host {
            config.emulator_host = Some(host.clone());
        }

        let client = FirestoreClient::new(config, &key)?;
        self.initializations += 1;

        info!(
            path = %key.path().display(),
            service_account = %key.client_email(),
            project_id = %client.project_id(),
            emulator = client.is_emulator(),
            "Firestore initialized"
        );

        self.handle = Some(client.clone());
        Ok(client)
    }
}
