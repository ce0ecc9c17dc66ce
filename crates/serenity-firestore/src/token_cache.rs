//! Access tokens for Firestore requests.
//!
//! A service-account token is fetched on first use and reused until it is
//! within [`TOKEN_REFRESH_MARGIN`] of expiring. The emulator gets a fixed
//! token and never signs anything.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use gcp_auth::TokenProvider;
use tokio::sync::Mutex;
use tracing::debug;

use crate::error::{FirestoreError, FirestoreResult};

/// Tokens this close to expiry are fetched again.
const TOKEN_REFRESH_MARGIN: Duration = Duration::from_secs(60);

/// OAuth scope for Firestore/Datastore access.
pub const FIRESTORE_SCOPE: &str = "https://www.googleapis.com/auth/datastore";

/// Bearer token the Firestore emulator accepts as an admin.
pub const EMULATOR_TOKEN: &str = "owner";

struct CachedToken {
    access_token: String,
    expires_at: DateTime<Utc>,
}

impl CachedToken {
    fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        match chrono::Duration::from_std(TOKEN_REFRESH_MARGIN) {
            Ok(margin) => now + margin < self.expires_at,
            Err(_) => false,
        }
    }
}

enum TokenSource {
    ServiceAccount {
        provider: Arc<dyn TokenProvider>,
        cached: Mutex<Option<CachedToken>>,
    },
    Emulator,
}

/// Token source shared by every clone of one client.
pub struct TokenCache {
    source: TokenSource,
}

impl TokenCache {
    /// Token cache backed by a service-account provider.
    pub fn new(provider: Arc<dyn TokenProvider>) -> Self {
        Self {
            source: TokenSource::ServiceAccount {
                provider,
                cached: Mutex::new(None),
            },
        }
    }

    /// Token cache for the local emulator.
    pub fn emulator() -> Self {
        Self {
            source: TokenSource::Emulator,
        }
    }

    pub fn is_emulator(&self) -> bool {
        matches!(self.source, TokenSource::Emulator)
    }

    /// Bearer token for the next request.
    ///
    /// Concurrent callers wait on one fetch instead of each signing a JWT.
    pub async fn get_token(&self) -> FirestoreResult<String> {
        let (provider, cached) = match &self.source {
            TokenSource::Emulator => return Ok(EMULATOR_TOKEN.to_string()),
            TokenSource::ServiceAccount { provider, cached } => (provider, cached),
        };

        let mut cached = cached.lock().await;
        if let Some(token) = cached.as_ref().filter(|t| t.is_fresh(Utc::now())) {
            return Ok(token.access_token.clone());
        }

        let token = provider
            .token(&[FIRESTORE_SCOPE])
            .await
            .map_err(|e| FirestoreError::auth_error(format!("Failed to obtain auth token: {}", e)))?;

        let access_token = token.as_str().to_string();
        *cached = Some(CachedToken {
            access_token: access_token.clone(),
            expires_at: token.expires_at(),
        });

        debug!("Fetched Firestore auth token");
        Ok(access_token)
    }
}
