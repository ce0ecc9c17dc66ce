//! Firestore REST API client.
//!
//! Client with:
//! - Token caching with refresh margin
//! - Single-attempt writes (no retry or re-authentication)
//! - HTTP client tuning (pooling, timeouts)
//! - Document creation with server-side timestamp transforms
//! - Observability (tracing spans, metrics)

use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

use gcp_auth::CustomServiceAccount;
use reqwest::{Client, Response, StatusCode};
use tracing::{debug, info_span, Instrument};

use crate::credentials::ServiceAccountKey;
use crate::error::{FirestoreError, FirestoreResult};
use crate::metrics::record_request;
use crate::token_cache::TokenCache;
use crate::types::{
    auto_id, CommitRequest, CommitResponse, Document, FieldTransform, NewDocument, Precondition,
    Write,
};

/// Production Firestore endpoint.
const FIRESTORE_ENDPOINT: &str = "https://firestore.googleapis.com";

/// Database used when none is configured.
pub const DEFAULT_DATABASE_ID: &str = "(default)";

// =============================================================================
// Configuration
// =============================================================================

/// Firestore client configuration.
#[derive(Debug, Clone)]
pub struct FirestoreConfig {
    /// GCP project ID
    pub project_id: String,
    /// Database ID (usually "(default)")
    pub database_id: String,
    /// Request timeout
    pub timeout: Duration,
    /// Connect timeout
    pub connect_timeout: Duration,
    /// `host:port` of a local Firestore emulator
    pub emulator_host: Option<String>,
}

impl FirestoreConfig {
    /// Config for a project with default settings.
    pub fn new(project_id: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            database_id: DEFAULT_DATABASE_ID.to_string(),
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(5),
            emulator_host: None,
        }
    }

    /// Create config from environment variables.
    ///
    /// `GCP_PROJECT_ID` / `FIREBASE_PROJECT_ID` override `default_project_id`
    /// (normally the project named in the service account key).
    pub fn from_env(default_project_id: Option<&str>) -> FirestoreResult<Self> {
        let project_id = non_empty_env("GCP_PROJECT_ID")
            .or_else(|| non_empty_env("FIREBASE_PROJECT_ID"))
            .or_else(|| default_project_id.map(str::to_string))
            .filter(|p| !p.trim().is_empty())
            .ok_or_else(|| {
                FirestoreError::initialization(
                    "no Firestore project id: set GCP_PROJECT_ID or FIREBASE_PROJECT_ID",
                )
            })?;

        let connect_timeout_secs: u64 = std::env::var("FIRESTORE_CONNECT_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(5);

        Ok(Self {
            project_id,
            database_id: non_empty_env("FIRESTORE_DATABASE_ID")
                .unwrap_or_else(|| DEFAULT_DATABASE_ID.to_string()),
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(connect_timeout_secs),
            emulator_host: non_empty_env("FIRESTORE_EMULATOR_HOST"),
        })
    }

    /// Root URL of the documents resource.
    pub fn base_url(&self) -> String {
        let endpoint = match &self.emulator_host {
            Some(host) => format!("http://{}", host),
            None => FIRESTORE_ENDPOINT.to_string(),
        };
        format!(
            "{}/v1/projects/{}/databases/{}/documents",
            endpoint, self.project_id, self.database_id
        )
    }
}

fn non_empty_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

// =============================================================================
// Client
// =============================================================================

/// Firestore REST API client.
///
/// Clones share one HTTP pool and one token cache, i.e. one authenticated
/// session.
pub struct FirestoreClient {
    http: Client,
    config: FirestoreConfig,
    base_url: String,
    token_cache: Arc<TokenCache>,
}

impl Clone for FirestoreClient {
    fn clone(&self) -> Self {
        Self {
            http: self.http.clone(),
            config: self.config.clone(),
            base_url: self.base_url.clone(),
            token_cache: Arc::clone(&self.token_cache),
        }
    }
}

impl fmt::Debug for FirestoreClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FirestoreClient")
            .field("config", &self.config)
            .field("emulator", &self.is_emulator())
            .finish_non_exhaustive()
    }
}

impl FirestoreClient {
    /// Create a client authenticated with a service account key.
    ///
    /// Against the emulator the key is not used for signing.
    pub fn new(config: FirestoreConfig, key: &ServiceAccountKey) -> FirestoreResult<Self> {
        let token_cache = if config.emulator_host.is_some() {
            TokenCache::emulator()
        } else {
            let service_account = CustomServiceAccount::from_json(key.raw_json()).map_err(|e| {
                FirestoreError::initialization(format!(
                    "invalid service account key {}: {}",
                    key.path().display(),
                    e
                ))
            })?;
            TokenCache::new(Arc::new(service_account))
        };

        Self::with_token_cache(config, token_cache)
    }

    /// Create a client with an explicit token cache.
    pub fn with_token_cache(config: FirestoreConfig, token_cache: TokenCache) -> FirestoreResult<Self> {
        let http = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .pool_idle_timeout(Duration::from_secs(90))
            .pool_max_idle_per_host(10)
            .user_agent(concat!("serenity-firestore/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| FirestoreError::initialization(format!("HTTP client: {}", e)))?;

        let base_url = config.base_url();

        Ok(Self {
            http,
            config,
            base_url,
            token_cache: Arc::new(token_cache),
        })
    }

    pub fn config(&self) -> &FirestoreConfig {
        &self.config
    }

    pub fn project_id(&self) -> &str {
        &self.config.project_id
    }

    pub fn is_emulator(&self) -> bool {
        self.token_cache.is_emulator()
    }

    /// True if both handles share the same authenticated session.
    pub fn same_session(&self, other: &FirestoreClient) -> bool {
        Arc::ptr_eq(&self.token_cache, &other.token_cache)
    }

    async fn get_token(&self) -> FirestoreResult<String> {
        self.token_cache.get_token().await
    }

    fn document_path(&self, collection: &str, doc_id: &str) -> String {
        format!("{}/{}/{}", self.base_url, collection, urlencoding::encode(doc_id))
    }

    /// Full resource name, as used inside write requests.
    pub fn full_document_name(&self, collection: &str, doc_id: &str) -> String {
        format!(
            "projects/{}/databases/{}/documents/{}/{}",
            self.config.project_id, self.config.database_id, collection, doc_id
        )
    }

    // =========================================================================
    // Document Operations
    // =========================================================================

    /// Get a document.
    pub async fn get_document(
        &self,
        collection: &str,
        doc_id: &str,
    ) -> FirestoreResult<Option<Document>> {
        let url = self.document_path(collection, doc_id);

        self.execute_request("get_document", collection, Some(doc_id), async {
            let token = self.get_token().await?;
            let response = self.http.get(&url).bearer_auth(&token).send().await?;
            let status = response.status();

            match status {
                StatusCode::OK => {
                    let doc: Document = response.json().await?;
                    Ok(Some(doc))
                }
                StatusCode::NOT_FOUND => Ok(None),
                _ => Err(Self::handle_error_response(status, &url, response).await),
            }
        })
        .await
    }

    /// Add a document under a newly generated id and return that id.
    ///
    /// The commit is sent once; a rejected token surfaces as `AuthError`.
    /// Fields listed in `server_timestamps` are set to the commit time by the
    /// server. The write is guarded by an `exists: false` precondition so an
    /// id collision fails instead of overwriting.
    pub async fn add_document(&self, collection: &str, doc: NewDocument) -> FirestoreResult<String> {
        let doc_id = auto_id();
        let url = format!("{}:commit", self.base_url);

        let transforms: Vec<FieldTransform> = doc
            .server_timestamps
            .iter()
            .map(|field| FieldTransform::request_time(field))
            .collect();

        let request = CommitRequest {
            writes: vec![Write {
                update: Some(Document {
                    name: Some(self.full_document_name(collection, &doc_id)),
                    ..Document::new(doc.fields)
                }),
                update_transforms: (!transforms.is_empty()).then_some(transforms),
                current_document: Some(Precondition {
                    exists: Some(false),
                }),
            }],
        };

        self.execute_request("add_document", collection, Some(&doc_id), async {
            let token = self.get_token().await?;
            let response = self
                .http
                .post(&url)
                .bearer_auth(&token)
                .json(&request)
                .send()
                .await?;
            let status = response.status();

            match status {
                StatusCode::OK => {
                    let commit: CommitResponse = response.json().await?;
                    let written = commit
                        .write_results
                        .as_ref()
                        .map(|r| !r.is_empty())
                        .unwrap_or(false);
                    if !written {
                        return Err(FirestoreError::invalid_response(
                            "commit returned no write results",
                        ));
                    }
                    Ok(())
                }
                StatusCode::CONFLICT => Err(FirestoreError::AlreadyExists(format!(
                    "{}/{}",
                    collection, doc_id
                ))),
                _ => Err(Self::handle_error_response(status, &url, response).await),
            }
        })
        .await?;

        debug!("Added document {}/{}", collection, doc_id);
        Ok(doc_id)
    }

    // =========================================================================
    // Internal Helpers
    // =========================================================================

    /// Execute a request with tracing and metrics.
    async fn execute_request<T, F>(
        &self,
        operation: &'static str,
        collection: &str,
        doc_id: Option<&str>,
        fut: F,
    ) -> FirestoreResult<T>
    where
        F: std::future::Future<Output = FirestoreResult<T>>,
    {
        let span = if let Some(id) = doc_id {
            info_span!("firestore_request", operation = %operation, collection = %collection, doc_id = %id)
        } else {
            info_span!("firestore_request", operation = %operation, collection = %collection)
        };

        let start = Instant::now();
        let result = fut.instrument(span).await;
        let elapsed = start.elapsed();

        let status = match &result {
            Ok(_) => 200,
            Err(e) => e.http_status().unwrap_or(500),
        };
        record_request(operation, collection, status, elapsed);

        result
    }

    async fn handle_error_response(status: StatusCode, url: &str, response: Response) -> FirestoreError {
        let body = response.text().await.unwrap_or_default();
        FirestoreError::from_http_status(status.as_u16(), format!("{} failed: {}", url, body))
    }
}
