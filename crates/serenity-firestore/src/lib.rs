//! Firestore REST API client.
//!
//! This crate provides:
//! - Service account discovery over an ordered list of key files
//! - A connection registry that initializes the client at most once
//! - Document creation with server-side timestamp transforms
//! - The `DocumentStore` seam plus an in-memory store

pub mod client;
pub mod connection;
pub mod credentials;
pub mod error;
pub mod metrics;
pub mod store;
pub mod token_cache;
pub mod types;


pub use client::{FirestoreClient, FirestoreConfig};
pub use connection::ConnectionRegistry;
pub use credentials::{CredentialCandidates, ServiceAccountKey};
pub use error::{FirestoreError, FirestoreResult};
pub use store::{DocumentStore, MemoryStore, StoredDocument};
pub use types::{Document, FromFirestoreValue, NewDocument, ToFirestoreValue, Value};
