//! Document store abstraction.
//!
//! The importer writes through [`DocumentStore`] so the same pipeline can
//! target Firestore or the in-memory store used for dry runs.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;

use crate::client::FirestoreClient;
use crate::error::FirestoreResult;
use crate::types::{auto_id, NewDocument, ToFirestoreValue, Value};

/// Something that can persist new documents.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Add `doc` to `collection` under a store-generated id and return the id.
    async fn add_document(&self, collection: &str, doc: NewDocument) -> FirestoreResult<String>;
}

#[async_trait]
impl DocumentStore for FirestoreClient {
    async fn add_document(&self, collection: &str, doc: NewDocument) -> FirestoreResult<String> {
        FirestoreClient::add_document(self, collection, doc).await
    }
}

/// A document held by [`MemoryStore`].
#[derive(Debug, Clone, PartialEq)]
pub struct StoredDocument {
    pub collection: String,
    pub id: String,
    /// Fields as written, with server timestamps resolved.
    pub fields: HashMap<String, Value>,
    /// Fields the writer asked the store to timestamp.
    pub server_timestamps: Vec<String>,
}

/// In-process document store.
///
/// Resolves server-timestamp fields to the time of the write, as Firestore
/// does.
#[derive(Debug, Default)]
pub struct MemoryStore {
    documents: Mutex<Vec<StoredDocument>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// All documents, in write order.
    pub async fn documents(&self) -> Vec<StoredDocument> {
        self.documents.lock().await.clone()
    }

    /// Documents of one collection, in write order.
    pub async fn collection(&self, name: &str) -> Vec<StoredDocument> {
        self.documents
            .lock()
            .await
            .iter()
            .filter(|d| d.collection == name)
            .cloned()
            .collect()
    }

    pub async fn get(&self, collection: &str, id: &str) -> Option<StoredDocument> {
        self.documents
            .lock()
            .await
            .iter()
            .find(|d| d.collection == collection && d.id == id)
            .cloned()
    }

    pub async fn len(&self) -> usize {
        self.documents.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.documents.lock().await.is_empty()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn add_document(&self, collection: &str, doc: NewDocument) -> FirestoreResult<String> {
        let id = auto_id();
        let now = Utc::now().to_firestore_value();

        let mut fields = doc.fields;
        for field in &doc.server_timestamps {
            fields.insert(field.clone(), now.clone());
        }

        self.documents.lock().await.push(StoredDocument {
            collection: collection.to_string(),
            id: id.clone(),
            fields,
            server_timestamps: doc.server_timestamps,
        });

        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_store_resolves_server_timestamps() {
        let store = MemoryStore::new();
        let mut fields = HashMap::new();
        fields.insert("title".to_string(), "Box Breathing".to_firestore_value());

        let doc = NewDocument::new(fields).with_server_timestamp("createdAt");
        let id = store.add_document("educational_resources", doc).await.unwrap();

        let stored = store.get("educational_resources", &id).await.unwrap();
        assert!(matches!(stored.fields.get("createdAt"), Some(Value::TimestampValue(_))));
        assert_eq!(stored.server_timestamps, vec!["createdAt".to_string()]);
    }

    #[tokio::test]
    async fn test_memory_store_keeps_write_order() {
        let store = MemoryStore::new();
        let a = store.add_document("c", NewDocument::default()).await.unwrap();
        let b = store.add_document("other", NewDocument::default()).await.unwrap();
        let c = store.add_document("c", NewDocument::default()).await.unwrap();

        let ids: Vec<_> = store.collection("c").await.into_iter().map(|d| d.id).collect();
        assert_eq!(ids, vec![a, c]);
        assert_eq!(store.len().await, 3);
        assert!(store.get("c", &b).await.is_none());
    }
}
