//! Document store kept in process memory.

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::{Mutex, watch};

use dialed_core::error::Result;
use dialed_core::user::{DocumentPatch, DocumentStore, UserDocument};

use crate::snapshot_hub::SnapshotHub;

/// Same merge and snapshot semantics as the file store, without persistence.
#[derive(Default)]
pub struct InMemoryDocumentStore {
    documents: Mutex<HashMap<String, UserDocument>>,
    hub: SnapshotHub,
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a document, replacing any existing one.
    pub async fn insert(&self, uid: &str, document: UserDocument) {
        self.documents
            .lock()
            .await
            .insert(uid.to_string(), document.clone());
        self.hub.publish(uid, &document).await;
    }
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn load(&self, uid: &str) -> Result<Option<UserDocument>> {
        Ok(self.documents.lock().await.get(uid).cloned())
    }

    async fn subscribe(&self, uid: &str) -> Result<watch::Receiver<Option<UserDocument>>> {
        let current = self.load(uid).await?;
        Ok(self.hub.subscribe(uid, current).await)
    }

    async fn merge(&self, uid: &str, patch: DocumentPatch) -> Result<UserDocument> {
        let document = {
            let mut documents = self.documents.lock().await;
            let document = documents.entry(uid.to_string()).or_default();
            patch.apply_to(document);
            document.clone()
        };
        self.hub.publish(uid, &document).await;
        Ok(document)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dialed_core::session::History;
    use dialed_core::user::UserRole;

    #[tokio::test]
    async fn test_merge_creates_document() {
        let store = InMemoryDocumentStore::new();
        assert!(store.load("u1").await.unwrap().is_none());

        store
            .merge("u1", DocumentPatch::role(UserRole::League))
            .await
            .unwrap();
        let document = store.load("u1").await.unwrap().unwrap();
        assert_eq!(document.role, Some(UserRole::League));
        assert!(document.history.is_empty());
    }

    #[tokio::test]
    async fn test_last_write_wins() {
        let store = InMemoryDocumentStore::new();
        store
            .merge("u1", DocumentPatch::role(UserRole::League))
            .await
            .unwrap();
        store
            .merge("u1", DocumentPatch::role(UserRole::Coach))
            .await
            .unwrap();
        let document = store
            .merge("u1", DocumentPatch::history(History::new()))
            .await
            .unwrap();
        assert_eq!(document.role, Some(UserRole::Coach));
    }

    #[tokio::test]
    async fn test_subscription_starts_with_current() {
        let store = InMemoryDocumentStore::new();
        store
            .insert(
                "u1",
                UserDocument {
                    version_view_count: 3,
                    ..UserDocument::default()
                },
            )
            .await;
        let rx = store.subscribe("u1").await.unwrap();
        assert_eq!(rx.borrow().as_ref().map(|d| d.version_view_count), Some(3));
    }
}
