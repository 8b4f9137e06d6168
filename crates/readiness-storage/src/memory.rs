use std::collections::BTreeMap;
use std::sync::Arc;

use serde_json::Value;
use tokio::sync::Mutex;

use crate::error::StorageError;
use crate::store::{DocumentStore, UpdateOutcome};
use crate::update::Update;

/// Process-local store. Each operation holds one lock for its whole
/// duration, which makes `update_one` atomic per document.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    documents: Arc<Mutex<BTreeMap<String, Value>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.documents.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.documents.lock().await.is_empty()
    }
}

impl DocumentStore for MemoryStore {
    async fn find_one(&self, key: &str) -> Result<Option<Value>, StorageError> {
        Ok(self.documents.lock().await.get(key).cloned())
    }

    async fn insert_one(&self, key: &str, document: Value) -> Result<(), StorageError> {
        let mut documents = self.documents.lock().await;
        if documents.contains_key(key) {
            return Err(StorageError::AlreadyExists {
                key: key.to_string(),
            });
        }
        documents.insert(key.to_string(), document);
        tracing::debug!(key, "document inserted");
        Ok(())
    }

    async fn update_one(&self, key: &str, update: &Update) -> Result<UpdateOutcome, StorageError> {
        let mut documents = self.documents.lock().await;
        let Some(current) = documents.get(key) else {
            return Ok(UpdateOutcome::Missing);
        };
        if !update.matches(current) {
            return Ok(UpdateOutcome::FilterRejected(current.clone()));
        }
        let next = update.apply(current)?;
        documents.insert(key.to_string(), next.clone());
        tracing::debug!(key, fields = update.sets().len(), "document updated");
        Ok(UpdateOutcome::Updated(next))
    }

    async fn delete_one(&self, key: &str) -> Result<bool, StorageError> {
        let removed = self.documents.lock().await.remove(key).is_some();
        tracing::debug!(key, removed, "document delete");
        Ok(removed)
    }

    async fn list(&self, prefix: &str) -> Result<Vec<(String, Value)>, StorageError> {
        Ok(self
            .documents
            .lock()
            .await
            .range(prefix.to_string()..)
            .take_while(|(k, _)| k.starts_with(prefix))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect())
    }
}
