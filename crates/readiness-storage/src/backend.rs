use serde_json::Value;

use crate::error::StorageError;
use crate::memory::MemoryStore;
use crate::s3::S3Store;
use crate::store::{DocumentStore, UpdateOutcome};
use crate::update::Update;

/// Store selected at startup from configuration.
#[derive(Debug, Clone)]
pub enum Backend {
    Memory(MemoryStore),
    S3(S3Store),
}

impl DocumentStore for Backend {
    async fn find_one(&self, key: &str) -> Result<Option<Value>, StorageError> {
        match self {
            Backend::Memory(s) => s.find_one(key).await,
            Backend::S3(s) => s.find_one(key).await,
        }
    }

    async fn insert_one(&self, key: &str, document: Value) -> Result<(), StorageError> {
        match self {
            Backend::Memory(s) => s.insert_one(key, document).await,
            Backend::S3(s) => s.insert_one(key, document).await,
        }
    }

    async fn update_one(&self, key: &str, update: &Update) -> Result<UpdateOutcome, StorageError> {
        match self {
            Backend::Memory(s) => s.update_one(key, update).await,
            Backend::S3(s) => s.update_one(key, update).await,
        }
    }

    async fn delete_one(&self, key: &str) -> Result<bool, StorageError> {
        match self {
            Backend::Memory(s) => s.delete_one(key).await,
            Backend::S3(s) => s.delete_one(key).await,
        }
    }

    async fn list(&self, prefix: &str) -> Result<Vec<(String, Value)>, StorageError> {
        match self {
            Backend::Memory(s) => s.list(prefix).await,
            Backend::S3(s) => s.list(prefix).await,
        }
    }
}
