use std::future::Future;

use serde_json::Value;

use crate::error::StorageError;
use crate::update::Update;

/// Result of [`DocumentStore::update_one`].
#[derive(Debug, Clone, PartialEq)]
pub enum UpdateOutcome {
    /// The update was applied; carries the document as stored afterwards.
    Updated(Value),
    /// A condition did not hold; carries the unchanged stored document.
    FilterRejected(Value),
    /// No document under the key.
    Missing,
}

/// Keyed JSON document store.
///
/// Every method is a single attempt: I/O failures are returned to the caller,
/// never retried here. `update_one` is atomic per document: concurrent updates
/// to different paths of the same document both survive.
pub trait DocumentStore: Send + Sync {
    fn find_one(
        &self,
        key: &str,
    ) -> impl Future<Output = Result<Option<Value>, StorageError>> + Send;

    /// Fails with [`StorageError::AlreadyExists`] if the key is taken.
    fn insert_one(
        &self,
        key: &str,
        document: Value,
    ) -> impl Future<Output = Result<(), StorageError>> + Send;

    fn update_one(
        &self,
        key: &str,
        update: &Update,
    ) -> impl Future<Output = Result<UpdateOutcome, StorageError>> + Send;

    /// Returns whether a document was removed.
    fn delete_one(&self, key: &str) -> impl Future<Output = Result<bool, StorageError>> + Send;

    /// All documents whose key starts with `prefix`, ordered by key.
    fn list(
        &self,
        prefix: &str,
    ) -> impl Future<Output = Result<Vec<(String, Value)>, StorageError>> + Send;
}
