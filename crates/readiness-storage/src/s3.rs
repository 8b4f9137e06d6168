use aws_sdk_s3::Client;
use serde_json::Value;

use crate::error::StorageError;
use crate::objects;
use crate::store::{DocumentStore, UpdateOutcome};
use crate::update::Update;

#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub bucket: String,
    /// How many times an update is re-applied after losing an ETag race.
    pub max_conflict_retries: u32,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            bucket: "readiness".to_string(),
            max_conflict_retries: 3,
        }
    }
}

/// Documents stored as JSON objects in one S3 bucket.
///
/// `update_one` reads the object with its ETag, applies the path update and
/// writes back with `If-Match`. Losing the race re-reads and re-applies the
/// same update, so a concurrent write to another path is never overwritten.
#[derive(Debug, Clone)]
pub struct S3Store {
    client: Client,
    config: StoreConfig,
}

impl S3Store {
    pub fn new(client: Client, config: StoreConfig) -> Self {
        Self { client, config }
    }

    pub fn bucket(&self) -> &str {
        &self.config.bucket
    }

    async fn load(&self, key: &str) -> Result<Option<(Value, String)>, StorageError> {
        match objects::get_object(&self.client, &self.config.bucket, key).await {
            Ok(output) => {
                let value: Value = serde_json::from_slice(&output.body)?;
                let etag = output.etag.ok_or_else(|| {
                    StorageError::GetObject(format!("no ETag returned for {key}"))
                })?;
                Ok(Some((value, etag)))
            }
            Err(StorageError::NotFound { .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }
}

impl DocumentStore for S3Store {
    async fn find_one(&self, key: &str) -> Result<Option<Value>, StorageError> {
        Ok(self.load(key).await?.map(|(value, _)| value))
    }

    async fn insert_one(&self, key: &str, document: Value) -> Result<(), StorageError> {
        let body = serde_json::to_vec_pretty(&document)?;
        objects::put_object_if_absent(&self.client, &self.config.bucket, key, body).await?;
        tracing::debug!(bucket = %self.config.bucket, key, "document inserted");
        Ok(())
    }

    async fn update_one(&self, key: &str, update: &Update) -> Result<UpdateOutcome, StorageError> {
        for attempt in 0..=self.config.max_conflict_retries {
            let Some((current, etag)) = self.load(key).await? else {
                return Ok(UpdateOutcome::Missing);
            };
            if !update.matches(&current) {
                return Ok(UpdateOutcome::FilterRejected(current));
            }

            let next = update.apply(&current)?;
            let body = serde_json::to_vec_pretty(&next)?;
            match objects::put_object_if_match(&self.client, &self.config.bucket, key, body, &etag)
                .await
            {
                Ok(_) => {
                    tracing::debug!(bucket = %self.config.bucket, key, attempt, "document updated");
                    return Ok(UpdateOutcome::Updated(next));
                }
                Err(StorageError::PreconditionFailed { .. }) => {
                    tracing::warn!(key, attempt, "ETag conflict, re-applying update");
                }
                Err(e) => return Err(e),
            }
        }

        Err(StorageError::PreconditionFailed {
            key: key.to_string(),
        })
    }

    async fn delete_one(&self, key: &str) -> Result<bool, StorageError> {
        if self.load(key).await?.is_none() {
            return Ok(false);
        }
        objects::delete_object(&self.client, &self.config.bucket, key).await?;
        tracing::debug!(bucket = %self.config.bucket, key, "document deleted");
        Ok(true)
    }

    async fn list(&self, prefix: &str) -> Result<Vec<(String, Value)>, StorageError> {
        let mut keys = objects::list_objects(&self.client, &self.config.bucket, prefix).await?;
        keys.sort();

        let mut documents = Vec::with_capacity(keys.len());
        for key in keys {
            // Deleted between list and get.
            if let Some((value, _)) = self.load(&key).await? {
                documents.push((key, value));
            }
        }
        Ok(documents)
    }
}
