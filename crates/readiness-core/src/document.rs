use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::CoreError;

/// A model that is persisted as one JSON document under one key.
pub trait Document: Serialize + DeserializeOwned {
    /// Store key for this document.
    fn key(&self) -> String;

    fn to_document(&self) -> Result<serde_json::Value, CoreError> {
        let value = serde_json::to_value(self)?;
        if !value.is_object() {
            return Err(CoreError::NotAnObject(self.key()));
        }
        Ok(value)
    }

    fn from_document(value: serde_json::Value) -> Result<Self, CoreError> {
        Ok(serde_json::from_value(value)?)
    }
}
