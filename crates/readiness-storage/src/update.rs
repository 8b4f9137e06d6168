use std::fmt;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::StorageError;

/// Path to a field inside a JSON document, one segment per object level.
///
/// Segments are kept separate rather than dot-joined so ids containing dots
/// address a single key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldPath(Vec<String>);

impl FieldPath {
    pub fn new<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(segments.into_iter().map(Into::into).collect())
    }

    /// A top-level field.
    pub fn field(name: impl Into<String>) -> Self {
        Self(vec![name.into()])
    }

    pub fn child(&self, segment: impl Into<String>) -> Self {
        let mut segments = self.0.clone();
        segments.push(segment.into());
        Self(segments)
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    /// Read the value at this path, if every level exists.
    pub fn get<'a>(&self, document: &'a Value) -> Option<&'a Value> {
        self.0
            .iter()
            .try_fold(document, |current, segment| current.as_object()?.get(segment))
    }

    /// Write `value` at this path, creating missing intermediate objects.
    fn set(&self, document: &mut Value, value: Value) -> Result<(), StorageError> {
        let Some((last, parents)) = self.0.split_last() else {
            return Err(self.invalid("empty path"));
        };

        let mut current = document;
        for segment in parents {
            let object = as_object_mut(current)
                .ok_or_else(|| self.invalid("parent is not an object"))?;
            current = object
                .entry(segment.clone())
                .or_insert_with(|| Value::Object(Map::new()));
        }

        let object = as_object_mut(current).ok_or_else(|| self.invalid("parent is not an object"))?;
        object.insert(last.clone(), value);
        Ok(())
    }

    fn invalid(&self, reason: &str) -> StorageError {
        StorageError::InvalidPath {
            path: self.to_string(),
            reason: reason.to_string(),
        }
    }
}

/// Null intermediates are replaced by empty objects.
fn as_object_mut(value: &mut Value) -> Option<&mut Map<String, Value>> {
    if value.is_null() {
        *value = Value::Object(Map::new());
    }
    value.as_object_mut()
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join("."))
    }
}

/// Filter clause evaluated against the stored document before an update.
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    /// Field exists and equals the value.
    Equals(FieldPath, Value),
    /// Field is missing or differs from the value.
    NotEquals(FieldPath, Value),
}

impl Condition {
    pub fn matches(&self, document: &Value) -> bool {
        match self {
            Condition::Equals(path, expected) => path.get(document) == Some(expected),
            Condition::NotEquals(path, expected) => path.get(document) != Some(expected),
        }
    }
}

/// A conditional, path-addressed partial update of one document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Update {
    conditions: Vec<Condition>,
    sets: Vec<(FieldPath, Value)>,
}

impl Update {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(mut self, path: FieldPath, value: Value) -> Self {
        self.sets.push((path, value));
        self
    }

    /// Serialize `value` and set it at `path`.
    pub fn set_serialized<T: Serialize>(
        self,
        path: FieldPath,
        value: &T,
    ) -> Result<Self, StorageError> {
        let value = serde_json::to_value(value)?;
        Ok(self.set(path, value))
    }

    pub fn when(mut self, condition: Condition) -> Self {
        self.conditions.push(condition);
        self
    }

    pub fn sets(&self) -> &[(FieldPath, Value)] {
        &self.sets
    }

    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    /// True when every condition holds for `document`.
    pub fn matches(&self, document: &Value) -> bool {
        self.conditions.iter().all(|c| c.matches(document))
    }

    /// Apply every set to a copy of `document` and return it. The input is
    /// left untouched when any path is invalid.
    pub fn apply(&self, document: &Value) -> Result<Value, StorageError> {
        let mut next = document.clone();
        for (path, value) in &self.sets {
            path.set(&mut next, value.clone())?;
        }
        Ok(next)
    }
}
