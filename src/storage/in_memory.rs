//! In-memory entity store.
//!
//! Thread-safe implementation of [`EntityStore`] over nested `HashMap`s
//! behind a tokio `RwLock`. Clones share the same data, so a console and the
//! tests inspecting it can hold the store at once.
//!
//! # Performance Characteristics
//!
//! * PUT/GET/DELETE/EXISTS: O(1) average case
//! * LIST and FIND_BY_FIELD: O(n log n) in the collection size (results are sorted)

use crate::storage::{EntityKey, EntityStore, StorageError};
use log::trace;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Thread-safe in-memory store: `collection` → `id` → `document`.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    data: Arc<RwLock<HashMap<String, HashMap<String, Value>>>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Extract a nested field from a document using dot notation.
    fn extract_field_value(data: &Value, path: &str) -> Option<String> {
        let mut current = data;

        for part in path.split('.') {
            current = match part.parse::<usize>() {
                Ok(index) => current.get(index)?,
                Err(_) => current.get(part)?,
            };
        }

        match current {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    fn sorted_entries<'a>(
        collection: &str,
        docs: impl Iterator<Item = (&'a String, &'a Value)>,
    ) -> Vec<(EntityKey, Value)> {
        let mut results: Vec<(EntityKey, Value)> = docs
            .map(|(id, doc)| (EntityKey::new(collection, id.as_str()), doc.clone()))
            .collect();
        results.sort_by(|a, b| a.0.id().cmp(b.0.id()));
        results
    }
}

impl EntityStore for InMemoryStore {
    async fn put(&self, key: EntityKey, data: Value) -> Result<Value, StorageError> {
        if key.id().is_empty() {
            return Err(StorageError::invalid_data(format!(
                "empty id in collection '{}'",
                key.collection()
            )));
        }

        trace!("Storing {}", key);
        let mut data_guard = self.data.write().await;
        data_guard
            .entry(key.collection().to_string())
            .or_default()
            .insert(key.id().to_string(), data.clone());
        Ok(data)
    }

    async fn get(&self, key: &EntityKey) -> Result<Option<Value>, StorageError> {
        let data_guard = self.data.read().await;
        Ok(data_guard
            .get(key.collection())
            .and_then(|docs| docs.get(key.id()))
            .cloned())
    }

    async fn delete(&self, key: &EntityKey) -> Result<bool, StorageError> {
        trace!("Deleting {}", key);
        let mut data_guard = self.data.write().await;
        Ok(data_guard
            .get_mut(key.collection())
            .is_some_and(|docs| docs.remove(key.id()).is_some()))
    }

    async fn list(&self, collection: &str) -> Result<Vec<(EntityKey, Value)>, StorageError> {
        let data_guard = self.data.read().await;
        Ok(data_guard
            .get(collection)
            .map(|docs| Self::sorted_entries(collection, docs.iter()))
            .unwrap_or_default())
    }

    async fn find_by_field(
        &self,
        collection: &str,
        path: &str,
        value: &str,
    ) -> Result<Vec<(EntityKey, Value)>, StorageError> {
        if path.is_empty() || path.split('.').any(str::is_empty) {
            return Err(StorageError::invalid_query("empty path segment", path));
        }

        let data_guard = self.data.read().await;
        let Some(docs) = data_guard.get(collection) else {
            return Ok(Vec::new());
        };

        let matching = docs.iter().filter(|(_, doc)| {
            Self::extract_field_value(doc, path).is_some_and(|field| field == value)
        });
        Ok(Self::sorted_entries(collection, matching))
    }

    async fn exists(&self, key: &EntityKey) -> Result<bool, StorageError> {
        let data_guard = self.data.read().await;
        Ok(data_guard
            .get(key.collection())
            .is_some_and(|docs| docs.contains_key(key.id())))
    }

    async fn count(&self, collection: &str) -> Result<usize, StorageError> {
        let data_guard = self.data.read().await;
        Ok(data_guard.get(collection).map_or(0, HashMap::len))
    }
}
