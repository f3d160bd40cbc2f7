//! Store wrapper for console tests that need an uncooperative backend.

use crate::storage::{EntityKey, EntityStore, InMemoryStore, StorageError};
use serde_json::Value;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// In-memory store that can yield before every read, so concurrent tasks
/// interleave, and whose field searches can be switched to fail.
#[derive(Debug, Clone, Default)]
pub(crate) struct TestStore {
    inner: InMemoryStore,
    yield_on_read: bool,
    broken_search: Arc<AtomicBool>,
}

impl TestStore {
    pub(crate) fn yielding() -> Self {
        Self {
            yield_on_read: true,
            ..Self::default()
        }
    }

    pub(crate) fn break_search(&self) {
        self.broken_search.store(true, Ordering::SeqCst);
    }

    async fn pause(&self) {
        if self.yield_on_read {
            tokio::task::yield_now().await;
        }
    }
}

impl EntityStore for TestStore {
    async fn put(&self, key: EntityKey, data: Value) -> Result<Value, StorageError> {
        self.inner.put(key, data).await
    }

    async fn get(&self, key: &EntityKey) -> Result<Option<Value>, StorageError> {
        self.pause().await;
        self.inner.get(key).await
    }

    async fn delete(&self, key: &EntityKey) -> Result<bool, StorageError> {
        self.inner.delete(key).await
    }

    async fn list(&self, collection: &str) -> Result<Vec<(EntityKey, Value)>, StorageError> {
        self.pause().await;
        self.inner.list(collection).await
    }

    async fn find_by_field(
        &self,
        collection: &str,
        path: &str,
        value: &str,
    ) -> Result<Vec<(EntityKey, Value)>, StorageError> {
        if self.broken_search.load(Ordering::SeqCst) {
            return Err(StorageError::invalid_query("index unavailable", path));
        }
        self.pause().await;
        self.inner.find_by_field(collection, path, value).await
    }

    async fn exists(&self, key: &EntityKey) -> Result<bool, StorageError> {
        self.pause().await;
        self.inner.exists(key).await
    }

    async fn count(&self, collection: &str) -> Result<usize, StorageError> {
        self.inner.count(collection).await
    }
}
