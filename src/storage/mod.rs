//! Entity storage for the simulated console.
//!
//! The console keeps every entity (users, groups, roles, catalogs, requests,
//! VMs, providers) as a JSON document under a two-part key: the collection the
//! entity lives in and its natural key within that collection. Console
//! semantics such as uniqueness, referential checks and request progression
//! live in [`crate::console`]; this layer only puts, gets and searches
//! documents.
//!
//! # Example Usage
//!
//! ```rust
//! use console_acceptance::storage::{EntityKey, EntityStore, InMemoryStore};
//! use serde_json::json;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = InMemoryStore::new();
//!
//! let key = EntityKey::new("roles", "EvmRole-user");
//! store.put(key.clone(), json!({"name": "EvmRole-user"})).await?;
//! assert!(store.exists(&key).await?);
//!
//! let found = store.find_by_field("roles", "name", "EvmRole-user").await?;
//! assert_eq!(found.len(), 1);
//! # Ok(())
//! # }
//! ```

pub mod errors;
pub mod in_memory;

pub use errors::StorageError;
pub use in_memory::InMemoryStore;

use serde_json::Value;
use std::fmt;
use std::future::Future;

/// Key of one stored entity: `collection` → `id`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityKey {
    collection: String,
    id: String,
}

impl EntityKey {
    pub fn new(collection: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            collection: collection.into(),
            id: id.into(),
        }
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    pub fn id(&self) -> &str {
        &self.id
    }
}

impl fmt::Display for EntityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.collection, self.id)
    }
}

/// Document store behind the simulated console.
///
/// At this level create and update are the same operation: `put` replaces
/// whatever is stored under the key.
pub trait EntityStore: Send + Sync {
    /// Store `data` under `key`, returning the stored document.
    fn put(
        &self,
        key: EntityKey,
        data: Value,
    ) -> impl Future<Output = Result<Value, StorageError>> + Send;

    fn get(&self, key: &EntityKey)
    -> impl Future<Output = Result<Option<Value>, StorageError>> + Send;

    /// Remove the document; `true` if it existed.
    fn delete(&self, key: &EntityKey) -> impl Future<Output = Result<bool, StorageError>> + Send;

    /// All documents of a collection, ordered by id.
    fn list(
        &self,
        collection: &str,
    ) -> impl Future<Output = Result<Vec<(EntityKey, Value)>, StorageError>> + Send;

    /// Documents whose field at the dot-separated `path` equals `value`.
    ///
    /// Numeric path segments index into arrays. Results are ordered by id.
    fn find_by_field(
        &self,
        collection: &str,
        path: &str,
        value: &str,
    ) -> impl Future<Output = Result<Vec<(EntityKey, Value)>, StorageError>> + Send;

    fn exists(&self, key: &EntityKey) -> impl Future<Output = Result<bool, StorageError>> + Send;

    fn count(&self, collection: &str) -> impl Future<Output = Result<usize, StorageError>> + Send;
}
