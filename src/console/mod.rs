//! In-memory console.
//!
//! [`SimulatedConsole`] implements every collaborator interface of the crate
//! ([`AccessControl`](crate::access_control::AccessControl),
//! [`ServiceCatalog`](crate::catalog::ServiceCatalog),
//! [`RequestStatusSource`](crate::requests::RequestStatusSource) and
//! [`VmControl`](crate::vm::VmControl)) on top of an [`EntityStore`]. It
//! enforces the same form rules as the real console and models the backend's
//! long-running work: requests and power actions only move forward when the
//! caller reloads, exactly the way a test sees stale pages until it refreshes.

mod access;
mod catalogs;
mod requests;
#[cfg(test)]
mod test_store;
mod vms;

use crate::access_control::{AccessEntity, Group, Role, default_groups, default_roles};
use crate::config::AcceptanceConfig;
use crate::error::{ConsoleError, ConsoleResult};
use crate::providers::ProviderConfig;
use crate::storage::{EntityKey, EntityStore, InMemoryStore};
use crate::vm::Vm;
use log::info;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;

pub(crate) const PROVIDERS: &str = "providers";

/// Pace of the simulated backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationSettings {
    /// Reloads a request spends in each state before moving on
    pub request_ticks: u32,
    /// Reloads of a VM before a power action takes effect
    pub power_ticks: u32,
    /// Name shown in the Requester column of new requests
    pub requester: String,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            request_ticks: 2,
            power_ticks: 2,
            requester: "Administrator".to_string(),
        }
    }
}

/// Console backed by an entity store, with simulated request and power progression.
///
/// ```rust
/// use console_acceptance::access_control::{AccessControl, Role, VmRestriction};
/// use console_acceptance::console::SimulatedConsole;
///
/// # async fn example() -> console_acceptance::ConsoleResult<()> {
/// let console = SimulatedConsole::default();
/// console.seed_defaults().await?;
///
/// console.create(&Role::new("auditor", VmRestriction::None)).await?;
/// assert!(console.exists::<Role>("auditor").await?);
/// # Ok(())
/// # }
/// ```
///
/// Clones share the store. Reloads, power actions and ownership changes read
/// a VM or request, change it and write it back; those steps hold a lock
/// shared by all clones, so concurrent reloads never lose an update.
#[derive(Debug, Clone)]
pub struct SimulatedConsole<S = InMemoryStore> {
    store: S,
    settings: SimulationSettings,
    progress: Arc<Mutex<()>>,
}

impl Default for SimulatedConsole {
    fn default() -> Self {
        Self::new(SimulationSettings::default())
    }
}

impl SimulatedConsole {
    /// Empty console on a fresh in-memory store.
    pub fn new(settings: SimulationSettings) -> Self {
        Self::with_store(InMemoryStore::new(), settings)
    }

    /// Console seeded with the default roles and groups and the configured providers.
    pub async fn from_config(config: &AcceptanceConfig) -> ConsoleResult<Self> {
        let console = Self::new(config.simulation.clone());
        console.seed_defaults().await?;
        for provider in &config.providers {
            console.add_provider(provider).await?;
        }
        Ok(console)
    }
}

impl<S: EntityStore> SimulatedConsole<S> {
    pub fn with_store(store: S, settings: SimulationSettings) -> Self {
        Self {
            store,
            settings,
            progress: Arc::new(Mutex::new(())),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn settings(&self) -> &SimulationSettings {
        &self.settings
    }

    /// Add the roles and groups every fresh appliance has.
    pub async fn seed_defaults(&self) -> ConsoleResult<()> {
        for role in default_roles() {
            self.save(Role::COLLECTION, role.key(), &role).await?;
        }
        for group in default_groups() {
            self.save(Group::COLLECTION, group.key(), &group).await?;
        }
        Ok(())
    }

    /// Register a provider under its display name.
    pub async fn add_provider(&self, provider: &ProviderConfig) -> ConsoleResult<()> {
        if self.has_provider(&provider.name).await? {
            return Err(ConsoleError::already_exists("Provider", &provider.name));
        }
        info!("Adding {} provider '{}'", provider.kind, provider.name);
        self.save(PROVIDERS, &provider.name, provider).await
    }

    /// Remove a provider. Catalog items and requests referring to it are kept.
    pub async fn delete_provider(&self, name: &str) -> ConsoleResult<()> {
        if !self.store.delete(&EntityKey::new(PROVIDERS, name)).await? {
            return Err(ConsoleError::not_found("Provider", name));
        }
        info!("Deleted provider '{}'", name);
        Ok(())
    }

    pub async fn has_provider(&self, name: &str) -> ConsoleResult<bool> {
        Ok(self.store.exists(&EntityKey::new(PROVIDERS, name)).await?)
    }

    pub async fn providers(&self) -> ConsoleResult<Vec<ProviderConfig>> {
        self.load_all(PROVIDERS).await
    }

    /// Make a VM that already exists on a provider visible in the console.
    pub async fn add_vm(&self, vm: Vm) -> ConsoleResult<()> {
        if !self.has_provider(&vm.provider).await? {
            return Err(ConsoleError::not_found("Provider", &vm.provider));
        }
        vms::insert(self, vm).await
    }

    async fn load<T: DeserializeOwned>(&self, collection: &str, id: &str) -> ConsoleResult<Option<T>> {
        match self.store.get(&EntityKey::new(collection, id)).await? {
            Some(doc) => Ok(Some(serde_json::from_value(doc)?)),
            None => Ok(None),
        }
    }

    async fn load_all<T: DeserializeOwned>(&self, collection: &str) -> ConsoleResult<Vec<T>> {
        let mut values = Vec::new();
        for (_, doc) in self.store.list(collection).await? {
            values.push(serde_json::from_value(doc)?);
        }
        Ok(values)
    }

    async fn save<T: Serialize + Sync>(&self, collection: &str, id: &str, value: &T) -> ConsoleResult<()> {
        let doc = serde_json::to_value(value)?;
        self.store.put(EntityKey::new(collection, id), doc).await?;
        Ok(())
    }

    async fn contains(&self, collection: &str, id: &str) -> ConsoleResult<bool> {
        Ok(self.store.exists(&EntityKey::new(collection, id)).await?)
    }
}
