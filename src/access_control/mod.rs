//! Users, groups and roles.
//!
//! Each entity validates its own form fields and reports failures with the
//! console's exact flash text. Rules that need the rest of the console
//! (uniqueness, referenced entities existing, nothing still pointing at an
//! entity being deleted) are described here through [`AccessEntity`] and
//! enforced by whatever implements [`AccessControl`].
//!
//! The relationships form a chain: a [`User`] belongs to a [`Group`], and a
//! group is granted a [`Role`].

mod email;
mod group;
mod role;
mod user;

pub use email::EmailAddress;
pub use group::{CHOOSE_ROLE, Group};
pub use role::{Role, VmRestriction};
pub use user::{CHOOSE_GROUP, User};

use crate::error::{ConsoleResult, ValidationResult};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::future::Future;

/// An entity this one must point at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reference<'a> {
    pub kind: &'static str,
    pub collection: &'static str,
    pub key: &'a str,
}

/// Where entities of another kind point at this one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Backref {
    pub kind: &'static str,
    pub collection: &'static str,
    /// Field of the referencing document holding this entity's key
    pub field: &'static str,
}

/// An access-control entity as the console stores it.
pub trait AccessEntity: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// Name used in messages ("User", "Group", "Role").
    const KIND: &'static str;
    /// Storage collection.
    const COLLECTION: &'static str;
    /// Form label of the unique key, as in "Userid has already been taken".
    const KEY_LABEL: &'static str;
    /// Entities that refer to this kind, checked before deletion.
    const REFERENCED_BY: Option<Backref> = None;

    fn key(&self) -> &str;

    /// Field checks that need nothing but the form itself.
    fn validate(&self) -> ValidationResult<()>;

    fn reference(&self) -> Option<Reference<'_>> {
        None
    }
}

/// Access-control pages of the console.
pub trait AccessControl: Send + Sync {
    /// Validate and add a new entity.
    fn create<E: AccessEntity>(&self, entity: &E)
    -> impl Future<Output = ConsoleResult<()>> + Send;

    /// Replace the entity stored under `original_key`; the key itself may change.
    fn update<E: AccessEntity>(
        &self,
        original_key: &str,
        updated: &E,
    ) -> impl Future<Output = ConsoleResult<()>> + Send;

    fn delete<E: AccessEntity>(&self, key: &str) -> impl Future<Output = ConsoleResult<()>> + Send;

    fn exists<E: AccessEntity>(&self, key: &str)
    -> impl Future<Output = ConsoleResult<bool>> + Send;

    fn get<E: AccessEntity>(&self, key: &str)
    -> impl Future<Output = ConsoleResult<Option<E>>> + Send;

    /// Copy an existing user; see [`User::copy`].
    fn copy_user(&self, userid: &str) -> impl Future<Output = ConsoleResult<User>> + Send;
}

/// Roles present on a fresh appliance.
pub fn default_roles() -> Vec<Role> {
    ["super_administrator", "approver", "user"]
        .into_iter()
        .map(|name| Role::new(format!("EvmRole-{}", name), VmRestriction::None))
        .collect()
}

/// Groups present on a fresh appliance, each granted its matching role.
pub fn default_groups() -> Vec<Group> {
    ["super_administrator", "approver", "user"]
        .into_iter()
        .map(|name| {
            Group::new(
                format!("EvmGroup-{}", name),
                format!("EvmRole-{}", name),
            )
        })
        .collect()
}
