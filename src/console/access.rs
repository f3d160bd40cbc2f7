//! Access-control pages.

use super::SimulatedConsole;
use crate::access_control::{AccessControl, AccessEntity, User};
use crate::error::{ConsoleError, ConsoleResult, ValidationError};
use crate::storage::{EntityKey, EntityStore};
use log::{debug, info};
use serde_json::Value;

impl<S: EntityStore> SimulatedConsole<S> {
    /// The referenced group or role must exist.
    async fn check_reference<E: AccessEntity>(&self, entity: &E) -> ConsoleResult<()> {
        if let Some(reference) = entity.reference() {
            if !self.contains(reference.collection, reference.key).await? {
                return Err(
                    ValidationError::unknown_reference(reference.kind, reference.key).into(),
                );
            }
        }
        Ok(())
    }

    /// Point everything that referenced `old_key` at `new_key`.
    async fn rename_references<E: AccessEntity>(
        &self,
        old_key: &str,
        new_key: &str,
    ) -> ConsoleResult<()> {
        let Some(backref) = E::REFERENCED_BY else {
            return Ok(());
        };
        let referencing = self
            .store
            .find_by_field(backref.collection, backref.field, old_key)
            .await?;
        for (key, mut doc) in referencing {
            debug!("Repointing {} from '{}' to '{}'", key, old_key, new_key);
            doc[backref.field] = Value::String(new_key.to_string());
            self.store.put(key, doc).await?;
        }
        Ok(())
    }
}

impl<S: EntityStore> AccessControl for SimulatedConsole<S> {
    async fn create<E: AccessEntity>(&self, entity: &E) -> ConsoleResult<()> {
        entity.validate()?;
        if self.contains(E::COLLECTION, entity.key()).await? {
            return Err(ValidationError::taken(E::KEY_LABEL).into());
        }
        self.check_reference(entity).await?;

        self.save(E::COLLECTION, entity.key(), entity).await?;
        info!("Created {} '{}'", E::KIND, entity.key());
        Ok(())
    }

    async fn update<E: AccessEntity>(&self, original_key: &str, updated: &E) -> ConsoleResult<()> {
        if !self.contains(E::COLLECTION, original_key).await? {
            return Err(ConsoleError::not_found(E::KIND, original_key));
        }
        updated.validate()?;
        self.check_reference(updated).await?;

        let renamed = updated.key() != original_key;
        if renamed && self.contains(E::COLLECTION, updated.key()).await? {
            return Err(ValidationError::taken(E::KEY_LABEL).into());
        }

        // The old key goes last, so a failed rename never loses the entity.
        self.save(E::COLLECTION, updated.key(), updated).await?;
        if renamed {
            self.rename_references::<E>(original_key, updated.key())
                .await?;
            self.store
                .delete(&EntityKey::new(E::COLLECTION, original_key))
                .await?;
        }
        info!("Updated {} '{}'", E::KIND, updated.key());
        Ok(())
    }

    async fn delete<E: AccessEntity>(&self, key: &str) -> ConsoleResult<()> {
        if !self.contains(E::COLLECTION, key).await? {
            return Err(ConsoleError::not_found(E::KIND, key));
        }
        if let Some(backref) = E::REFERENCED_BY {
            let referencing = self
                .store
                .find_by_field(backref.collection, backref.field, key)
                .await?;
            if let Some((user_key, _)) = referencing.first() {
                return Err(ConsoleError::in_use(
                    E::KIND,
                    key,
                    format!("{} '{}'", backref.kind, user_key.id()),
                ));
            }
        }

        self.store.delete(&EntityKey::new(E::COLLECTION, key)).await?;
        info!("Deleted {} '{}'", E::KIND, key);
        Ok(())
    }

    async fn exists<E: AccessEntity>(&self, key: &str) -> ConsoleResult<bool> {
        self.contains(E::COLLECTION, key).await
    }

    async fn get<E: AccessEntity>(&self, key: &str) -> ConsoleResult<Option<E>> {
        self.load(E::COLLECTION, key).await
    }

    async fn copy_user(&self, userid: &str) -> ConsoleResult<User> {
        let user: User = self
            .load(User::COLLECTION, userid)
            .await?
            .ok_or_else(|| ConsoleError::not_found(User::KIND, userid))?;
        let copy = user.copy();
        self.create(&copy).await?;
        Ok(copy)
    }
}
