//! Service catalog pages.

use super::SimulatedConsole;
use super::requests::{self, ProvisionTarget};
use crate::catalog::{Catalog, CatalogBundle, CatalogItem, ServiceCatalog, item_saved_message};
use crate::error::{ConsoleError, ConsoleResult, ValidationError};
use crate::requests::Request;
use crate::storage::{EntityKey, EntityStore};
use log::info;

const CATALOGS: &str = "catalogs";
const ITEMS: &str = "catalog_items";
const BUNDLES: &str = "catalog_bundles";

impl<S: EntityStore> SimulatedConsole<S> {
    async fn require_catalog(&self, name: &str) -> ConsoleResult<()> {
        if !self.contains(CATALOGS, name).await? {
            return Err(ValidationError::unknown_reference("Catalog", name).into());
        }
        Ok(())
    }

    /// Items and bundles share one name space in a catalog.
    async fn name_taken(&self, name: &str) -> ConsoleResult<bool> {
        Ok(self.contains(ITEMS, name).await? || self.contains(BUNDLES, name).await?)
    }

    async fn bundles_containing(&self, item: &str) -> ConsoleResult<Vec<CatalogBundle>> {
        let bundles: Vec<CatalogBundle> = self.load_all(BUNDLES).await?;
        Ok(bundles
            .into_iter()
            .filter(|bundle| bundle.items.iter().any(|i| i == item))
            .collect())
    }

    fn target_of(item: &CatalogItem) -> ProvisionTarget {
        ProvisionTarget {
            provider: item.provider.clone(),
            vm_name: item.provisioning.vm_name.clone(),
        }
    }
}

impl<S: EntityStore> ServiceCatalog for SimulatedConsole<S> {
    async fn create_catalog(&self, catalog: &Catalog) -> ConsoleResult<()> {
        catalog.validate()?;
        if self.contains(CATALOGS, &catalog.name).await? {
            return Err(ValidationError::taken("Name").into());
        }
        self.save(CATALOGS, &catalog.name, catalog).await?;
        info!("Created catalog '{}'", catalog.name);
        Ok(())
    }

    async fn create_catalog_item(&self, item: &CatalogItem) -> ConsoleResult<()> {
        item.validate()?;
        self.require_catalog(&item.catalog).await?;
        if self.name_taken(&item.name).await? {
            return Err(ValidationError::taken("Name").into());
        }
        if let Some(provider) = &item.provider {
            if !self.has_provider(provider).await? {
                return Err(ValidationError::unknown_reference("Provider", provider).into());
            }
        }

        self.save(ITEMS, &item.name, item).await?;
        info!("Created catalog item '{}' in '{}'", item.name, item.catalog);
        Ok(())
    }

    async fn update_catalog_item(&self, name: &str, item: &CatalogItem) -> ConsoleResult<String> {
        if !self.contains(ITEMS, name).await? {
            return Err(ConsoleError::not_found("Catalog Item", name));
        }
        item.validate()?;
        self.require_catalog(&item.catalog).await?;

        if item.name != name {
            if self.name_taken(&item.name).await? {
                return Err(ValidationError::taken("Name").into());
            }
            self.store.delete(&EntityKey::new(ITEMS, name)).await?;
            for mut bundle in self.bundles_containing(name).await? {
                for entry in bundle.items.iter_mut().filter(|i| i.as_str() == name) {
                    *entry = item.name.clone();
                }
                self.save(BUNDLES, &bundle.name, &bundle).await?;
            }
        }

        self.save(ITEMS, &item.name, item).await?;
        Ok(item_saved_message(&item.name))
    }

    async fn delete_catalog_item(&self, name: &str) -> ConsoleResult<()> {
        if !self.contains(ITEMS, name).await? {
            return Err(ConsoleError::not_found("Catalog Item", name));
        }
        if let Some(bundle) = self.bundles_containing(name).await?.first() {
            return Err(ConsoleError::in_use(
                "Catalog Item",
                name,
                format!("Catalog Bundle '{}'", bundle.name),
            ));
        }
        self.store.delete(&EntityKey::new(ITEMS, name)).await?;
        info!("Deleted catalog item '{}'", name);
        Ok(())
    }

    async fn create_bundle(&self, bundle: &CatalogBundle) -> ConsoleResult<()> {
        bundle.validate()?;
        self.require_catalog(&bundle.catalog).await?;
        if self.name_taken(&bundle.name).await? {
            return Err(ValidationError::taken("Name").into());
        }
        for item in &bundle.items {
            if !self.contains(ITEMS, item).await? {
                return Err(ValidationError::unknown_reference("Catalog Item", item).into());
            }
        }

        self.save(BUNDLES, &bundle.name, bundle).await?;
        info!(
            "Created catalog bundle '{}' with {} items",
            bundle.name,
            bundle.items.len()
        );
        Ok(())
    }

    async fn order(&self, catalog: &str, name: &str) -> ConsoleResult<Request> {
        if !self.contains(CATALOGS, catalog).await? {
            return Err(ConsoleError::not_found("Catalog", catalog));
        }

        let targets = if let Some(item) = self.load::<CatalogItem>(ITEMS, name).await? {
            if item.catalog != catalog {
                return Err(ConsoleError::not_found("Catalog Item", name));
            }
            if !item.display_in_catalog {
                return Err(ConsoleError::invalid_action("Catalog Item", name, "order"));
            }
            vec![Self::target_of(&item)]
        } else if let Some(bundle) = self.load::<CatalogBundle>(BUNDLES, name).await? {
            if bundle.catalog != catalog {
                return Err(ConsoleError::not_found("Catalog Bundle", name));
            }
            if !bundle.display_in_catalog {
                return Err(ConsoleError::invalid_action("Catalog Bundle", name, "order"));
            }
            let mut targets = Vec::with_capacity(bundle.items.len());
            for item_name in &bundle.items {
                let item: CatalogItem = self
                    .load(ITEMS, item_name)
                    .await?
                    .ok_or_else(|| ConsoleError::not_found("Catalog Item", item_name))?;
                targets.push(Self::target_of(&item));
            }
            targets
        } else {
            return Err(ConsoleError::not_found("Catalog Item", name));
        };

        info!("Ordering '{}' from catalog '{}'", name, catalog);
        requests::submit(self, name, targets).await
    }
}
