//! Service catalogs, catalog items and bundles.
//!
//! A catalog item provisions a VM from a provider template; a bundle orders
//! several existing items together. Ordering either one creates a workflow
//! [`Request`] whose description is the item or bundle name.

use crate::error::{ConsoleResult, ValidationError, ValidationResult};
use crate::providers::ProvisioningData;
use crate::requests::Request;
use serde::{Deserialize, Serialize};
use std::future::Future;

/// Item type that provisions nothing and so needs no template.
pub const GENERIC_ITEM_TYPE: &str = "Generic";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    pub name: String,
    pub description: String,
}

impl Catalog {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }

    pub fn validate(&self) -> ValidationResult<()> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::blank("Name"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub name: String,
    pub description: String,
    /// Provider family, e.g. `VMware`, `RHEV`, or [`GENERIC_ITEM_TYPE`]
    pub item_type: String,
    pub display_in_catalog: bool,
    pub catalog: String,
    pub dialog: Option<String>,
    /// Template the item provisions from, shown as `Catalog/Name` on the form
    pub template: Option<String>,
    /// Provider owning the template
    pub provider: Option<String>,
    #[serde(default)]
    pub provisioning: ProvisioningData,
}

impl CatalogItem {
    pub fn new(
        name: impl Into<String>,
        item_type: impl Into<String>,
        catalog: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            item_type: item_type.into(),
            display_in_catalog: true,
            catalog: catalog.into(),
            dialog: None,
            template: None,
            provider: None,
            provisioning: ProvisioningData::default(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_dialog(mut self, dialog: impl Into<String>) -> Self {
        self.dialog = Some(dialog.into());
        self
    }

    /// Provision from `template` on `provider`.
    pub fn provisioning_from(
        mut self,
        provider: impl Into<String>,
        template: impl Into<String>,
        provisioning: ProvisioningData,
    ) -> Self {
        self.provider = Some(provider.into());
        self.template = Some(template.into());
        self.provisioning = provisioning;
        self
    }

    pub fn is_generic(&self) -> bool {
        self.item_type == GENERIC_ITEM_TYPE
    }

    pub fn validate(&self) -> ValidationResult<()> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::blank("Name"));
        }
        let has_template = self.template.as_deref().is_some_and(|t| !t.is_empty());
        if !self.is_generic() && !has_template {
            return Err(ValidationError::required("Catalog/Name"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogBundle {
    pub name: String,
    pub description: String,
    pub display_in_catalog: bool,
    pub catalog: String,
    pub dialog: Option<String>,
    /// Names of the catalog items ordered together
    pub items: Vec<String>,
}

impl CatalogBundle {
    pub fn new(
        name: impl Into<String>,
        catalog: impl Into<String>,
        items: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            display_in_catalog: true,
            catalog: catalog.into(),
            dialog: None,
            items: items.into_iter().map(Into::into).collect(),
        }
    }

    pub fn validate(&self) -> ValidationResult<()> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::blank("Name"));
        }
        if self.items.is_empty() {
            return Err(ValidationError::required("Resources"));
        }
        Ok(())
    }
}

/// Flash shown after a catalog item is saved.
pub fn item_saved_message(name: &str) -> String {
    format!("Service Catalog Item \"{}\" was saved", name)
}

/// Service catalog pages of the console.
pub trait ServiceCatalog: Send + Sync {
    fn create_catalog(&self, catalog: &Catalog) -> impl Future<Output = ConsoleResult<()>> + Send;

    /// Add an item to an existing catalog.
    fn create_catalog_item(
        &self,
        item: &CatalogItem,
    ) -> impl Future<Output = ConsoleResult<()>> + Send;

    /// Save changes to the item stored as `name`, returning the flash message.
    ///
    /// Saving succeeds even when the item's provider has since been deleted.
    fn update_catalog_item(
        &self,
        name: &str,
        item: &CatalogItem,
    ) -> impl Future<Output = ConsoleResult<String>> + Send;

    fn delete_catalog_item(&self, name: &str) -> impl Future<Output = ConsoleResult<()>> + Send;

    /// Add a bundle of existing items to an existing catalog.
    fn create_bundle(
        &self,
        bundle: &CatalogBundle,
    ) -> impl Future<Output = ConsoleResult<()>> + Send;

    /// Order the item or bundle `name` from `catalog`.
    fn order(&self, catalog: &str, name: &str)
    -> impl Future<Output = ConsoleResult<Request>> + Send;
}
