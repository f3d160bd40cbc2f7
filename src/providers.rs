//! Infrastructure and cloud provider definitions.
//!
//! Providers come from the acceptance configuration. Only providers that
//! carry complete template provisioning data (template, host and datastore)
//! can back a catalog item, so scenario setup filters with [`provisionable`].

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderCategory {
    #[default]
    Infra,
    Cloud,
}

impl fmt::Display for ProviderCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ProviderCategory::Infra => "infra",
            ProviderCategory::Cloud => "cloud",
        })
    }
}

/// Template provisioning parameters for one provider.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProvisioningData {
    pub template: Option<String>,
    pub host: Option<String>,
    pub datastore: Option<String>,
    pub vm_name: Option<String>,
    pub catalog_item_type: Option<String>,
}

impl ProvisioningData {
    /// Template, host and datastore are all present and non-empty.
    pub fn is_complete(&self) -> bool {
        [&self.template, &self.host, &self.datastore]
            .iter()
            .all(|field| field.as_deref().is_some_and(|v| !v.is_empty()))
    }
}

/// One provider entry of the acceptance configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Configuration key, e.g. `vsphere55`
    pub key: String,
    /// Name shown in the console
    pub name: String,
    /// Provider type, e.g. `virtualcenter`, `rhevm`, `ec2`
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub category: ProviderCategory,
    #[serde(default)]
    pub provisioning: Option<ProvisioningData>,
}

impl ProviderConfig {
    pub fn new(
        key: impl Into<String>,
        name: impl Into<String>,
        kind: impl Into<String>,
        category: ProviderCategory,
    ) -> Self {
        Self {
            key: key.into(),
            name: name.into(),
            kind: kind.into(),
            category,
            provisioning: None,
        }
    }

    pub fn with_provisioning(mut self, provisioning: ProvisioningData) -> Self {
        self.provisioning = Some(provisioning);
        self
    }

    pub fn is_provisionable(&self) -> bool {
        self.provisioning
            .as_ref()
            .is_some_and(ProvisioningData::is_complete)
    }
}

/// Providers able to provision from a template.
pub fn provisionable(providers: &[ProviderConfig]) -> Vec<&ProviderConfig> {
    providers.iter().filter(|p| p.is_provisionable()).collect()
}
