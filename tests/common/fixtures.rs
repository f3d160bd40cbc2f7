//! Provider configurations and pre-seeded consoles.

use console_acceptance::catalog::{Catalog, ServiceCatalog};
use console_acceptance::providers::{ProviderCategory, ProviderConfig, ProvisioningData};
use console_acceptance::{AcceptanceConfig, SimulatedConsole};

pub const CATALOG: &str = "svc-catalog";
pub const INFRA_PROVIDER: &str = "vSphere 5.5";
pub const CLOUD_PROVIDER: &str = "EC2 us-east";
pub const TEMPLATE: &str = "rhel7-template";

fn provisioning(template: &str, host: &str, datastore: &str) -> ProvisioningData {
    ProvisioningData {
        template: Some(template.to_string()),
        host: Some(host.to_string()),
        datastore: Some(datastore.to_string()),
        ..ProvisioningData::default()
    }
}

/// One infrastructure and one cloud provider, both able to provision.
pub fn providers() -> Vec<ProviderConfig> {
    vec![
        ProviderConfig::new(
            "vsphere55",
            INFRA_PROVIDER,
            "virtualcenter",
            ProviderCategory::Infra,
        )
        .with_provisioning(provisioning(TEMPLATE, "esx-01", "datastore1")),
        ProviderConfig::new("ec2east", CLOUD_PROVIDER, "ec2", ProviderCategory::Cloud)
            .with_provisioning(provisioning("ami-rhel7", "us-east-1a", "ebs")),
    ]
}

pub fn acceptance_config() -> AcceptanceConfig {
    AcceptanceConfig {
        providers: providers(),
        ..AcceptanceConfig::default()
    }
}

/// Console with default roles, groups, the fixture providers and [`CATALOG`].
pub async fn seeded_console() -> SimulatedConsole {
    super::init_logging();
    let console = SimulatedConsole::from_config(&acceptance_config())
        .await
        .expect("fixture config is valid");
    console
        .create_catalog(&Catalog::new(CATALOG, "my catalog"))
        .await
        .expect("fixture catalog is new");
    console
}
