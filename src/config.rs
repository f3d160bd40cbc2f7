//! Acceptance run configuration.
//!
//! One JSON document describes the appliance under test, the credentials
//! used to log in, the providers available for provisioning and the wait
//! profiles for each kind of long-running workflow. Every field has a
//! default, so a config file only lists what it changes.
//!
//! ```json
//! {
//!   "base_url": "https://10.0.0.5",
//!   "providers": [
//!     {"key": "vsphere55", "name": "vSphere 5.5", "type": "virtualcenter",
//!      "provisioning": {"template": "rhel7", "host": "esx-01", "datastore": "ds1"}}
//!   ],
//!   "waits": {"power_state": {"timeout": "10m", "delay": "20s"}}
//! }
//! ```

use crate::console::SimulationSettings;
use crate::error::{ConsoleError, ConsoleResult};
use crate::providers::{ProviderConfig, provisionable};
use crate::wait::WaitSpec;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use std::time::Duration;

/// Environment variable naming the config file used by [`AcceptanceConfig::from_env`].
pub const CONFIG_ENV: &str = "CONSOLE_ACCEPTANCE_CONFIG";

/// Wait profiles for the console's long-running workflows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaitProfiles {
    /// Provisioning request row on the requests page
    pub request: WaitSpec,
    /// Provisioning request through the REST API
    pub rest_request: WaitSpec,
    /// VM reaching a power state after an action
    pub power_state: WaitSpec,
    /// Provider or VM disappearing after deletion
    pub deletion: WaitSpec,
}

impl Default for WaitProfiles {
    fn default() -> Self {
        Self {
            request: WaitSpec::new(Duration::from_secs(1400), Duration::from_secs(20))
                .with_message("provision request"),
            rest_request: WaitSpec::new(Duration::from_secs(15 * 60), Duration::from_secs(5))
                .with_message("REST provision request"),
            power_state: WaitSpec::new(Duration::from_secs(1000), Duration::from_secs(20))
                .with_message("VM power state"),
            deletion: WaitSpec::new(Duration::from_secs(5 * 60), Duration::from_secs(10))
                .with_message("deletion"),
        }
    }
}

impl WaitProfiles {
    fn named(&self) -> [(&'static str, &WaitSpec); 4] {
        [
            ("request", &self.request),
            ("rest_request", &self.rest_request),
            ("power_state", &self.power_state),
            ("deletion", &self.deletion),
        ]
    }
}

/// Configuration of one acceptance run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AcceptanceConfig {
    /// Appliance URL
    pub base_url: String,
    pub username: String,
    pub password: String,
    pub providers: Vec<ProviderConfig>,
    pub waits: WaitProfiles,
    /// Pace of the simulated console backend
    pub simulation: SimulationSettings,
}

impl Default for AcceptanceConfig {
    fn default() -> Self {
        Self {
            base_url: "https://localhost".to_string(),
            username: "admin".to_string(),
            password: "smartvm".to_string(),
            providers: Vec::new(),
            waits: WaitProfiles::default(),
            simulation: SimulationSettings::default(),
        }
    }
}

impl AcceptanceConfig {
    /// Load and validate a JSON config file.
    pub fn from_file(path: impl AsRef<Path>) -> ConsoleResult<Self> {
        let path = path.as_ref();
        debug!("Loading acceptance config from {}", path.display());
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> ConsoleResult<Self> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load the file named by [`CONFIG_ENV`], or the defaults when it is unset.
    pub fn from_env() -> ConsoleResult<Self> {
        match std::env::var(CONFIG_ENV) {
            Ok(path) => Self::from_file(path),
            Err(std::env::VarError::NotPresent) => {
                info!("{} not set, using default acceptance config", CONFIG_ENV);
                Ok(Self::default())
            }
            Err(e) => Err(ConsoleError::config(format!("{}: {}", CONFIG_ENV, e))),
        }
    }

    pub fn validate(&self) -> ConsoleResult<()> {
        if self.base_url.trim().is_empty() {
            return Err(ConsoleError::config("base_url must not be empty"));
        }

        for (name, spec) in self.waits.named() {
            if spec.delay().is_zero() && !spec.timeout().is_zero() {
                return Err(ConsoleError::config(format!(
                    "wait profile '{}' has a zero delay with a {}s timeout",
                    name,
                    spec.timeout().as_secs()
                )));
            }
        }

        let mut keys = HashSet::new();
        for provider in &self.providers {
            if !keys.insert(provider.key.as_str()) {
                return Err(ConsoleError::config(format!(
                    "duplicate provider key '{}'",
                    provider.key
                )));
            }
        }
        Ok(())
    }

    pub fn provider(&self, key: &str) -> Option<&ProviderConfig> {
        self.providers.iter().find(|p| p.key == key)
    }

    /// Providers with complete template provisioning data.
    pub fn provisionable_providers(&self) -> Vec<&ProviderConfig> {
        provisionable(&self.providers)
    }
}
