//! Acceptance-test toolkit for a web management console.
//!
//! Provisioning requests, service orders and VM power changes run for minutes
//! on the console's backend, so acceptance scenarios spend most of their time
//! waiting. This crate provides the completion waiter those scenarios block
//! on, typed models of the console's pages, and an in-memory console that
//! behaves like the real one for exercising scenarios offline.
//!
//! # Core Components
//!
//! - [`wait`] - Completion waiter: poll an operation until it succeeds, fails or times out
//! - [`requests`] - Workflow request rows and request waits
//! - [`vm`] - VM power actions, power-state waits, ownership and visibility
//! - [`tags`] - Company tags on VMs and tag filters on groups
//! - [`access_control`], [`catalog`] - Console forms and their validation rules
//! - [`SimulatedConsole`] - In-memory console implementing every collaborator trait
//! - [`AcceptanceConfig`] - Appliance, providers and wait profiles of a run
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use console_acceptance::catalog::{Catalog, CatalogItem, ServiceCatalog};
//! use console_acceptance::providers::ProvisioningData;
//! use console_acceptance::requests::{CellFilter, wait_for_request};
//! use console_acceptance::{AcceptanceConfig, SimulatedConsole};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AcceptanceConfig::from_env()?;
//! let console = SimulatedConsole::from_config(&config).await?;
//!
//! console.create_catalog(&Catalog::new("svc-catalog", "my catalog")).await?;
//! let item = CatalogItem::new("svc-item", "VMware", "svc-catalog")
//!     .provisioning_from("vSphere", "rhel7-template", ProvisioningData::default());
//! console.create_catalog_item(&item).await?;
//! console.order("svc-catalog", "svc-item").await?;
//!
//! let row = wait_for_request(&console, &CellFilter::description("svc-item"), &config.waits.request)
//!     .await?
//!     .into_value();
//! assert_eq!(row.message, "Request complete");
//! # Ok(())
//! # }
//! ```

pub mod access_control;
pub mod catalog;
pub mod config;
pub mod console;
pub mod error;
pub mod naming;
pub mod providers;
pub mod requests;
pub mod storage;
pub mod tags;
pub mod vm;
pub mod wait;

// Re-export commonly used types for convenience
pub use config::{AcceptanceConfig, WaitProfiles};
pub use console::{SimulatedConsole, SimulationSettings};
pub use error::{ConsoleError, ConsoleResult, ValidationError, ValidationResult};
pub use wait::{PollResult, WaitError, WaitOutcome, WaitSpec, wait_for, wait_for_async};
