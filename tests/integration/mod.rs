//! Integration scenarios against the simulated console.
//!
//! Scenarios use the same waits and wait profiles a run against a real
//! appliance does. They run on tokio's paused clock, so a 23 minute request
//! wait completes as soon as the simulated backend finishes.

pub mod access_control;
pub mod power_control;
pub mod service_catalogs;
