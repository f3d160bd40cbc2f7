//! Random names for test entities.
//!
//! Scenarios create users, catalogs and VMs on a shared appliance, so every
//! name gets a random suffix to avoid collisions between runs.

use uuid::Uuid;

/// Lowercase alphanumeric string of `len` characters (at most 32).
pub fn random_alphanumeric(len: usize) -> String {
    let mut value = Uuid::new_v4().simple().to_string();
    value.truncate(len.min(value.len()));
    value
}

/// `prefix` followed by an 8 character random suffix.
pub fn random_name(prefix: &str) -> String {
    format!("{}{}", prefix, random_alphanumeric(8))
}

/// Name for a VM created by a test, e.g. `test_pwrctl_1a2b3c4d`.
pub fn test_vm_name(purpose: &str) -> String {
    format!("test_{}_{}", purpose, random_alphanumeric(8))
}
