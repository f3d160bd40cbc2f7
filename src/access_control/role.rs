//! Roles.

use super::{AccessEntity, Backref};
use crate::error::{ValidationError, ValidationResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which VMs members of a role may see.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum VmRestriction {
    #[default]
    None,
    #[serde(rename = "Only User Owned")]
    OnlyUserOwned,
    #[serde(rename = "Only User or Group Owned")]
    OnlyUserOrGroupOwned,
}

impl fmt::Display for VmRestriction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            VmRestriction::None => "None",
            VmRestriction::OnlyUserOwned => "Only User Owned",
            VmRestriction::OnlyUserOrGroupOwned => "Only User or Group Owned",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    pub name: String,
    #[serde(default)]
    pub vm_restriction: VmRestriction,
}

impl Role {
    pub fn new(name: impl Into<String>, vm_restriction: VmRestriction) -> Self {
        Self {
            name: name.into(),
            vm_restriction,
        }
    }
}

impl AccessEntity for Role {
    const KIND: &'static str = "Role";
    const COLLECTION: &'static str = "roles";
    const KEY_LABEL: &'static str = "Name";
    const REFERENCED_BY: Option<Backref> = Some(Backref {
        kind: "Group",
        collection: "groups",
        field: "role",
    });

    fn key(&self) -> &str {
        &self.name
    }

    fn validate(&self) -> ValidationResult<()> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::blank("Name"));
        }
        Ok(())
    }
}
