//! Groups.

use super::{AccessEntity, Backref, Reference};
use crate::error::{ValidationError, ValidationResult};
use crate::tags::Tag;
use serde::{Deserialize, Serialize};

/// Placeholder shown by the role select before anything is picked.
pub const CHOOSE_ROLE: &str = "<Choose a Role>";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub description: String,
    pub role: Option<String>,
    /// Tag filters limiting which VMs members see
    #[serde(default)]
    pub tags: Vec<Tag>,
}

impl Group {
    pub fn new(description: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            role: Some(role.into()),
            tags: Vec::new(),
        }
    }

    /// Add a tag filter, as "Edit Tags" on the group page does.
    pub fn with_tag(mut self, tag: Tag) -> Self {
        if !self.tags.contains(&tag) {
            self.tags.push(tag);
        }
        self
    }

    fn selected_role(&self) -> Option<&str> {
        self.role
            .as_deref()
            .filter(|role| !role.trim().is_empty() && *role != CHOOSE_ROLE)
    }
}

impl AccessEntity for Group {
    const KIND: &'static str = "Group";
    const COLLECTION: &'static str = "groups";
    const KEY_LABEL: &'static str = "Description";
    const REFERENCED_BY: Option<Backref> = Some(Backref {
        kind: "User",
        collection: "users",
        field: "group",
    });

    fn key(&self) -> &str {
        &self.description
    }

    fn validate(&self) -> ValidationResult<()> {
        if self.description.trim().is_empty() {
            return Err(ValidationError::blank("Description"));
        }
        if self.selected_role().is_none() {
            return Err(ValidationError::MissingRole);
        }
        Ok(())
    }

    fn reference(&self) -> Option<Reference<'_>> {
        self.selected_role().map(|key| Reference {
            kind: "Role",
            collection: "roles",
            key,
        })
    }
}
