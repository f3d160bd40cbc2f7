//! Users.

use super::{AccessEntity, EmailAddress, Reference};
use crate::error::{ValidationError, ValidationResult};
use serde::{Deserialize, Serialize};

/// Placeholder shown by the group select before anything is picked.
pub const CHOOSE_GROUP: &str = "<Choose a Group>";

/// A console user as entered on the user form.
///
/// Text fields hold raw form input; an empty string is a field left blank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub username: String,
    pub userid: String,
    pub password: String,
    pub password_verify: String,
    pub email: Option<String>,
    pub group: Option<String>,
    pub cost_center: Option<String>,
    pub value_assign: Option<String>,
}

impl User {
    /// A user whose password confirmation matches.
    pub fn new(
        username: impl Into<String>,
        userid: impl Into<String>,
        password: impl Into<String>,
        email: impl Into<String>,
        group: impl Into<String>,
    ) -> Self {
        let password = password.into();
        Self {
            username: username.into(),
            userid: userid.into(),
            password_verify: password.clone(),
            password,
            email: Some(email.into()),
            group: Some(group.into()),
            cost_center: None,
            value_assign: None,
        }
    }

    /// Tag the user for chargeback.
    pub fn with_tags(mut self, cost_center: impl Into<String>, value_assign: impl Into<String>) -> Self {
        self.cost_center = Some(cost_center.into());
        self.value_assign = Some(value_assign.into());
        self
    }

    /// The user the console's "Copy" action pre-fills: same group, password
    /// and tags, named `Copy of <username>` with userid `<userid>_copy`.
    pub fn copy(&self) -> Self {
        Self {
            username: format!("Copy of {}", self.username),
            userid: format!("{}_copy", self.userid),
            ..self.clone()
        }
    }

    fn selected_group(&self) -> Option<&str> {
        self.group
            .as_deref()
            .filter(|group| !group.trim().is_empty() && *group != CHOOSE_GROUP)
    }
}

impl AccessEntity for User {
    const KIND: &'static str = "User";
    const COLLECTION: &'static str = "users";
    const KEY_LABEL: &'static str = "Userid";

    fn key(&self) -> &str {
        &self.userid
    }

    /// Checks run in the order the console reports them.
    fn validate(&self) -> ValidationResult<()> {
        if self.username.trim().is_empty() {
            return Err(ValidationError::blank("Name"));
        }
        if self.userid.trim().is_empty() {
            return Err(ValidationError::blank("Userid"));
        }
        if self.password.is_empty() {
            return Err(ValidationError::blank("Password_digest"));
        }
        if self.password != self.password_verify {
            return Err(ValidationError::PasswordMismatch);
        }
        if self.selected_group().is_none() {
            return Err(ValidationError::MissingGroup);
        }
        if let Some(email) = self.email.as_deref().filter(|e| !e.is_empty()) {
            EmailAddress::validate(email)?;
        }
        Ok(())
    }

    fn reference(&self) -> Option<Reference<'_>> {
        self.selected_group().map(|key| Reference {
            kind: "Group",
            collection: "groups",
            key,
        })
    }
}
