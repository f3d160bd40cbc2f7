//! Email address value object.
//!
//! The console accepts an address when it has a non-empty local part, a single
//! `@`, and a dotted domain with no empty labels. Whitespace anywhere is
//! rejected.

use crate::error::{ValidationError, ValidationResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A validated email address.
///
/// ```rust
/// use console_acceptance::access_control::EmailAddress;
///
/// let email = EmailAddress::new("xyz@redhat.com").unwrap();
/// assert_eq!(email.domain(), "redhat.com");
/// assert!(EmailAddress::new("xyzdhat.com").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EmailAddress(String);

impl EmailAddress {
    pub fn new(value: impl Into<String>) -> ValidationResult<Self> {
        let value = value.into();
        Self::validate(&value)?;
        Ok(Self(value))
    }

    pub fn value(&self) -> &str {
        &self.0
    }

    pub fn local_part(&self) -> &str {
        self.0.split_once('@').map_or("", |(local, _)| local)
    }

    pub fn domain(&self) -> &str {
        self.0.split_once('@').map_or("", |(_, domain)| domain)
    }

    /// Check an address without keeping it.
    pub fn validate(value: &str) -> ValidationResult<()> {
        if value.is_empty() || value.chars().any(char::is_whitespace) {
            return Err(ValidationError::InvalidEmail);
        }

        let Some((local, domain)) = value.split_once('@') else {
            return Err(ValidationError::InvalidEmail);
        };
        if local.is_empty() || domain.contains('@') {
            return Err(ValidationError::InvalidEmail);
        }

        let labels: Vec<&str> = domain.split('.').collect();
        if labels.len() < 2 || labels.iter().any(|label| label.is_empty()) {
            return Err(ValidationError::InvalidEmail);
        }
        Ok(())
    }
}

impl TryFrom<String> for EmailAddress {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for EmailAddress {
    type Error = ValidationError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<EmailAddress> for String {
    fn from(email: EmailAddress) -> Self {
        email.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
