//! Fluent builders for console forms.
//!
//! Each builder starts from a form the console accepts, so a test only states
//! the field it is breaking.

use console_acceptance::access_control::User;
use console_acceptance::catalog::CatalogItem;
use console_acceptance::naming::random_alphanumeric;
use console_acceptance::providers::ProvisioningData;

/// Builder for the user form, defaulting to a valid `EvmGroup-user` member.
#[derive(Debug, Clone)]
pub struct UserBuilder {
    user: User,
}

impl UserBuilder {
    pub fn new() -> Self {
        let suffix = random_alphanumeric(4);
        Self {
            user: User::new(
                format!("user{}", suffix),
                format!("uid{}", suffix),
                "redhat",
                "xyz@redhat.com",
                "EvmGroup-user",
            ),
        }
    }

    pub fn username(mut self, username: &str) -> Self {
        self.user.username = username.to_string();
        self
    }

    pub fn userid(mut self, userid: &str) -> Self {
        self.user.userid = userid.to_string();
        self
    }

    /// Set the password and its confirmation independently.
    pub fn passwords(mut self, password: &str, verify: &str) -> Self {
        self.user.password = password.to_string();
        self.user.password_verify = verify.to_string();
        self
    }

    pub fn email(mut self, email: Option<&str>) -> Self {
        self.user.email = email.map(str::to_string);
        self
    }

    pub fn group(mut self, group: Option<&str>) -> Self {
        self.user.group = group.map(str::to_string);
        self
    }

    pub fn tags(mut self, cost_center: &str, value_assign: &str) -> Self {
        self.user = self.user.with_tags(cost_center, value_assign);
        self
    }

    pub fn build(self) -> User {
        self.user
    }
}

impl Default for UserBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for catalog items provisioning from the fixture template.
#[derive(Debug, Clone)]
pub struct CatalogItemBuilder {
    item: CatalogItem,
}

impl CatalogItemBuilder {
    pub fn new(name: &str, catalog: &str) -> Self {
        Self {
            item: CatalogItem::new(name, "VMware", catalog)
                .with_description("my catalog item")
                .with_dialog("default_dialog"),
        }
    }

    /// Provision `vm_name` from `template` on `provider`.
    pub fn template(mut self, provider: &str, template: &str, vm_name: &str) -> Self {
        let data = ProvisioningData {
            template: Some(template.to_string()),
            vm_name: Some(vm_name.to_string()),
            catalog_item_type: Some(self.item.item_type.clone()),
            ..ProvisioningData::default()
        };
        self.item = self.item.provisioning_from(provider, template, data);
        self
    }

    pub fn description(mut self, description: &str) -> Self {
        self.item.description = description.to_string();
        self
    }

    pub fn hidden(mut self) -> Self {
        self.item.display_in_catalog = false;
        self
    }

    pub fn build(self) -> CatalogItem {
        self.item
    }
}
