//! VM power control, ownership and visibility.
//!
//! Power actions are asynchronous on the provider: the console accepts the
//! action and the VM's reported state changes some reloads later. Scenarios
//! issue an action with [`VmControl::power`] and then block on
//! [`wait_for_power_state`].
//!
//! Which VMs a user sees depends on the VM restriction of their role, the
//! VM's owning user and group, and the tag filters of their group (see
//! [`Vm::is_visible_to`]).

use crate::access_control::VmRestriction;
use crate::error::{ConsoleError, ConsoleResult};
use crate::tags::{self, Tag};
use crate::wait::{AsyncWaiter, Truthy, WaitError, WaitOutcome, WaitSpec};
use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::future::Future;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PowerState {
    On,
    Off,
    Suspended,
    Unknown,
}

impl fmt::Display for PowerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PowerState::On => "on",
            PowerState::Off => "off",
            PowerState::Suspended => "suspended",
            PowerState::Unknown => "unknown",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PowerAction {
    Start,
    Stop,
    Suspend,
}

impl PowerAction {
    pub const ALL: [PowerAction; 3] = [PowerAction::Start, PowerAction::Stop, PowerAction::Suspend];

    pub fn as_str(&self) -> &'static str {
        match self {
            PowerAction::Start => "start",
            PowerAction::Stop => "stop",
            PowerAction::Suspend => "suspend",
        }
    }

    /// State the VM settles in once the action completes.
    pub fn target(&self) -> PowerState {
        match self {
            PowerAction::Start => PowerState::On,
            PowerAction::Stop => PowerState::Off,
            PowerAction::Suspend => PowerState::Suspended,
        }
    }

    /// Whether the console offers this action for a VM in `state`.
    pub fn is_available(&self, state: PowerState) -> bool {
        match self {
            PowerAction::Start => state != PowerState::On,
            PowerAction::Stop => state != PowerState::Off,
            PowerAction::Suspend => state == PowerState::On,
        }
    }
}

impl fmt::Display for PowerAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A VM as the console reports it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vm {
    pub name: String,
    pub provider: String,
    pub power_state: PowerState,
    /// Userid of the owning user
    #[serde(default)]
    pub owner: Option<String>,
    /// Description of the owning group
    #[serde(default)]
    pub group: Option<String>,
    #[serde(default)]
    pub tags: Vec<Tag>,
}

impl Vm {
    pub fn new(name: impl Into<String>, provider: impl Into<String>, power_state: PowerState) -> Self {
        Self {
            name: name.into(),
            provider: provider.into(),
            power_state,
            owner: None,
            group: None,
            tags: Vec::new(),
        }
    }

    /// Whether `viewer` finds this VM in their VM list.
    ///
    /// The role's restriction is checked first, then the group's tag
    /// filters. Group ownership only counts for
    /// [`VmRestriction::OnlyUserOrGroupOwned`].
    pub fn is_visible_to(&self, viewer: &Viewer<'_>) -> bool {
        let owned_by_user = self.owner.as_deref() == Some(viewer.userid);
        let permitted = match viewer.restriction {
            VmRestriction::None => true,
            VmRestriction::OnlyUserOwned => owned_by_user,
            VmRestriction::OnlyUserOrGroupOwned => {
                owned_by_user || self.group.as_deref() == Some(viewer.group)
            }
        };
        permitted && tags::matches_filters(viewer.tag_filters, &self.tags)
    }

    /// Actions offered in the VM's current state.
    pub fn actions(&self) -> Vec<PowerAction> {
        PowerAction::ALL
            .into_iter()
            .filter(|action| action.is_available(self.power_state))
            .collect()
    }
}

impl Truthy for Vm {
    fn is_truthy(&self) -> bool {
        true
    }
}

/// Owner selection of the "Set Ownership" form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ownership {
    /// Userid of the owning user
    pub user: Option<String>,
    /// Description of the owning group
    pub group: Option<String>,
}

impl Ownership {
    pub fn user(userid: impl Into<String>) -> Self {
        Self {
            user: Some(userid.into()),
            group: None,
        }
    }

    pub fn group(description: impl Into<String>) -> Self {
        Self {
            user: None,
            group: Some(description.into()),
        }
    }
}

/// A logged-in user as far as VM visibility is concerned.
#[derive(Debug, Clone, Copy)]
pub struct Viewer<'a> {
    pub userid: &'a str,
    /// Description of the user's group
    pub group: &'a str,
    /// Restriction of the group's role
    pub restriction: VmRestriction,
    /// Tag filters of the group
    pub tag_filters: &'a [Tag],
}

/// VM power pages and REST actions of the console.
pub trait VmControl: Send + Sync {
    fn get_vm(&self, name: &str) -> impl Future<Output = ConsoleResult<Vm>> + Send;

    /// Request a power action; fails with `InvalidAction` when the VM's
    /// current state does not offer it.
    fn power(&self, name: &str, action: PowerAction)
    -> impl Future<Output = ConsoleResult<()>> + Send;

    /// Apply one action to several VMs, the way the collection action does.
    /// Stops at the first VM that refuses it.
    fn power_all(
        &self,
        names: &[&str],
        action: PowerAction,
    ) -> impl Future<Output = ConsoleResult<()>> + Send {
        async move {
            for name in names {
                self.power(name, action).await?;
            }
            Ok(())
        }
    }

    /// Re-read the VM from the provider.
    fn reload_vm(&self, name: &str) -> impl Future<Output = ConsoleResult<()>> + Send;

    /// Assign the owning user and group. Both must exist.
    fn set_ownership(
        &self,
        name: &str,
        ownership: &Ownership,
    ) -> impl Future<Output = ConsoleResult<()>> + Send;

    /// Clear the owning user and group.
    fn unset_ownership(&self, name: &str) -> impl Future<Output = ConsoleResult<()>> + Send {
        async move { self.set_ownership(name, &Ownership::default()).await }
    }

    fn add_tag(&self, name: &str, tag: &Tag) -> impl Future<Output = ConsoleResult<()>> + Send;

    fn remove_tag(&self, name: &str, tag: &Tag) -> impl Future<Output = ConsoleResult<()>> + Send;

    /// Whether user `userid` would find VM `name` after logging in.
    fn vm_visible_to(
        &self,
        userid: &str,
        name: &str,
    ) -> impl Future<Output = ConsoleResult<bool>> + Send;
}

/// Wait until VM `name` reports `state`, reloading it before every retry.
pub async fn wait_for_power_state<C>(
    control: &C,
    name: &str,
    state: PowerState,
    spec: &WaitSpec,
) -> Result<WaitOutcome<Vm>, WaitError<Vm, ConsoleError>>
where
    C: VmControl,
{
    debug!("Waiting for VM {} to be {}", name, state);
    AsyncWaiter::new(spec)
        .refresh(async || control.reload_vm(name).await)
        .until(async || control.get_vm(name).await, |vm: &Vm| vm.power_state == state)
        .await
}
