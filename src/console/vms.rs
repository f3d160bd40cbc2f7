//! VM power control with delayed state changes, ownership and tags.

use super::SimulatedConsole;
use crate::access_control::{AccessEntity, Group, Role, User};
use crate::error::{ConsoleError, ConsoleResult, ValidationError};
use crate::storage::EntityStore;
use crate::tags::Tag;
use crate::vm::{Ownership, PowerAction, PowerState, Viewer, Vm, VmControl};
use log::{debug, info};
use serde::{Deserialize, Serialize};

const VMS: &str = "vms";

/// Power change accepted but not yet visible.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct PendingPower {
    target: PowerState,
    ticks: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct TrackedVm {
    vm: Vm,
    pending: Option<PendingPower>,
}

/// Store `vm`, replacing any VM of the same name.
pub(super) async fn insert<S: EntityStore>(
    console: &SimulatedConsole<S>,
    vm: Vm,
) -> ConsoleResult<()> {
    debug!("Registering VM {} on {}", vm.name, vm.provider);
    let name = vm.name.clone();
    let tracked = TrackedVm { vm, pending: None };
    console.save(VMS, &name, &tracked).await
}

impl<S: EntityStore> SimulatedConsole<S> {
    async fn tracked_vm(&self, name: &str) -> ConsoleResult<TrackedVm> {
        self.load(VMS, name)
            .await?
            .ok_or_else(|| ConsoleError::not_found("Vm", name))
    }

    /// Change a VM's stored record under the progress lock.
    async fn edit_vm(&self, name: &str, edit: impl FnOnce(&mut TrackedVm)) -> ConsoleResult<()> {
        let _progress = self.progress.lock().await;
        let mut tracked = self.tracked_vm(name).await?;
        edit(&mut tracked);
        self.save(VMS, name, &tracked).await
    }

    async fn require<E: AccessEntity>(&self, key: &str) -> ConsoleResult<E> {
        self.load(E::COLLECTION, key)
            .await?
            .ok_or_else(|| ConsoleError::not_found(E::KIND, key))
    }
}

impl<S: EntityStore> VmControl for SimulatedConsole<S> {
    async fn get_vm(&self, name: &str) -> ConsoleResult<Vm> {
        Ok(self.tracked_vm(name).await?.vm)
    }

    async fn power(&self, name: &str, action: PowerAction) -> ConsoleResult<()> {
        let _progress = self.progress.lock().await;
        let mut tracked = self.tracked_vm(name).await?;
        if !action.is_available(tracked.vm.power_state) {
            return Err(ConsoleError::invalid_action("Vm", name, action.as_str()));
        }

        info!(
            "Requested {} of VM {} (currently {})",
            action, name, tracked.vm.power_state
        );
        tracked.pending = Some(PendingPower {
            target: action.target(),
            ticks: 0,
        });
        self.save(VMS, name, &tracked).await
    }

    async fn reload_vm(&self, name: &str) -> ConsoleResult<()> {
        let _progress = self.progress.lock().await;
        let mut tracked = self.tracked_vm(name).await?;
        let Some(mut pending) = tracked.pending.take() else {
            return Ok(());
        };

        pending.ticks += 1;
        if pending.ticks >= self.settings.power_ticks.max(1) {
            debug!("VM {} is now {}", name, pending.target);
            tracked.vm.power_state = pending.target;
        } else {
            tracked.pending = Some(pending);
        }
        self.save(VMS, name, &tracked).await
    }

    async fn set_ownership(&self, name: &str, ownership: &Ownership) -> ConsoleResult<()> {
        if let Some(userid) = &ownership.user {
            self.require::<User>(userid).await?;
        }
        if let Some(group) = &ownership.group {
            self.require::<Group>(group).await?;
        }
        self.edit_vm(name, |tracked| {
            tracked.vm.owner = ownership.user.clone();
            tracked.vm.group = ownership.group.clone();
        })
        .await?;
        info!(
            "Set ownership of VM {} to user {:?}, group {:?}",
            name, ownership.user, ownership.group
        );
        Ok(())
    }

    async fn add_tag(&self, name: &str, tag: &Tag) -> ConsoleResult<()> {
        debug!("Tagging VM {} with {}", name, tag);
        self.edit_vm(name, |tracked| {
            if !tracked.vm.tags.contains(tag) {
                tracked.vm.tags.push(tag.clone());
            }
        })
        .await
    }

    async fn remove_tag(&self, name: &str, tag: &Tag) -> ConsoleResult<()> {
        debug!("Removing tag {} from VM {}", tag, name);
        self.edit_vm(name, |tracked| tracked.vm.tags.retain(|t| t != tag))
            .await
    }

    async fn vm_visible_to(&self, userid: &str, name: &str) -> ConsoleResult<bool> {
        let user: User = self.require(userid).await?;
        let group_key = user.group.as_deref().ok_or(ValidationError::MissingGroup)?;
        let group: Group = self.require(group_key).await?;
        let role_key = group.role.as_deref().ok_or(ValidationError::MissingRole)?;
        let restriction = self.require::<Role>(role_key).await?.vm_restriction;
        let vm = self.tracked_vm(name).await?.vm;

        let viewer = Viewer {
            userid,
            group: &group.description,
            restriction,
            tag_filters: &group.tags,
        };
        Ok(vm.is_visible_to(&viewer))
    }
}
