//! Power actions on provisioned VMs and waits on their power state.

use crate::common::fixtures::{CLOUD_PROVIDER, INFRA_PROVIDER, acceptance_config, seeded_console};
use console_acceptance::naming::test_vm_name;
use console_acceptance::vm::{PowerAction, PowerState, Vm, VmControl, wait_for_power_state};
use console_acceptance::wait::WaitSpec;
use console_acceptance::{ConsoleError, SimulatedConsole};

async fn console_with_vm(state: PowerState) -> (SimulatedConsole, String) {
    let console = seeded_console().await;
    let name = test_vm_name("power");
    console
        .add_vm(Vm::new(&name, INFRA_PROVIDER, state))
        .await
        .unwrap();
    (console, name)
}

#[tokio::test(start_paused = true)]
async fn test_stop() {
    let (console, name) = console_with_vm(PowerState::On).await;
    let spec = acceptance_config().waits.power_state;

    console.power(&name, PowerAction::Stop).await.unwrap();
    let outcome = wait_for_power_state(&console, &name, PowerState::Off, &spec)
        .await
        .unwrap();
    assert_eq!(outcome.value.power_state, PowerState::Off);
    assert_eq!(outcome.attempts, 3);
    assert_eq!(outcome.value.actions(), vec![PowerAction::Start]);
}

#[tokio::test(start_paused = true)]
async fn test_start_from_suspended() {
    let (console, name) = console_with_vm(PowerState::Suspended).await;
    let spec = acceptance_config().waits.power_state;

    console.power(&name, PowerAction::Start).await.unwrap();
    let vm = wait_for_power_state(&console, &name, PowerState::On, &spec)
        .await
        .unwrap()
        .into_value();
    assert_eq!(vm.actions(), vec![PowerAction::Stop, PowerAction::Suspend]);
}

#[tokio::test(start_paused = true)]
async fn test_suspend() {
    let (console, name) = console_with_vm(PowerState::On).await;
    let spec = acceptance_config().waits.power_state;

    console.power(&name, PowerAction::Suspend).await.unwrap();
    let vm = wait_for_power_state(&console, &name, PowerState::Suspended, &spec)
        .await
        .unwrap()
        .into_value();
    assert_eq!(vm.power_state, PowerState::Suspended);

    crate::assert_error_message_contains!(
        console.power(&name, PowerAction::Suspend).await,
        "Action 'suspend' is not available"
    );
}

#[tokio::test(start_paused = true)]
async fn test_already_in_state_needs_one_attempt() {
    let (console, name) = console_with_vm(PowerState::Off).await;
    let spec = acceptance_config().waits.power_state;
    let outcome = wait_for_power_state(&console, &name, PowerState::Off, &spec)
        .await
        .unwrap();
    assert_eq!(outcome.attempts, 1);
    assert!(outcome.elapsed.is_zero());
}

#[tokio::test(start_paused = true)]
async fn test_collection_stop_waits_concurrently() {
    let console = seeded_console().await;
    let spec = acceptance_config().waits.power_state;
    let names = ["test_web_01", "test_web_02"];
    for (name, provider) in names.iter().zip([INFRA_PROVIDER, CLOUD_PROVIDER]) {
        console
            .add_vm(Vm::new(*name, provider, PowerState::On))
            .await
            .unwrap();
    }

    console.power_all(&names, PowerAction::Stop).await.unwrap();
    let (first, second) = futures::join!(
        wait_for_power_state(&console, names[0], PowerState::Off, &spec),
        wait_for_power_state(&console, names[1], PowerState::Off, &spec),
    );
    assert_eq!(first.unwrap().value.power_state, PowerState::Off);
    assert_eq!(second.unwrap().value.power_state, PowerState::Off);
}

#[tokio::test(start_paused = true)]
async fn test_power_wait_times_out_without_action() {
    let (console, name) = console_with_vm(PowerState::On).await;
    let spec = WaitSpec::from_secs(100, 20).with_message("VM power state");
    let result = wait_for_power_state(&console, &name, PowerState::Off, &spec).await;
    crate::assert_timed_out!(result, 6);
}

#[tokio::test(start_paused = true)]
async fn test_power_wait_on_missing_vm() {
    let console = seeded_console().await;
    let spec = acceptance_config().waits.power_state;
    let err = wait_for_power_state(&console, "ghost", PowerState::On, &spec)
        .await
        .unwrap_err();
    assert!(matches!(
        err.into_operation_error(),
        Some(ConsoleError::NotFound { .. })
    ));
}
