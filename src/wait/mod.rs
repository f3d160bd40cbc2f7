//! Completion waiting for long-running console workflows.
//!
//! Provisioning requests, service orders and VM power changes run for
//! minutes on the backend. Tests block on them by polling: evaluate an
//! operation, and if it is not done yet, refresh the observed state, sleep and
//! try again until a deadline passes.
//!
//! # Components
//!
//! - [`WaitSpec`] - timeout, delay and description for one wait
//! - [`PollResult`] - outcome of a single attempt (`Pending`, `Success`, `Failure`)
//! - [`Truthy`] - the loose "present and not empty" success test
//! - [`Waiter`] - blocking waiter over a [`Clock`]
//! - [`AsyncWaiter`] - the same loop on the tokio timer
//! - [`WaitOutcome`] / [`WaitError`] - the single terminal result of a wait
//!
//! # Semantics
//!
//! - The first attempt runs immediately; a first-try success never sleeps or
//!   refreshes.
//! - Before each retry the waiter sleeps for the delay, then runs the refresh
//!   hook.
//! - The waiter sleeps again while `elapsed <= timeout` and retries only if
//!   the deadline has not passed after the sleep, so a timeout is never
//!   reported before the deadline; a zero timeout means exactly one attempt.
//! - Operation errors end the wait at once unless the [`WaitSpec`] was built with
//!   [`WaitSpec::handling_errors`].
//!
//! # Example
//!
//! ```rust
//! use console_acceptance::wait::{WaitSpec, wait_for};
//!
//! let spec = WaitSpec::from_secs(0, 0).with_message("answer");
//! let outcome = wait_for(&spec, || Ok::<_, std::io::Error>(42u32)).unwrap();
//! assert_eq!(outcome.value, 42);
//! ```

mod async_waiter;
mod attempts;
mod clock;
mod outcome;
mod poll;
mod spec;
mod waiter;

pub use async_waiter::{AsyncRefreshHook, AsyncWaiter};
pub use clock::{Clock, ManualClock, SystemClock};
pub use outcome::{WaitError, WaitOutcome};
pub use poll::{PollResult, Truthy};
pub use spec::{DEFAULT_DELAY, DEFAULT_TIMEOUT, MIN_PAUSE, WaitSpec};
pub use waiter::{NoRefresh, RefreshHook, Waiter};

use std::fmt;

/// Block until `op` returns a [`Truthy`] value, on the wall clock.
pub fn wait_for<T, E, Op>(spec: &WaitSpec, op: Op) -> Result<WaitOutcome<T>, WaitError<T, E>>
where
    T: Truthy,
    Op: FnMut() -> Result<T, E>,
    E: fmt::Display,
{
    Waiter::new(spec).until_truthy(op)
}

/// Block until `op` returns a [`Truthy`] value, running `refresh` before
/// every retry.
pub fn wait_for_with_refresh<T, E, Op, R>(
    spec: &WaitSpec,
    op: Op,
    refresh: R,
) -> Result<WaitOutcome<T>, WaitError<T, E>>
where
    T: Truthy,
    Op: FnMut() -> Result<T, E>,
    R: FnMut() -> Result<(), E>,
    E: fmt::Display,
{
    Waiter::new(spec).refresh(refresh).until_truthy(op)
}

/// Async form of [`wait_for`].
pub async fn wait_for_async<T, E, Op>(
    spec: &WaitSpec,
    op: Op,
) -> Result<WaitOutcome<T>, WaitError<T, E>>
where
    T: Truthy,
    Op: AsyncFnMut() -> Result<T, E>,
    E: fmt::Display,
{
    AsyncWaiter::new(spec).until_truthy(op).await
}
