//! Blocking completion waiter.

use std::fmt;

use super::attempts::{Attempts, WaitResult};
use super::clock::{Clock, SystemClock};
use super::outcome::WaitError;
use super::poll::{PollResult, Truthy};
use super::spec::WaitSpec;

/// Side effect run before every retry to force fresh state.
///
/// Implemented for [`NoRefresh`] and for any `FnMut() -> Result<(), E>`.
/// An error from the hook ends the wait as a hard failure.
pub trait RefreshHook<E> {
    fn refresh(&mut self) -> Result<(), E>;
}

/// The absent refresh hook.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoRefresh;

impl<E> RefreshHook<E> for NoRefresh {
    fn refresh(&mut self) -> Result<(), E> {
        Ok(())
    }
}

impl<F, E> RefreshHook<E> for F
where
    F: FnMut() -> Result<(), E>,
{
    fn refresh(&mut self) -> Result<(), E> {
        self()
    }
}

/// Polls an operation on the calling thread until it succeeds, fails, or the
/// spec's deadline passes.
///
/// The first attempt runs immediately. Every later attempt is preceded by a
/// sleep of `spec.delay()` and then the refresh hook. The waiter keeps
/// sleeping until the deadline has passed and only retries while it has not,
/// so an operation that never succeeds is attempted
/// `floor(timeout / delay) + 1` times and the timeout is reported no earlier
/// than `spec.timeout()`.
///
/// # Examples
///
/// ```rust
/// use console_acceptance::wait::{ManualClock, WaitSpec, Waiter};
///
/// let spec = WaitSpec::from_secs(10, 1).with_message("status done");
/// let clock = ManualClock::new();
/// let mut calls = 0;
/// let mut reloads = 0;
///
/// let outcome = Waiter::new(&spec)
///     .with_clock(clock.clone())
///     .refresh(|| {
///         reloads += 1;
///         Ok::<(), std::convert::Infallible>(())
///     })
///     .until_truthy(|| {
///         calls += 1;
///         Ok::<_, std::convert::Infallible>((calls == 3).then_some("done"))
///     })
///     .unwrap();
///
/// assert_eq!(outcome.value, Some("done"));
/// assert_eq!(outcome.attempts, 3);
/// assert_eq!(reloads, 2);
/// ```
pub struct Waiter<'s, C = SystemClock, R = NoRefresh> {
    spec: &'s WaitSpec,
    clock: C,
    refresh: R,
}

impl<'s> Waiter<'s> {
    /// Waiter on the wall clock without a refresh hook.
    pub fn new(spec: &'s WaitSpec) -> Self {
        Self {
            spec,
            clock: SystemClock::new(),
            refresh: NoRefresh,
        }
    }
}

impl<'s, C: Clock, R> Waiter<'s, C, R> {
    /// Measure and sleep with a different clock.
    pub fn with_clock<C2: Clock>(self, clock: C2) -> Waiter<'s, C2, R> {
        Waiter {
            spec: self.spec,
            clock,
            refresh: self.refresh,
        }
    }

    /// Run `hook` before every retry.
    pub fn refresh<R2>(self, hook: R2) -> Waiter<'s, C, R2> {
        Waiter {
            spec: self.spec,
            clock: self.clock,
            refresh: hook,
        }
    }

    /// Wait on an operation that classifies its own result.
    ///
    /// Pending observations may have a different type `P` from the final
    /// value; a timeout then reports the last `P`.
    pub fn poll<T, P, E, Op>(mut self, mut op: Op) -> WaitResult<T, E, P>
    where
        Op: FnMut() -> Result<PollResult<T, P>, E>,
        R: RefreshHook<E>,
        E: fmt::Display,
    {
        let spec = self.spec;
        let start = self.clock.now();
        let mut attempts = Attempts::new(spec);

        loop {
            attempts.begin(self.clock.now().saturating_sub(start));
            let result = op();
            let elapsed = self.clock.now().saturating_sub(start);
            if let Some(done) = attempts.record(result, elapsed) {
                return done;
            }
            if !spec.keeps_waiting(elapsed) {
                return Err(attempts.timed_out(elapsed));
            }

            self.clock.sleep(spec.pause());
            let elapsed = self.clock.now().saturating_sub(start);
            if spec.is_expired(elapsed) {
                return Err(attempts.timed_out(elapsed));
            }
            self.refresh.refresh().map_err(WaitError::Operation)?;
        }
    }

    /// Wait until `is_done` accepts the operation's value.
    pub fn until<T, E, Op, P>(self, mut op: Op, is_done: P) -> WaitResult<T, E>
    where
        Op: FnMut() -> Result<T, E>,
        P: Fn(&T) -> bool,
        R: RefreshHook<E>,
        E: fmt::Display,
    {
        self.poll(|| op().map(|value| PollResult::from_predicate(value, &is_done)))
    }

    /// Wait until the operation's value is [`Truthy`].
    pub fn until_truthy<T, E, Op>(self, mut op: Op) -> WaitResult<T, E>
    where
        T: Truthy,
        Op: FnMut() -> Result<T, E>,
        R: RefreshHook<E>,
        E: fmt::Display,
    {
        self.poll(|| op().map(PollResult::from_truthy))
    }
}
