//! Async completion waiter on the tokio timer.
//!
//! Same loop as [`Waiter`](super::Waiter), but the operation and refresh hook
//! are async and the delay is a `tokio::time::sleep`. The wait is still
//! strictly sequential: one attempt at a time, no work in between. Measuring
//! with `tokio::time::Instant` lets tests run multi-minute waits instantly
//! under a paused runtime.

use std::fmt;
use std::future::Future;
use tokio::time::Instant;

use super::attempts::{Attempts, WaitResult};
use super::outcome::WaitError;
use super::poll::{PollResult, Truthy};
use super::spec::WaitSpec;
use super::waiter::NoRefresh;

/// Async side effect run before every retry.
///
/// Implemented for [`NoRefresh`] and for any `AsyncFnMut() -> Result<(), E>`,
/// which includes ordinary closures returning a future.
pub trait AsyncRefreshHook<E> {
    fn refresh(&mut self) -> impl Future<Output = Result<(), E>>;
}

impl<E> AsyncRefreshHook<E> for NoRefresh {
    async fn refresh(&mut self) -> Result<(), E> {
        Ok(())
    }
}

impl<F, E> AsyncRefreshHook<E> for F
where
    F: AsyncFnMut() -> Result<(), E>,
{
    async fn refresh(&mut self) -> Result<(), E> {
        (*self)().await
    }
}

/// Async counterpart of [`Waiter`](super::Waiter).
///
/// ```rust
/// use console_acceptance::wait::{AsyncWaiter, WaitSpec};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let spec = WaitSpec::from_secs(0, 0);
/// let outcome = AsyncWaiter::new(&spec)
///     .until_truthy(async || Ok::<_, std::convert::Infallible>(vec![1, 2]))
///     .await
///     .unwrap();
/// assert_eq!(outcome.value, vec![1, 2]);
/// # }
/// ```
pub struct AsyncWaiter<'s, R = NoRefresh> {
    spec: &'s WaitSpec,
    refresh: R,
}

impl<'s> AsyncWaiter<'s> {
    pub fn new(spec: &'s WaitSpec) -> Self {
        Self {
            spec,
            refresh: NoRefresh,
        }
    }
}

impl<'s, R> AsyncWaiter<'s, R> {
    /// Run `hook` before every retry.
    pub fn refresh<R2>(self, hook: R2) -> AsyncWaiter<'s, R2> {
        AsyncWaiter {
            spec: self.spec,
            refresh: hook,
        }
    }

    /// Wait on an operation that classifies its own result, with pending
    /// observations of type `P`.
    pub async fn poll<T, P, E, Op>(mut self, mut op: Op) -> WaitResult<T, E, P>
    where
        Op: AsyncFnMut() -> Result<PollResult<T, P>, E>,
        R: AsyncRefreshHook<E>,
        E: fmt::Display,
    {
        let spec = self.spec;
        let start = Instant::now();
        let mut attempts = Attempts::new(spec);

        loop {
            attempts.begin(start.elapsed());
            let result = op().await;
            let elapsed = start.elapsed();
            if let Some(done) = attempts.record(result, elapsed) {
                return done;
            }
            if !spec.keeps_waiting(elapsed) {
                return Err(attempts.timed_out(elapsed));
            }

            tokio::time::sleep(spec.pause()).await;
            let elapsed = start.elapsed();
            if spec.is_expired(elapsed) {
                return Err(attempts.timed_out(elapsed));
            }
            self.refresh.refresh().await.map_err(WaitError::Operation)?;
        }
    }

    /// Wait until `is_done` accepts the operation's value.
    pub async fn until<T, E, Op, P>(self, mut op: Op, is_done: P) -> WaitResult<T, E>
    where
        Op: AsyncFnMut() -> Result<T, E>,
        P: Fn(&T) -> bool,
        R: AsyncRefreshHook<E>,
        E: fmt::Display,
    {
        self.poll(async || {
            op().await
                .map(|value| PollResult::from_predicate(value, &is_done))
        })
        .await
    }

    /// Wait until the operation's value is [`Truthy`].
    pub async fn until_truthy<T, E, Op>(self, mut op: Op) -> WaitResult<T, E>
    where
        T: Truthy,
        Op: AsyncFnMut() -> Result<T, E>,
        R: AsyncRefreshHook<E>,
        E: fmt::Display,
    {
        self.poll(async || op().await.map(PollResult::from_truthy))
            .await
    }
}
