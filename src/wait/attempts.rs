//! Attempt bookkeeping shared by the blocking and async waiters.

use log::{debug, info, warn};
use std::fmt;
use std::time::Duration;

use super::outcome::{WaitError, WaitOutcome};
use super::poll::PollResult;
use super::spec::WaitSpec;

/// Result of a wait whose pending observations have type `P`.
pub(crate) type WaitResult<T, E, P = T> = Result<WaitOutcome<T>, WaitError<P, E>>;

/// Tracks attempts and the last non-success observation of one wait.
pub(crate) struct Attempts<'s, P> {
    spec: &'s WaitSpec,
    count: u32,
    last: Option<P>,
    last_error: Option<String>,
}

impl<'s, P> Attempts<'s, P> {
    pub(crate) fn new(spec: &'s WaitSpec) -> Self {
        Self {
            spec,
            count: 0,
            last: None,
            last_error: None,
        }
    }

    pub(crate) fn begin(&mut self, elapsed: Duration) {
        self.count = self.count.saturating_add(1);
        debug!(
            "Waiting for {}: attempt {} at {:.1}s",
            self.spec.message(),
            self.count,
            elapsed.as_secs_f64()
        );
    }

    /// Fold one attempt's result in; `Some` ends the wait.
    pub(crate) fn record<T, E: fmt::Display>(
        &mut self,
        result: Result<PollResult<T, P>, E>,
        elapsed: Duration,
    ) -> Option<WaitResult<T, E, P>> {
        match result {
            Ok(PollResult::Success(value)) => {
                info!(
                    "Finished waiting for {} after {:.1}s ({} attempts)",
                    self.spec.message(),
                    elapsed.as_secs_f64(),
                    self.count
                );
                Some(Ok(WaitOutcome {
                    value,
                    elapsed,
                    attempts: self.count,
                }))
            }
            Ok(PollResult::Failure(reason)) => {
                warn!(
                    "Gave up waiting for {} on attempt {}: {}",
                    self.spec.message(),
                    self.count,
                    reason
                );
                Some(Err(WaitError::Failed {
                    message: self.spec.message().to_string(),
                    reason,
                    attempts: self.count,
                }))
            }
            Ok(PollResult::Pending(value)) => {
                self.last = Some(value);
                None
            }
            Err(e) if self.spec.handles_errors() => {
                warn!(
                    "Ignoring error while waiting for {} (attempt {}): {}",
                    self.spec.message(),
                    self.count,
                    e
                );
                self.last_error = Some(e.to_string());
                None
            }
            Err(e) => Some(Err(WaitError::Operation(e))),
        }
    }

    pub(crate) fn timed_out<E>(self, elapsed: Duration) -> WaitError<P, E> {
        warn!(
            "Timed out waiting for {} after {:.1}s ({} attempts)",
            self.spec.message(),
            elapsed.as_secs_f64(),
            self.count
        );
        WaitError::TimedOut {
            message: self.spec.message().to_string(),
            elapsed,
            attempts: self.count,
            last: self.last,
            last_error: self.last_error,
        }
    }
}
