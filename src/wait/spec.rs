//! Immutable configuration for a single wait.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

use crate::error::{ConsoleError, ConsoleResult};

/// Default maximum duration of a wait when none is given.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// Default delay between attempts when none is given.
pub const DEFAULT_DELAY: Duration = Duration::from_secs(1);

/// Shortest pause between two attempts. A zero delay busy-polls at this
/// interval, which also keeps a virtual clock moving toward the deadline.
pub const MIN_PAUSE: Duration = Duration::from_millis(1);

/// Configuration for one wait operation.
///
/// A `WaitSpec` describes *how long* and *how often* to poll; the operation
/// being polled and the optional refresh hook are bound when the wait is run
/// (see [`Waiter`](super::Waiter) and [`AsyncWaiter`](super::AsyncWaiter)).
/// The same spec can be reused for any number of waits since it carries no
/// per-wait state.
///
/// Durations serialize as human-readable strings, so a config file can say:
///
/// ```json
/// { "timeout": "23m 20s", "delay": "20s", "message": "service request" }
/// ```
///
/// # Examples
///
/// ```rust
/// use console_acceptance::wait::WaitSpec;
/// use std::time::Duration;
///
/// let spec = WaitSpec::new(Duration::from_secs(1400), Duration::from_secs(20))
///     .with_message("provision request for my-item");
/// assert_eq!(spec.max_attempts(), Some(71));
///
/// let rest = WaitSpec::parse("15m", "5s").unwrap();
/// assert_eq!(rest.timeout(), Duration::from_secs(900));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaitSpec {
    #[serde(with = "humantime_serde")]
    timeout: Duration,
    #[serde(with = "humantime_serde")]
    delay: Duration,
    #[serde(default = "default_message")]
    message: String,
    /// Treat operation errors as "not yet" instead of failing the wait.
    #[serde(default)]
    handle_errors: bool,
}

fn default_message() -> String {
    "condition".to_string()
}

impl WaitSpec {
    /// Create a spec with the given maximum duration and inter-attempt delay.
    pub fn new(timeout: Duration, delay: Duration) -> Self {
        Self {
            timeout,
            delay,
            message: default_message(),
            handle_errors: false,
        }
    }

    /// Create a spec from human-readable durations such as `"15m"` or `"1h 30s"`.
    pub fn parse(timeout: &str, delay: &str) -> ConsoleResult<Self> {
        let timeout = humantime::parse_duration(timeout).map_err(|e| {
            ConsoleError::config(format!("invalid wait timeout '{}': {}", timeout, e))
        })?;
        let delay = humantime::parse_duration(delay)
            .map_err(|e| ConsoleError::config(format!("invalid wait delay '{}': {}", delay, e)))?;
        Ok(Self::new(timeout, delay))
    }

    /// Shorthand for whole-second specs.
    pub fn from_secs(timeout: u64, delay: u64) -> Self {
        Self::new(Duration::from_secs(timeout), Duration::from_secs(delay))
    }

    /// Describe what is being waited for; used in log lines and errors.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Keep polling when the operation returns an error.
    ///
    /// The last error is reported in the timeout if the wait never succeeds.
    pub fn handling_errors(mut self) -> Self {
        self.handle_errors = true;
        self
    }

    /// Maximum total duration of the wait.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Delay between attempts.
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Description of the awaited condition.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Whether operation errors are retried.
    pub fn handles_errors(&self) -> bool {
        self.handle_errors
    }

    /// Upper bound on attempts when the operation itself takes no time:
    /// `floor(timeout / delay) + 1`.
    ///
    /// Returns `None` for a zero delay with a non-zero timeout, where the
    /// waiter busy-polls every [`MIN_PAUSE`] and the count depends mostly on
    /// how long each attempt takes.
    pub fn max_attempts(&self) -> Option<u64> {
        if self.timeout.is_zero() {
            return Some(1);
        }
        if self.delay.is_zero() {
            return None;
        }
        let attempts = self.timeout.as_nanos() / self.delay.as_nanos() + 1;
        Some(u64::try_from(attempts).unwrap_or(u64::MAX))
    }

    /// Decide whether to sleep for another attempt after `elapsed`.
    ///
    /// A zero timeout never sleeps. Otherwise the waiter keeps going until
    /// the deadline has passed; whether the next attempt still runs is
    /// decided by [`is_expired`](Self::is_expired) after the sleep.
    pub(crate) fn keeps_waiting(&self, elapsed: Duration) -> bool {
        !self.timeout.is_zero() && !self.is_expired(elapsed)
    }

    /// How long to sleep before the next attempt: the delay, but never less
    /// than [`MIN_PAUSE`].
    pub(crate) fn pause(&self) -> Duration {
        self.delay.max(MIN_PAUSE)
    }

    /// Whether the deadline has already passed.
    pub(crate) fn is_expired(&self, elapsed: Duration) -> bool {
        elapsed > self.timeout
    }
}

impl Default for WaitSpec {
    fn default() -> Self {
        Self::new(DEFAULT_TIMEOUT, DEFAULT_DELAY)
    }
}

impl fmt::Display for WaitSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (timeout {}, every {})",
            self.message,
            humantime::format_duration(self.timeout),
            humantime::format_duration(self.delay)
        )
    }
}
