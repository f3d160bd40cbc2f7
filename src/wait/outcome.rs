//! Terminal results of a wait.

use std::fmt;
use std::time::Duration;

/// Successful end of a wait.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WaitOutcome<T> {
    /// The success-shaped value produced by the final attempt.
    pub value: T,
    /// Time from the first attempt until success.
    pub elapsed: Duration,
    /// Number of attempts made, including the successful one.
    pub attempts: u32,
}

impl<T> WaitOutcome<T> {
    pub fn into_value(self) -> T {
        self.value
    }

    /// Transform the value, keeping timing and attempt count.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> WaitOutcome<U> {
        WaitOutcome {
            value: f(self.value),
            elapsed: self.elapsed,
            attempts: self.attempts,
        }
    }
}

/// Why a wait did not produce a success-shaped value.
///
/// Exactly one of these, or a [`WaitOutcome`], ends every wait.
#[derive(Debug)]
pub enum WaitError<T, E> {
    /// No success before the deadline.
    TimedOut {
        message: String,
        elapsed: Duration,
        attempts: u32,
        /// Last non-success value observed, if any attempt returned one.
        last: Option<T>,
        /// Last swallowed operation error when errors are being retried.
        last_error: Option<String>,
    },
    /// The operation reported an explicit failure.
    Failed {
        message: String,
        reason: String,
        attempts: u32,
    },
    /// The operation or refresh hook returned an error; carried as-is.
    Operation(E),
}

impl<T, E> WaitError<T, E> {
    pub fn is_timeout(&self) -> bool {
        matches!(self, WaitError::TimedOut { .. })
    }

    /// The last pending value, for timeouts that observed one.
    pub fn last(&self) -> Option<&T> {
        match self {
            WaitError::TimedOut { last, .. } => last.as_ref(),
            _ => None,
        }
    }

    /// Unwrap the original operation error, if that is what ended the wait.
    pub fn into_operation_error(self) -> Option<E> {
        match self {
            WaitError::Operation(e) => Some(e),
            _ => None,
        }
    }

    /// Number of attempts made before giving up, when known.
    pub fn attempts(&self) -> Option<u32> {
        match self {
            WaitError::TimedOut { attempts, .. } | WaitError::Failed { attempts, .. } => {
                Some(*attempts)
            }
            WaitError::Operation(_) => None,
        }
    }
}

impl<T: fmt::Debug, E: fmt::Display> fmt::Display for WaitError<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WaitError::TimedOut {
                message,
                elapsed,
                attempts,
                last,
                last_error,
            } => {
                write!(
                    f,
                    "Timed out after {:.1}s waiting for {} ({} attempts); last observed: {:?}",
                    elapsed.as_secs_f64(),
                    message,
                    attempts,
                    last
                )?;
                if let Some(err) = last_error {
                    write!(f, "; last error: {}", err)?;
                }
                Ok(())
            }
            WaitError::Failed {
                message,
                reason,
                attempts,
            } => write!(
                f,
                "Failed waiting for {} after {} attempts: {}",
                message, attempts, reason
            ),
            WaitError::Operation(e) => write!(f, "{}", e),
        }
    }
}

impl<T, E> std::error::Error for WaitError<T, E>
where
    T: fmt::Debug,
    E: std::error::Error + 'static,
{
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            WaitError::Operation(e) => e.source(),
            _ => None,
        }
    }
}
