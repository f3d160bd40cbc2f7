//! Common test utilities for the console acceptance suite.
//!
//! Shared builders, fixtures and assertion macros used across the
//! integration scenarios.

pub mod builders;
pub mod fixtures;

use std::sync::Once;

static LOGGING: Once = Once::new();

/// Route `log` output through the test harness; `RUST_LOG` picks the level.
pub fn init_logging() {
    LOGGING.call_once(|| {
        let _ = env_logger::builder().is_test(true).try_init();
    });
}

/// Assert that a console call failed with a form flash message.
#[macro_export]
macro_rules! assert_flash {
    ($result:expr, $expected:expr) => {
        match $result {
            Err(err) => assert_eq!(
                err.flash_message().as_deref(),
                Some($expected),
                "unexpected error: {}",
                err
            ),
            Ok(_) => panic!("Expected flash message '{}', but the form was saved", $expected),
        }
    };
}

/// Custom assertion macro for specific error messages
#[macro_export]
macro_rules! assert_error_message_contains {
    ($result:expr, $substring:expr) => {
        match $result {
            Err(err) => assert!(
                err.to_string().contains($substring),
                "Error message '{}' does not contain '{}'",
                err,
                $substring
            ),
            Ok(_) => panic!("Expected error containing '{}', but the call succeeded", $substring),
        }
    };
}

/// Assert that a wait ran out of time after exactly `$attempts` attempts.
#[macro_export]
macro_rules! assert_timed_out {
    ($result:expr, $attempts:expr) => {
        match $result {
            Err(console_acceptance::WaitError::TimedOut { attempts, .. }) => {
                assert_eq!(attempts, $attempts, "wrong attempt count at timeout")
            }
            Err(other) => panic!("Expected a timeout, got {}", other),
            Ok(outcome) => panic!("Expected a timeout, got {:?}", outcome.value),
        }
    };
}
