//! Error types for cleanup runs.

use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CleanupError {
    /// A call to the cloud API failed. Cleanup stops at the first one.
    #[error("{operation} failed for '{resource}': {message}")]
    Api {
        operation: &'static str,
        resource: String,
        message: String,
    },

    /// A resource was still present after the last allowed poll.
    #[error("Timed out waiting for {what} after {attempts} attempts ({waited:?})")]
    Timeout {
        what: String,
        attempts: u32,
        waited: Duration,
    },

    /// Refused to match against a pattern that selects everything.
    #[error("Name pattern must not be empty")]
    EmptyPattern,
}

impl CleanupError {
    pub fn api(operation: &'static str, resource: impl Into<String>, message: impl ToString) -> Self {
        Self::Api {
            operation,
            resource: resource.into(),
            message: message.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CleanupError>;
