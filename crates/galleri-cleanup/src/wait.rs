// Bounded polling for asynchronous deletes
//
// Deletes in Backup, EKS and friends return before the resource is gone. A
// wait polls a condition at a fixed interval and gives up with a Timeout
// after a fixed number of checks.

use std::future::Future;
use std::time::{Duration, Instant};

use crate::error::{CleanupError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitPolicy {
    pub interval: Duration,
    pub max_attempts: u32,
}

impl WaitPolicy {
    pub fn new(interval: Duration, max_attempts: u32) -> Self {
        Self {
            interval,
            max_attempts: max_attempts.max(1),
        }
    }
}

impl Default for WaitPolicy {
    fn default() -> Self {
        Self::new(Duration::from_secs(10), 90)
    }
}

/// Poll `done` until it reports true.
///
/// The first check runs immediately; there is no sleep after the last one.
/// Errors from `done` end the wait at once.
pub async fn wait_until<F, Fut>(policy: WaitPolicy, what: &str, mut done: F) -> Result<()>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<bool>>,
{
    let started = Instant::now();

    for attempt in 1..=policy.max_attempts {
        if done().await? {
            tracing::debug!(what, attempt, "Wait condition met");
            return Ok(());
        }

        if attempt < policy.max_attempts {
            tracing::info!(
                what,
                attempt,
                max_attempts = policy.max_attempts,
                "Still waiting"
            );
            tokio::time::sleep(policy.interval).await;
        }
    }

    Err(CleanupError::Timeout {
        what: what.to_string(),
        attempts: policy.max_attempts,
        waited: started.elapsed(),
    })
}
