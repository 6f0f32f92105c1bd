//! Poll-until-condition loop

use super::policy::PollPolicy;
use crate::error::{Error, Result};
use std::future::Future;
use std::time::Duration;
use tokio::time::Instant;
use tracing::debug;

/// Poll `check` once per second until it returns `Ok(true)`.
///
/// See [`wait_for_with`].
pub async fn wait_for<F, Fut>(timeout: Duration, check: F) -> Result<()>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<bool>>,
{
    wait_for_with(&PollPolicy::default(), timeout, check).await
}

/// Poll `check` until it returns `Ok(true)`, an error, or `timeout` elapses.
///
/// The first check runs immediately. Errors from `check` are returned as-is
/// and never retried. No check is started once `timeout` has elapsed, and
/// the last sleep is shortened so the timeout is reported on time.
pub async fn wait_for_with<F, Fut>(policy: &PollPolicy, timeout: Duration, mut check: F) -> Result<()>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<bool>>,
{
    let start = Instant::now();
    let mut attempt: u32 = 0;

    loop {
        if check().await? {
            debug!("Condition met after {} checks", attempt + 1);
            return Ok(());
        }

        let elapsed = start.elapsed();
        if elapsed >= timeout {
            return Err(Error::PollTimeout { elapsed, timeout });
        }

        let delay = policy.delay(attempt).min(timeout - elapsed);
        debug!(
            "Condition not met (check {}), next check in {:?}",
            attempt + 1,
            delay
        );
        tokio::time::sleep(delay).await;
        attempt = attempt.saturating_add(1);

        let elapsed = start.elapsed();
        if elapsed >= timeout {
            return Err(Error::PollTimeout { elapsed, timeout });
        }
    }
}
