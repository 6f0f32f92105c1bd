//! Waiting for a resource to reach a status

use super::policy::PollPolicy;
use super::poll::wait_for_with;
use crate::error::{Error, Result};
use std::fmt;
use std::future::Future;
use std::str::FromStr;
use std::time::Duration;
use tracing::debug;

/// The condition a status wait is looking for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WaitTarget {
    /// The resource reports exactly this status
    Status(String),
    /// The resource no longer exists (the service answers 404)
    Gone,
}

impl WaitTarget {
    /// Wait for a status
    pub fn status(status: impl Into<String>) -> Self {
        Self::Status(status.into())
    }
}

impl FromStr for WaitTarget {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.is_empty() {
            return Err(Error::invalid_value("status", "target status is empty"));
        }
        Ok(match s.to_ascii_uppercase().as_str() {
            "DELETE_COMPLETE" | "DELETED" | "GONE" => Self::Gone,
            _ => Self::Status(s.to_string()),
        })
    }
}

impl fmt::Display for WaitTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Status(status) => f.write_str(status),
            Self::Gone => f.write_str("DELETE_COMPLETE"),
        }
    }
}

/// One observation of a resource's status
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Observation {
    /// Current status, e.g. `PENDING_CREATE`
    pub status: String,
    /// Why the resource is in that status, if the service says
    pub reason: Option<String>,
}

impl Observation {
    /// Observation without a reason
    pub fn new(status: impl Into<String>) -> Self {
        Self {
            status: status.into(),
            reason: None,
        }
    }

    /// Attach a status reason
    #[must_use]
    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }
}

/// Wait until `fetch` observes `target`.
///
/// - a 404 from `fetch` while waiting for [`WaitTarget::Gone`] is success
/// - any other error from `fetch` is returned unchanged
/// - a status containing `FAILED` ends the wait with [`Error::ResourceFailed`]
/// - any other status keeps polling
pub async fn wait_for_status<F, Fut>(
    kind: &str,
    id: &str,
    target: &WaitTarget,
    timeout: Duration,
    policy: &PollPolicy,
    mut fetch: F,
) -> Result<()>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<Observation>>,
{
    wait_for_with(policy, timeout, || {
        let observed = fetch();
        async move {
            let observation = match observed.await {
                Ok(observation) => observation,
                Err(e) if e.is_not_found() && *target == WaitTarget::Gone => {
                    debug!("{} {} is gone", kind, id);
                    return Ok(true);
                }
                Err(e) => return Err(e),
            };

            debug!("{} {} status is {}", kind, id, observation.status);

            if let WaitTarget::Status(wanted) = target {
                if observation.status == *wanted {
                    return Ok(true);
                }
            }

            if observation.status.contains("FAILED") {
                return Err(Error::resource_failed(
                    kind,
                    id,
                    observation.status,
                    observation.reason.unwrap_or_default(),
                ));
            }

            Ok(false)
        }
    })
    .await
}
