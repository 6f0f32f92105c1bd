//! Poll interval policy

use crate::types::BackoffType;
use std::time::Duration;

/// How long to sleep between status checks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    /// Interval after the first check
    pub interval: Duration,
    /// How the interval grows with each check
    pub backoff: BackoffType,
    /// Upper bound for the interval
    pub max_interval: Duration,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(1),
            backoff: BackoffType::Constant,
            max_interval: Duration::from_secs(60),
        }
    }
}

impl PollPolicy {
    /// Poll on a fixed interval
    pub fn fixed(interval: Duration) -> Self {
        Self {
            interval,
            backoff: BackoffType::Constant,
            max_interval: interval,
        }
    }

    /// Create a new policy builder
    pub fn builder() -> PollPolicyBuilder {
        PollPolicyBuilder::default()
    }

    /// Delay after the given zero-based check
    pub fn delay(&self, attempt: u32) -> Duration {
        let delay = match self.backoff {
            BackoffType::Constant => Some(self.interval),
            BackoffType::Linear => self.interval.checked_mul(attempt.saturating_add(1)),
            BackoffType::Exponential => {
                let factor = 2u32.saturating_pow(attempt);
                self.interval.checked_mul(factor)
            }
        };

        delay.map_or(self.max_interval, |d| d.min(self.max_interval))
    }
}

/// Builder for poll policies
#[derive(Default)]
pub struct PollPolicyBuilder {
    policy: PollPolicy,
}

impl PollPolicyBuilder {
    /// Set the base interval
    pub fn interval(mut self, interval: Duration) -> Self {
        self.policy.interval = interval;
        self
    }

    /// Set how the interval grows
    pub fn backoff(mut self, backoff: BackoffType) -> Self {
        self.policy.backoff = backoff;
        self
    }

    /// Cap the interval
    pub fn max_interval(mut self, max: Duration) -> Self {
        self.policy.max_interval = max;
        self
    }

    /// Build the policy
    pub fn build(self) -> PollPolicy {
        self.policy
    }
}
