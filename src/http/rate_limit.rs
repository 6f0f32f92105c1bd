//! Client-side rate limiting
//!
//! Token bucket limiter over the governor crate. Off by default; clouds
//! that throttle aggressively can enable it from the `http.rate_limit`
//! section of `clouds.yaml`.

use crate::error::{Error, Result};
use governor::clock::DefaultClock;
use governor::middleware::NoOpMiddleware;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter as Governor};
use serde::{Deserialize, Serialize};
use std::num::NonZeroU32;
use std::sync::Arc;
use tracing::trace;

/// Configuration for rate limiting
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateLimiterConfig {
    /// Maximum number of requests per second
    pub requests_per_second: u32,
    /// Burst size (max tokens in bucket), defaults to `requests_per_second`
    #[serde(default)]
    pub burst_size: Option<u32>,
}

impl Default for RateLimiterConfig {
    fn default() -> Self {
        Self {
            requests_per_second: 10,
            burst_size: None,
        }
    }
}

impl RateLimiterConfig {
    /// Create a new rate limiter config
    pub fn new(requests_per_second: u32, burst_size: u32) -> Self {
        Self {
            requests_per_second,
            burst_size: Some(burst_size),
        }
    }

    /// Limit to N requests per second with an equal burst
    pub fn per_second(requests_per_second: u32) -> Self {
        Self {
            requests_per_second,
            burst_size: None,
        }
    }

    fn quota(&self) -> Result<Quota> {
        let rate = NonZeroU32::new(self.requests_per_second).ok_or_else(|| {
            Error::invalid_value("rate_limit.requests_per_second", "must be greater than zero")
        })?;
        let burst = match self.burst_size {
            Some(burst) => NonZeroU32::new(burst).ok_or_else(|| {
                Error::invalid_value("rate_limit.burst_size", "must be greater than zero")
            })?,
            None => rate,
        };
        Ok(Quota::per_second(rate).allow_burst(burst))
    }
}

/// Token bucket rate limiter
#[derive(Clone)]
pub struct RateLimiter {
    limiter: Arc<Governor<NotKeyed, InMemoryState, DefaultClock, NoOpMiddleware>>,
}

impl RateLimiter {
    /// Create a new rate limiter, rejecting zero rates
    pub fn new(config: &RateLimiterConfig) -> Result<Self> {
        Ok(Self {
            limiter: Arc::new(Governor::direct(config.quota()?)),
        })
    }

    /// Wait until a request may be sent
    pub async fn acquire(&self) {
        if self.limiter.check().is_ok() {
            return;
        }
        trace!("Rate limit reached, waiting for a permit");
        self.limiter.until_ready().await;
    }

    /// Try to take a permit without waiting
    pub fn try_acquire(&self) -> bool {
        self.limiter.check().is_ok()
    }
}

impl std::fmt::Debug for RateLimiter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RateLimiter").finish()
    }
}

#[cfg(test)]
mod rate_limit_tests {
    use super::*;

    #[test]
    fn test_burst_defaults_to_rate() {
        let config = RateLimiterConfig::per_second(5);
        assert_eq!(config.burst_size, None);
        let limiter = RateLimiter::new(&config).unwrap();
        for _ in 0..5 {
            assert!(limiter.try_acquire());
        }
        assert!(!limiter.try_acquire());
    }

    #[test]
    fn test_zero_rate_rejected() {
        let err = RateLimiter::new(&RateLimiterConfig::per_second(0)).unwrap_err();
        assert!(err.to_string().contains("requests_per_second"));

        let err = RateLimiter::new(&RateLimiterConfig::new(10, 0)).unwrap_err();
        assert!(err.to_string().contains("burst_size"));
    }

    #[test]
    fn test_config_from_yaml() {
        let config: RateLimiterConfig =
            serde_yaml::from_str("requests_per_second: 20\nburst_size: 4\n").unwrap();
        assert_eq!(config, RateLimiterConfig::new(20, 4));
    }

    #[tokio::test]
    async fn test_acquire_within_burst() {
        let limiter = RateLimiter::new(&RateLimiterConfig::new(100, 10)).unwrap();
        for _ in 0..10 {
            limiter.acquire().await;
        }
    }
}
