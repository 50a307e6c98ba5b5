//! In-memory rate limiter using governor crate.

use std::num::NonZeroU32;
use std::time::Duration;

use async_trait::async_trait;
use governor::clock::{Clock, DefaultClock};
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter as GovernorRateLimiter};

use ewaste_core::ports::{RateLimitError, RateLimitResult, RateLimiter};

type DirectRateLimiter = GovernorRateLimiter<NotKeyed, InMemoryState, DefaultClock>;

/// Rate limiter configuration.
#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    /// Maximum calls per second. Zero is treated as one.
    pub max_per_second: u32,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self { max_per_second: 1 }
    }
}

impl RateLimitConfig {
    pub fn from_env() -> Self {
        Self {
            max_per_second: std::env::var("EWASTE_GEOCODER_MAX_PER_SEC")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(1),
        }
    }
}

/// Process-wide GCRA limiter. Keys are ignored.
pub struct InMemoryRateLimiter {
    limiter: DirectRateLimiter,
}

impl InMemoryRateLimiter {
    pub fn new(config: RateLimitConfig) -> Self {
        let per_second = NonZeroU32::new(config.max_per_second).unwrap_or(NonZeroU32::MIN);
        Self {
            limiter: DirectRateLimiter::direct(Quota::per_second(per_second)),
        }
    }
}

#[async_trait]
impl RateLimiter for InMemoryRateLimiter {
    async fn check(&self, _key: &str) -> Result<RateLimitResult, RateLimitError> {
        match self.limiter.check() {
            Ok(()) => Ok(RateLimitResult {
                allowed: true,
                reset_after: Duration::ZERO,
            }),
            Err(not_until) => Ok(RateLimitResult {
                allowed: false,
                reset_after: not_until.wait_time_from(self.limiter.clock().now()),
            }),
        }
    }
}
