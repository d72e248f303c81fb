//! Sliding-window rate limiter over a shared counter store

use chrono::Duration as ChronoDuration;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;
use tracing::warn;

use gk_shared::{RateLimitConfig, TierLimit};

use crate::domain::{Decision, Identity, Tier};
use crate::errors::StoreError;
use crate::services::clock::{Clock, SystemClock};
use crate::stores::CounterStore;

/// Outcome of the store-access step of a single check
///
/// A store fault is an expected, designed-for outcome, so it is a
/// variant here rather than an error propagated to the caller.
enum StoreProbe {
    /// Both bucket round trips completed
    Reached { current: u64, previous: u64 },
    /// Store error or timeout; enforcement degrades to fail-open
    Unreachable,
}

/// Multi-tier request rate limiter
///
/// Approximates a true sliding window with a two-bucket counter blend:
/// each check atomically increments the current fixed bucket and reads
/// the previous one, weighting the previous count by how much of that
/// bucket still overlaps the trailing window. Counters live in the
/// shared store under `ratelimit:{tier}:{identity}:{bucket}`.
///
/// `check` never returns an error and never blocks beyond the
/// configured store timeout: when the store is unreachable the limiter
/// admits the request with a sentinel decision instead.
pub struct TieredRateLimiter {
    store: Arc<dyn CounterStore>,
    clock: Arc<dyn Clock>,
    config: RateLimitConfig,
}

impl TieredRateLimiter {
    /// Create a new limiter over `store` using the system clock
    pub fn new(store: Arc<dyn CounterStore>, config: RateLimitConfig) -> Self {
        Self::with_clock(store, config, Arc::new(SystemClock::new()))
    }

    /// Create a new limiter with an injected clock
    pub fn with_clock(
        store: Arc<dyn CounterStore>,
        config: RateLimitConfig,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            store,
            clock,
            config,
        }
    }

    /// The configured window and ceiling for `tier`
    pub fn limit_for(&self, tier: Tier) -> TierLimit {
        match tier {
            Tier::Public => self.config.public,
            Tier::Api => self.config.api,
            Tier::Auth => self.config.auth,
            Tier::Upload => self.config.upload,
        }
    }

    /// Check whether `identity` may issue one more request under `tier`
    ///
    /// Single-attempt per invocation: no retries against the store, so
    /// a degraded store adds at most `store_timeout_ms` of latency
    /// before the check fails open.
    pub async fn check(&self, identity: &Identity, tier: Tier) -> Decision {
        let limit = self.limit_for(tier);
        let now = self.clock.now();

        if !self.config.enabled {
            return Decision::fail_open(now, limit.window_seconds);
        }

        let window = limit.window_seconds.max(1) as i64;
        let now_secs = now.timestamp();
        let bucket = now_secs.div_euclid(window);
        let elapsed = now_secs.rem_euclid(window);

        let current_key = bucket_key(tier, identity, bucket);
        let previous_key = bucket_key(tier, identity, bucket - 1);
        // The previous bucket must survive one full window after it
        // closes, so both buckets carry a 2x TTL.
        let ttl = Duration::from_secs((window as u64) * 2);

        match self.probe(&current_key, &previous_key, ttl).await {
            StoreProbe::Reached { current, previous } => {
                let carried =
                    previous.saturating_mul((window - elapsed) as u64) / window as u64;
                let count = carried.saturating_add(current);
                let max = u64::from(limit.max_requests);

                Decision {
                    allowed: count <= max,
                    limit: limit.max_requests,
                    remaining: max.saturating_sub(count) as u32,
                    reset_at: now + ChronoDuration::seconds(window - elapsed),
                }
            }
            StoreProbe::Unreachable => Decision::fail_open(now, limit.window_seconds),
        }
    }

    /// Run both store round trips under one bounded timeout
    async fn probe(&self, current_key: &str, previous_key: &str, ttl: Duration) -> StoreProbe {
        let budget = Duration::from_millis(self.config.store_timeout_ms);
        let round_trips = async {
            let current = self.store.increment(current_key, ttl).await?;
            let previous = self.store.read(previous_key).await?;
            Ok::<_, StoreError>((current, previous))
        };

        match timeout(budget, round_trips).await {
            Ok(Ok((current, previous))) => StoreProbe::Reached { current, previous },
            Ok(Err(error)) => {
                warn!(
                    error = %error,
                    key = current_key,
                    "counter store unreachable, admitting without enforcement"
                );
                StoreProbe::Unreachable
            }
            Err(_) => {
                warn!(
                    timeout_ms = self.config.store_timeout_ms,
                    key = current_key,
                    "counter store check timed out, admitting without enforcement"
                );
                StoreProbe::Unreachable
            }
        }
    }
}

/// Store key for one `(tier, identity)` bucket
fn bucket_key(tier: Tier, identity: &Identity, bucket: i64) -> String {
    format!("ratelimit:{}:{}:{}", tier, identity, bucket)
}
