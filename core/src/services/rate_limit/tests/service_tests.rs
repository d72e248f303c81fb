//! Unit tests for TieredRateLimiter over the mock store

use chrono::{DateTime, Duration, Utc};
use std::sync::Arc;

use gk_shared::RateLimitConfig;

use crate::domain::{Identity, Tier, FAIL_OPEN_LIMIT};
use crate::services::clock::{Clock, MockClock};
use crate::services::rate_limit::TieredRateLimiter;
use crate::stores::MockCounterStore;

/// A window-aligned instant, so tests start at a bucket boundary
fn window_start() -> DateTime<Utc> {
    // 1_700_000_040 is divisible by the 60s default window
    DateTime::from_timestamp(1_700_000_040, 0).unwrap()
}

fn setup() -> (TieredRateLimiter, Arc<MockClock>, Arc<MockCounterStore>) {
    setup_with_config(RateLimitConfig::default())
}

fn setup_with_config(
    config: RateLimitConfig,
) -> (TieredRateLimiter, Arc<MockClock>, Arc<MockCounterStore>) {
    let clock = Arc::new(MockClock::new(window_start()));
    let store = Arc::new(MockCounterStore::new(clock.clone()));
    let limiter = TieredRateLimiter::with_clock(store.clone(), config, clock.clone());
    (limiter, clock, store)
}

#[tokio::test]
async fn test_requests_within_budget_are_allowed() {
    let (limiter, _, _) = setup();
    let identity = Identity::new("1.2.3.4");

    // Auth tier allows 5 per window
    for i in 1..=5u32 {
        let decision = limiter.check(&identity, Tier::Auth).await;
        assert!(decision.allowed, "request {} should be allowed", i);
        assert_eq!(decision.limit, 5);
        assert_eq!(decision.remaining, 5 - i);
    }
}

#[tokio::test]
async fn test_requests_beyond_budget_are_rejected() {
    let (limiter, _, _) = setup();
    let identity = Identity::new("1.2.3.4");

    for _ in 0..5 {
        assert!(limiter.check(&identity, Tier::Auth).await.allowed);
    }

    for i in 6..=8u32 {
        let decision = limiter.check(&identity, Tier::Auth).await;
        assert!(!decision.allowed, "request {} should be rejected", i);
        assert_eq!(decision.remaining, 0);
        assert_eq!(decision.limit, 5);
    }
}

#[tokio::test]
async fn test_remaining_is_monotonically_non_increasing() {
    let (limiter, _, _) = setup();
    let identity = Identity::new("1.2.3.4");

    let mut previous = u32::MAX;
    for _ in 0..40 {
        let decision = limiter.check(&identity, Tier::Api).await;
        assert!(decision.remaining <= previous);
        previous = decision.remaining;
    }
}

#[tokio::test]
async fn test_reset_at_is_strictly_in_the_future() {
    let (limiter, clock, _) = setup();
    let identity = Identity::new("1.2.3.4");

    // Mid-window as well as at the boundary
    for offset in [0, 1, 30, 59] {
        clock.set(window_start() + Duration::seconds(offset));
        let decision = limiter.check(&identity, Tier::Public).await;
        assert!(decision.reset_at > clock.now(), "offset {}", offset);
    }
}

#[tokio::test]
async fn test_budget_restored_after_trailing_window_drains() {
    let (limiter, clock, _) = setup();
    let identity = Identity::new("1.2.3.4");

    for _ in 0..5 {
        assert!(limiter.check(&identity, Tier::Auth).await.allowed);
    }
    let exhausted = limiter.check(&identity, Tier::Auth).await;
    assert!(!exhausted.allowed);

    // Two full windows past the exhaustion point: reset_at has elapsed
    // and the previous bucket no longer overlaps the trailing window.
    clock.advance(Duration::seconds(120));
    assert!(clock.now() > exhausted.reset_at);

    let decision = limiter.check(&identity, Tier::Auth).await;
    assert!(decision.allowed);
    assert_eq!(decision.remaining, 4);
}

#[tokio::test]
async fn test_previous_bucket_still_weighs_into_fresh_bucket() {
    let (limiter, clock, _) = setup();
    let identity = Identity::new("1.2.3.4");

    for _ in 0..5 {
        assert!(limiter.check(&identity, Tier::Auth).await.allowed);
    }

    // At the bucket boundary the trailing window still covers the whole
    // exhausted bucket, so the budget is not sharply reset.
    clock.advance(Duration::seconds(60));
    let decision = limiter.check(&identity, Tier::Auth).await;
    assert!(!decision.allowed);
    assert_eq!(decision.remaining, 0);
}

#[tokio::test]
async fn test_tier_budgets_are_isolated() {
    let (limiter, _, _) = setup();
    let identity = Identity::new("1.2.3.4");

    // Exhaust the auth tier for this identity
    for _ in 0..6 {
        limiter.check(&identity, Tier::Auth).await;
    }
    assert!(!limiter.check(&identity, Tier::Auth).await.allowed);

    // The api tier budget for the same identity is untouched
    let decision = limiter.check(&identity, Tier::Api).await;
    assert!(decision.allowed);
    assert_eq!(decision.remaining, 29);
}

#[tokio::test]
async fn test_identities_are_isolated() {
    let (limiter, _, _) = setup();
    let first = Identity::new("1.2.3.4");
    let second = Identity::new("5.6.7.8");

    for _ in 0..6 {
        limiter.check(&first, Tier::Auth).await;
    }
    assert!(!limiter.check(&first, Tier::Auth).await.allowed);

    let decision = limiter.check(&second, Tier::Auth).await;
    assert!(decision.allowed);
    assert_eq!(decision.remaining, 4);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_checks_do_not_lose_updates() {
    let (limiter, _, _) = setup();
    let limiter = Arc::new(limiter);
    let identity = Identity::new("1.2.3.4");

    // Api tier allows 30; fire 35 simultaneous checks
    let mut handles = Vec::new();
    for _ in 0..35 {
        let limiter = limiter.clone();
        let identity = identity.clone();
        handles.push(tokio::spawn(async move {
            limiter.check(&identity, Tier::Api).await
        }));
    }

    let mut allowed = 0;
    let mut rejected = 0;
    for handle in handles {
        let decision = handle.await.unwrap();
        if decision.allowed {
            allowed += 1;
        } else {
            rejected += 1;
        }
    }

    assert_eq!(allowed, 30);
    assert_eq!(rejected, 5);
}

#[tokio::test]
async fn test_store_outage_fails_open() {
    let (limiter, _, store) = setup();
    let identity = Identity::new("1.2.3.4");

    // Exhaust the budget while the store is healthy
    for _ in 0..6 {
        limiter.check(&identity, Tier::Auth).await;
    }
    assert!(!limiter.check(&identity, Tier::Auth).await.allowed);

    // During the outage every check is admitted, prior usage included
    store.set_unreachable(true);
    let decision = limiter.check(&identity, Tier::Auth).await;
    assert!(decision.allowed);
    assert!(decision.is_degraded());
    assert_eq!(decision.limit, FAIL_OPEN_LIMIT);
    assert_eq!(decision.remaining, FAIL_OPEN_LIMIT);
    assert!(decision.reset_at > window_start());

    // Enforcement resumes once the store is reachable again
    store.set_unreachable(false);
    let decision = limiter.check(&identity, Tier::Auth).await;
    assert!(!decision.allowed);
}

#[tokio::test]
async fn test_disabled_config_bypasses_store() {
    let config = RateLimitConfig {
        enabled: false,
        ..Default::default()
    };
    let (limiter, _, store) = setup_with_config(config);
    let identity = Identity::new("1.2.3.4");

    // Even an unreachable store is never consulted
    store.set_unreachable(true);
    for _ in 0..10 {
        let decision = limiter.check(&identity, Tier::Auth).await;
        assert!(decision.allowed);
        assert!(decision.is_degraded());
    }
}

#[tokio::test]
async fn test_counters_are_namespaced_by_tier_and_identity() {
    let (limiter, _, store) = setup();
    let identity = Identity::new("1.2.3.4");

    limiter.check(&identity, Tier::Auth).await;
    limiter.check(&identity, Tier::Auth).await;
    limiter.check(&identity, Tier::Upload).await;

    let bucket = window_start().timestamp() / 60;
    let auth_key = format!("ratelimit:auth:1.2.3.4:{}", bucket);
    let upload_key = format!("ratelimit:upload:1.2.3.4:{}", bucket);

    assert_eq!(store.raw_value(&auth_key).await, Some(2));
    assert_eq!(store.raw_value(&upload_key).await, Some(1));
}
