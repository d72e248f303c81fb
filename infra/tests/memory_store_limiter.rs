//! End-to-end limiter tests over the in-memory counter store

use chrono::{DateTime, Duration, Utc};
use std::sync::Arc;

use gk_core::domain::{Identity, Tier};
use gk_core::services::clock::MockClock;
use gk_core::services::rate_limit::TieredRateLimiter;
use gk_infra::stores::InMemoryCounterStore;
use gk_shared::RateLimitConfig;

fn window_start() -> DateTime<Utc> {
    DateTime::from_timestamp(1_700_000_040, 0).unwrap()
}

fn setup() -> (TieredRateLimiter, Arc<MockClock>) {
    let clock = Arc::new(MockClock::new(window_start()));
    let store = Arc::new(InMemoryCounterStore::with_clock(clock.clone()));
    let limiter =
        TieredRateLimiter::with_clock(store, RateLimitConfig::default(), clock.clone());
    (limiter, clock)
}

#[tokio::test]
async fn test_upload_tier_enforced_over_memory_store() {
    let (limiter, _) = setup();
    let identity = Identity::new("10.0.0.1");

    for i in 1..=10u32 {
        let decision = limiter.check(&identity, Tier::Upload).await;
        assert!(decision.allowed, "request {} should be allowed", i);
        assert_eq!(decision.remaining, 10 - i);
    }

    let decision = limiter.check(&identity, Tier::Upload).await;
    assert!(!decision.allowed);
    assert_eq!(decision.remaining, 0);
}

#[tokio::test]
async fn test_budget_recovers_once_window_drains() {
    let (limiter, clock) = setup();
    let identity = Identity::new("10.0.0.1");

    for _ in 0..11 {
        limiter.check(&identity, Tier::Upload).await;
    }
    assert!(!limiter.check(&identity, Tier::Upload).await.allowed);

    clock.advance(Duration::seconds(120));
    let decision = limiter.check(&identity, Tier::Upload).await;
    assert!(decision.allowed);
    assert_eq!(decision.remaining, 9);
}

#[tokio::test]
async fn test_public_and_upload_budgets_are_independent() {
    let (limiter, _) = setup();
    let identity = Identity::new("10.0.0.1");

    for _ in 0..11 {
        limiter.check(&identity, Tier::Upload).await;
    }
    assert!(!limiter.check(&identity, Tier::Upload).await.allowed);

    let decision = limiter.check(&identity, Tier::Public).await;
    assert!(decision.allowed);
    assert_eq!(decision.remaining, 99);
}
