//! Unit tests for the Decision value object

use chrono::{DateTime, Duration};

use crate::domain::{Decision, FAIL_OPEN_LIMIT};

#[test]
fn test_fail_open_decision_is_permissive() {
    let now = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
    let decision = Decision::fail_open(now, 60);

    assert!(decision.allowed);
    assert!(decision.is_degraded());
    assert_eq!(decision.limit, FAIL_OPEN_LIMIT);
    assert_eq!(decision.remaining, FAIL_OPEN_LIMIT);
    assert_eq!(decision.reset_at, now + Duration::seconds(60));
}

#[test]
fn test_enforced_decision_is_not_degraded() {
    let now = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
    let decision = Decision {
        allowed: true,
        limit: 30,
        remaining: 29,
        reset_at: now + Duration::seconds(60),
    };
    assert!(!decision.is_degraded());
}

#[test]
fn test_retry_after_is_at_least_one_second() {
    let now = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
    let decision = Decision {
        allowed: false,
        limit: 5,
        remaining: 0,
        reset_at: now + Duration::seconds(42),
    };

    assert_eq!(decision.retry_after_seconds(now), 42);
    assert_eq!(decision.retry_after_seconds(now + Duration::seconds(42)), 1);
}
