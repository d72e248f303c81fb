//! Per-request admission decisions

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

/// Limit reported while enforcement is degraded
///
/// Far above any configured tier ceiling, signaling "rate limiting
/// temporarily inactive" to callers inspecting the decision.
pub const FAIL_OPEN_LIMIT: u32 = 1_000_000;

/// Outcome of a single rate-limit check
///
/// Produced and consumed within one request's lifetime, never
/// persisted. `remaining <= limit` always holds, and `reset_at` is
/// strictly in the future relative to the check time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Decision {
    /// Whether the request may proceed
    pub allowed: bool,
    /// The ceiling applied to this check
    pub limit: u32,
    /// Budget left in the current window after this request
    pub remaining: u32,
    /// When the current window rolls over
    pub reset_at: DateTime<Utc>,
}

impl Decision {
    /// Sentinel permissive decision for fail-open degradation
    ///
    /// Returned when the counter store is unreachable or a check timed
    /// out; availability of the protected service is prioritized over
    /// strict enforcement during infrastructure outages.
    pub fn fail_open(now: DateTime<Utc>, window_seconds: u64) -> Self {
        Self {
            allowed: true,
            limit: FAIL_OPEN_LIMIT,
            remaining: FAIL_OPEN_LIMIT,
            reset_at: now + Duration::seconds(window_seconds as i64),
        }
    }

    /// Whether this decision was produced without store enforcement
    pub fn is_degraded(&self) -> bool {
        self.limit == FAIL_OPEN_LIMIT
    }

    /// Seconds until the window resets, at least one
    pub fn retry_after_seconds(&self, now: DateTime<Utc>) -> u64 {
        (self.reset_at - now).num_seconds().max(1) as u64
    }
}
