//! Counter store abstraction for the tiered rate limiter

use async_trait::async_trait;
use std::time::Duration;

use crate::errors::StoreError;

/// Shared counter store contract
///
/// Any key-value store with atomic counters and TTL expiry satisfies
/// this port; the limiter treats it as a black box. The counter record
/// is owned by the store, not by the limiter process.
#[async_trait]
pub trait CounterStore: Send + Sync {
    /// Atomically increment the integer counter at `key` and return the
    /// post-increment value. A key created by this call gets `ttl`.
    ///
    /// The increment must be a single atomic store operation with
    /// respect to concurrent callers of the same key, never a local
    /// read-modify-write split across two round trips.
    async fn increment(&self, key: &str, ttl: Duration) -> Result<u64, StoreError>;

    /// Read the current counter at `key`; absent or expired keys read
    /// as zero.
    async fn read(&self, key: &str) -> Result<u64, StoreError>;
}
