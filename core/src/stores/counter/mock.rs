//! Mock implementation of CounterStore for testing

use async_trait::async_trait;
use chrono::{DateTime, Duration as ChronoDuration, Utc};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

use crate::errors::StoreError;
use crate::services::clock::Clock;

use super::r#trait::CounterStore;

struct CounterEntry {
    count: u64,
    expires_at: DateTime<Utc>,
}

/// Mock counter store for testing
///
/// Honors TTLs against the injected clock and can simulate a store
/// outage via [`set_unreachable`](MockCounterStore::set_unreachable).
/// The write lock serializes increments, so concurrent checks each
/// observe a distinct post-increment value, matching the atomicity the
/// port requires.
pub struct MockCounterStore {
    counters: Arc<RwLock<HashMap<String, CounterEntry>>>,
    clock: Arc<dyn Clock>,
    unreachable: AtomicBool,
}

impl MockCounterStore {
    /// Create a new mock store reading time from `clock`
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            counters: Arc::new(RwLock::new(HashMap::new())),
            clock,
            unreachable: AtomicBool::new(false),
        }
    }

    /// Toggle a simulated outage; while set, every operation fails
    pub fn set_unreachable(&self, unreachable: bool) {
        self.unreachable.store(unreachable, Ordering::SeqCst);
    }

    /// Current value at `key`, ignoring expiry (test helper)
    pub async fn raw_value(&self, key: &str) -> Option<u64> {
        let counters = self.counters.read().await;
        counters.get(key).map(|entry| entry.count)
    }

    fn check_reachable(&self) -> Result<(), StoreError> {
        if self.unreachable.load(Ordering::SeqCst) {
            Err(StoreError::Connection("simulated outage".to_string()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl CounterStore for MockCounterStore {
    async fn increment(&self, key: &str, ttl: Duration) -> Result<u64, StoreError> {
        self.check_reachable()?;

        let now = self.clock.now();
        let mut counters = self.counters.write().await;

        match counters.get_mut(key) {
            Some(entry) if entry.expires_at > now => {
                entry.count += 1;
                Ok(entry.count)
            }
            _ => {
                counters.insert(
                    key.to_string(),
                    CounterEntry {
                        count: 1,
                        expires_at: now + ChronoDuration::seconds(ttl.as_secs() as i64),
                    },
                );
                Ok(1)
            }
        }
    }

    async fn read(&self, key: &str) -> Result<u64, StoreError> {
        self.check_reachable()?;

        let now = self.clock.now();
        let counters = self.counters.read().await;

        Ok(counters
            .get(key)
            .filter(|entry| entry.expires_at > now)
            .map(|entry| entry.count)
            .unwrap_or(0))
    }
}
