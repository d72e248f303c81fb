//! In-memory counter store
//!
//! Single-process stand-in for Redis, used for the `memory` cache type
//! and in tests. Counters live in a mutex-guarded map; entries expire
//! lazily when their key is next touched.

use async_trait::async_trait;
use chrono::{DateTime, Duration as ChronoDuration, Utc};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use gk_core::errors::StoreError;
use gk_core::services::clock::{Clock, SystemClock};
use gk_core::stores::CounterStore;

struct CounterEntry {
    count: u64,
    expires_at: DateTime<Utc>,
}

/// In-memory implementation of the counter store port
///
/// The map mutex makes each increment atomic with respect to
/// concurrent checks of the same key. Limits enforced through this
/// store are per-process, not shared across nodes.
pub struct InMemoryCounterStore {
    counters: Mutex<HashMap<String, CounterEntry>>,
    clock: Arc<dyn Clock>,
}

impl InMemoryCounterStore {
    /// Create a new store using the system clock
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock::new()))
    }

    /// Create a new store with an injected clock
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            counters: Mutex::new(HashMap::new()),
            clock,
        }
    }
}

impl Default for InMemoryCounterStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CounterStore for InMemoryCounterStore {
    async fn increment(&self, key: &str, ttl: Duration) -> Result<u64, StoreError> {
        let now = self.clock.now();
        let mut counters = self
            .counters
            .lock()
            .map_err(|_| StoreError::Backend("counter map poisoned".to_string()))?;

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
        let now = self.clock.now();
        let counters = self
            .counters
            .lock()
            .map_err(|_| StoreError::Backend("counter map poisoned".to_string()))?;

        Ok(counters
            .get(key)
            .filter(|entry| entry.expires_at > now)
            .map(|entry| entry.count)
            .unwrap_or(0))
    }
}
