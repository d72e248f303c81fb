//! Redis-backed counter store for the tiered rate limiter

use async_trait::async_trait;
use redis::AsyncCommands;
use std::sync::Arc;
use std::time::Duration;

use gk_core::errors::StoreError;
use gk_core::stores::CounterStore;

use crate::cache::redis_client::RedisClient;

/// Redis implementation of the counter store port
///
/// INCR is atomic on the Redis server, so concurrent checks for the
/// same key each observe a distinct post-increment value. The expiry
/// is attached when a key is first created and left untouched after.
pub struct RedisCounterStore {
    client: Arc<RedisClient>,
}

impl RedisCounterStore {
    /// Create a new Redis-backed counter store
    pub fn new(client: Arc<RedisClient>) -> Self {
        Self { client }
    }

    fn namespaced(&self, key: &str) -> String {
        self.client.config().make_key(key)
    }
}

#[async_trait]
impl CounterStore for RedisCounterStore {
    async fn increment(&self, key: &str, ttl: Duration) -> Result<u64, StoreError> {
        let key = self.namespaced(key);
        let mut conn = self.client.connection();

        let count: u64 = conn.incr(&key, 1u64).await.map_err(into_store_error)?;
        if count == 1 {
            let _: bool = conn
                .expire(&key, ttl.as_secs() as i64)
                .await
                .map_err(into_store_error)?;
        }

        Ok(count)
    }

    async fn read(&self, key: &str) -> Result<u64, StoreError> {
        let key = self.namespaced(key);
        let mut conn = self.client.connection();

        let value: Option<u64> = conn.get(&key).await.map_err(into_store_error)?;
        Ok(value.unwrap_or(0))
    }
}

fn into_store_error(error: redis::RedisError) -> StoreError {
    if error.is_io_error() || error.is_timeout() || error.is_connection_refusal() {
        StoreError::Connection(error.to_string())
    } else {
        StoreError::Backend(error.to_string())
    }
}
