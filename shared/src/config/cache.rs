//! Counter store / cache configuration module

use serde::{Deserialize, Serialize};

/// Redis counter store configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheConfig {
    /// Redis connection URL
    pub url: String,

    /// Maximum number of connections in the pool
    pub max_connections: u32,

    /// Connection timeout in seconds
    pub connection_timeout: u64,

    /// Prefix applied to every key written by this service
    #[serde(default)]
    pub key_prefix: Option<String>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            url: String::from("redis://localhost:6379"),
            max_connections: 10,
            connection_timeout: 5,
            key_prefix: None,
        }
    }
}

impl CacheConfig {
    /// Create a new cache configuration with URL
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    /// Create from environment variables
    pub fn from_env() -> Self {
        let url = std::env::var("REDIS_URL")
            .unwrap_or_else(|_| "redis://localhost:6379".to_string());
        let max_connections = std::env::var("REDIS_MAX_CONNECTIONS")
            .unwrap_or_else(|_| "10".to_string())
            .parse()
            .unwrap_or(10);

        Self {
            url,
            max_connections,
            ..Default::default()
        }
    }

    /// Set the key prefix for all store keys
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.key_prefix = Some(prefix.into());
        self
    }

    /// Generate a store key with prefix
    pub fn make_key(&self, key: &str) -> String {
        match &self.key_prefix {
            Some(prefix) => format!("{}:{}", prefix, key),
            None => key.to_string(),
        }
    }
}

/// Counter store backend selection
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheStrategyConfig {
    /// Backend type (redis, memory)
    #[serde(default = "default_cache_type")]
    pub cache_type: CacheType,

    /// Redis configuration, when `cache_type` is redis
    #[serde(default)]
    pub redis: Option<CacheConfig>,
}

/// Counter store backend enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheType {
    Redis,
    Memory,
}

impl Default for CacheStrategyConfig {
    fn default() -> Self {
        Self {
            cache_type: default_cache_type(),
            redis: Some(CacheConfig::default()),
        }
    }
}

impl CacheStrategyConfig {
    /// Create from environment variables
    ///
    /// `COUNTER_STORE` selects the backend (`redis` or `memory`);
    /// Redis settings come from the `REDIS_*` variables.
    pub fn from_env() -> Self {
        let cache_type = match std::env::var("COUNTER_STORE").as_deref() {
            Ok("memory") => CacheType::Memory,
            _ => CacheType::Redis,
        };
        Self {
            cache_type,
            redis: Some(CacheConfig::from_env()),
        }
    }
}

fn default_cache_type() -> CacheType {
    CacheType::Redis
}
