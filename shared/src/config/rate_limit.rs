//! Rate limiting configuration module

use serde::{Deserialize, Serialize};

/// Window duration and request ceiling for a single tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct TierLimit {
    /// Window duration in seconds
    pub window_seconds: u64,

    /// Maximum requests allowed per identity within the window
    pub max_requests: u32,
}

impl TierLimit {
    /// Create a new tier limit
    pub const fn new(window_seconds: u64, max_requests: u32) -> Self {
        Self {
            window_seconds,
            max_requests,
        }
    }
}

/// Rate limiting configuration
///
/// The tier table is loaded once at startup and never mutated at
/// runtime; the limiter takes it by value and keeps its own copy.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RateLimitConfig {
    /// Enable rate limiting
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Limits for unauthenticated public endpoints
    #[serde(default = "default_public")]
    pub public: TierLimit,

    /// Limits for general API endpoints
    #[serde(default = "default_api")]
    pub api: TierLimit,

    /// Limits for authentication endpoints
    #[serde(default = "default_auth")]
    pub auth: TierLimit,

    /// Limits for upload endpoints
    #[serde(default = "default_upload")]
    pub upload: TierLimit,

    /// Upper bound on a single counter-store round trip in milliseconds;
    /// a check that exceeds it fails open instead of stalling the request
    #[serde(default = "default_store_timeout_ms")]
    pub store_timeout_ms: u64,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            public: default_public(),
            api: default_api(),
            auth: default_auth(),
            upload: default_upload(),
            store_timeout_ms: default_store_timeout_ms(),
        }
    }
}

impl RateLimitConfig {
    /// Create a development configuration (more lenient limits)
    pub fn development() -> Self {
        Self {
            public: TierLimit::new(60, 1000),
            api: TierLimit::new(60, 300),
            auth: TierLimit::new(60, 50),
            upload: TierLimit::new(60, 100),
            ..Default::default()
        }
    }

    /// Create a production configuration (canonical limits)
    pub fn production() -> Self {
        Self::default()
    }

    /// Create from environment variables
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(enabled) = std::env::var("RATE_LIMIT_ENABLED") {
            config.enabled = enabled != "false" && enabled != "0";
        }
        if let Ok(timeout) = std::env::var("RATE_LIMIT_STORE_TIMEOUT_MS") {
            config.store_timeout_ms = timeout.parse().unwrap_or(default_store_timeout_ms());
        }
        config
    }
}

fn default_enabled() -> bool {
    true
}

fn default_public() -> TierLimit {
    TierLimit::new(60, 100)
}

fn default_api() -> TierLimit {
    TierLimit::new(60, 30)
}

fn default_auth() -> TierLimit {
    TierLimit::new(60, 5)
}

fn default_upload() -> TierLimit {
    TierLimit::new(60, 10)
}

fn default_store_timeout_ms() -> u64 {
    250
}
