//! Shared configuration types for the GateKeep admission-control service
//!
//! This crate provides the configuration surface used across the server
//! modules:
//! - Rate limiting tiers (window duration and request ceiling per tier)
//! - Counter store / cache backend settings

pub mod config;

// Re-export commonly used items at crate root
pub use config::{
    CacheConfig, CacheStrategyConfig, CacheType, RateLimitConfig, TierLimit,
};
