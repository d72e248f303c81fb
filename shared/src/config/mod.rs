//! Configuration module organized by concern
//!
//! - `cache` - Counter store backend configuration (Redis or in-memory)
//! - `rate_limit` - Per-tier windows and request ceilings

pub mod cache;
pub mod rate_limit;

// Re-export commonly used types
pub use cache::{CacheConfig, CacheStrategyConfig, CacheType};
pub use rate_limit::{RateLimitConfig, TierLimit};
