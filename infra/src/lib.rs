//! # Infrastructure Layer
//!
//! Concrete counter store backends for the GateKeep admission-control
//! service:
//! - **Cache**: Redis client with connection bootstrap and health check
//! - **Stores**: Redis-backed and in-memory implementations of the
//!   `CounterStore` port from `gk_core`

/// Redis client module
pub mod cache;

/// Counter store backend implementations
pub mod stores;

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Redis cache error
    #[error("Cache error: {0}")]
    Cache(#[from] redis::RedisError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
