//! Service layer: the tiered rate limiter and its clock port

pub mod clock;
pub mod rate_limit;

// Re-export commonly used types
pub use clock::{Clock, MockClock, SystemClock};
pub use rate_limit::TieredRateLimiter;
