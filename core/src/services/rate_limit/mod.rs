//! Tiered rate limiting service
//!
//! Bounds how many requests a client identity may issue per time window
//! for each admission tier, backed by a shared counter store, with
//! fail-open degradation when the store cannot be reached.

mod service;

#[cfg(test)]
mod tests;

pub use service::TieredRateLimiter;
