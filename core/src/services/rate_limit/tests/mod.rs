//! Tests for the tiered rate limiter

#[cfg(test)]
mod service_tests;
