//! # GateKeep Core
//!
//! Domain and service layer for the GateKeep admission-control service.
//! This crate contains the identity resolver, tier and decision value
//! objects, the counter store port, and the tiered rate limiter with
//! its fail-open degradation policy.

pub mod domain;
pub mod errors;
pub mod services;
pub mod stores;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use services::*;
pub use stores::*;
