//! Domain value objects for admission control

pub mod decision;
pub mod identity;
pub mod tier;

#[cfg(test)]
mod tests;

// Re-export commonly used types
pub use decision::{Decision, FAIL_OPEN_LIMIT};
pub use identity::{resolve_identity, HeaderSource, Identity, FALLBACK_IDENTITY};
pub use tier::Tier;
