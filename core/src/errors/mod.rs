//! Error types for the admission-control domain

use thiserror::Error;

/// Failures reaching the shared counter store
///
/// These never surface to request handlers; the rate limiter converts
/// them into a fail-open decision and logs the cause at warning level.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The store could not be reached at all
    #[error("counter store connection failure: {0}")]
    Connection(String),

    /// The store was reached but the operation failed
    #[error("counter store operation failure: {0}")]
    Backend(String),
}
