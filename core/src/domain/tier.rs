//! Admission tiers

use serde::{Deserialize, Serialize};
use std::fmt;

/// Named rate-limiting policy class
///
/// The set is closed by construction: callers select a variant at the
/// call site, so an unknown tier is a compile-time impossibility rather
/// than a runtime error. Each tier's window and ceiling live in
/// `gk_shared::RateLimitConfig`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    /// Unauthenticated public endpoints
    Public,
    /// General API endpoints
    Api,
    /// Authentication endpoints
    Auth,
    /// Upload endpoints
    Upload,
}

impl Tier {
    /// All tiers, in declaration order
    pub const ALL: [Tier; 4] = [Tier::Public, Tier::Api, Tier::Auth, Tier::Upload];

    /// Lowercase tier name as used in store keys
    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Public => "public",
            Tier::Api => "api",
            Tier::Auth => "auth",
            Tier::Upload => "upload",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
