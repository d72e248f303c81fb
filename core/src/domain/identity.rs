//! Client identity resolution from proxy headers

use std::collections::HashMap;
use std::fmt;

/// Sentinel identity used when no proxy header names the client
pub const FALLBACK_IDENTITY: &str = "unknown";

/// Identity of the requesting client, derived from proxy headers
///
/// Always non-empty; resolution produces *some* value. Recomputed per
/// request and never stored.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identity(String);

impl Identity {
    /// Create an identity from a client address string
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// The fallback identity for clients with no usable proxy header
    pub fn fallback() -> Self {
        Self(FALLBACK_IDENTITY.to_string())
    }

    /// The identity as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this is the fallback sentinel rather than a real address
    pub fn is_fallback(&self) -> bool {
        self.0 == FALLBACK_IDENTITY
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Read access to request headers by case-insensitive name
///
/// Keeps the resolver free of any HTTP framework types; the API layer
/// adapts its header map to this trait.
pub trait HeaderSource {
    /// Look up a header value by name (case-insensitive)
    fn header_value(&self, name: &str) -> Option<&str>;
}

impl HeaderSource for HashMap<String, String> {
    fn header_value(&self, name: &str) -> Option<&str> {
        self.iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Resolve the client identity from request headers
///
/// Precedence, first match wins:
/// 1. `x-forwarded-for` - the entry before the first comma, trimmed;
///    the original client in a proxy chain
/// 2. `x-real-ip` - used verbatim
/// 3. `x-client-ip` - used verbatim
/// 4. The literal fallback `"unknown"`
///
/// Total: never fails, never blocks, no side effects. No reverse DNS
/// and no IP syntax validation; any non-empty string clears a stage.
/// A value that is empty after trimming cannot yield an identity and
/// falls through to the next source.
pub fn resolve_identity<H: HeaderSource + ?Sized>(headers: &H) -> Identity {
    if let Some(forwarded) = headers.header_value("x-forwarded-for") {
        let client = forwarded.split(',').next().unwrap_or("").trim();
        if !client.is_empty() {
            return Identity::new(client);
        }
    }

    for name in ["x-real-ip", "x-client-ip"] {
        if let Some(value) = headers.header_value(name) {
            if !value.is_empty() {
                return Identity::new(value);
            }
        }
    }

    Identity::fallback()
}
