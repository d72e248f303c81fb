//! HTTP surface of the GateKeep admission gateway
//!
//! The library exposes the rate limiting middleware so integration
//! tests and embedding services can mount it on their own apps; the
//! binary in `main.rs` wires it over a configured counter store.

pub mod middleware;
