//! Store ports exposed by the domain layer

pub mod counter;

// Re-export commonly used types
pub use counter::{CounterStore, MockCounterStore};
