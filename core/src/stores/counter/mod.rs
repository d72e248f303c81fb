//! Counter store port and its shipped test double

mod mock;
mod r#trait;

pub use mock::MockCounterStore;
pub use r#trait::CounterStore;
