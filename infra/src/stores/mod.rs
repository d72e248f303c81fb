//! Counter store backends

pub mod memory;
pub mod redis_counter;

// Re-export commonly used types
pub use memory::InMemoryCounterStore;
pub use redis_counter::RedisCounterStore;
