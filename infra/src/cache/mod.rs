//! Redis client for the shared counter store

pub mod redis_client;

pub use redis_client::RedisClient;
