//! Redis cache client and key-value store adapter

mod redis_client;
mod store;

pub use redis_client::RedisClient;
pub use store::RedisStore;
