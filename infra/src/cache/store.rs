//! Key-value store adapter over the Redis client
//!
//! Bridges the core `KeyValueStore` trait to [`RedisClient`], applying the
//! configured key prefix so several deployments can share one Redis.

use async_trait::async_trait;

use mt_core::services::otp::KeyValueStore;
use mt_shared::config::CacheConfig;

use super::redis_client::RedisClient;

/// Redis-backed implementation of the core key-value store trait
#[derive(Clone)]
pub struct RedisStore {
    client: RedisClient,
    config: CacheConfig,
}

impl RedisStore {
    /// Create a new store over an established Redis client
    pub fn new(client: RedisClient, config: CacheConfig) -> Self {
        Self { client, config }
    }
}

#[async_trait]
impl KeyValueStore for RedisStore {
    async fn get(&self, key: &str) -> Result<Option<String>, String> {
        self.client
            .get(&self.config.make_key(key))
            .await
            .map_err(|e| e.to_string())
    }

    async fn set_with_expiry(
        &self,
        key: &str,
        value: &str,
        expiry_seconds: u64,
    ) -> Result<(), String> {
        self.client
            .set_with_expiry(&self.config.make_key(key), value, expiry_seconds)
            .await
            .map_err(|e| e.to_string())
    }

    async fn delete(&self, keys: &[&str]) -> Result<(), String> {
        let prefixed: Vec<String> = keys.iter().map(|k| self.config.make_key(k)).collect();
        let refs: Vec<&str> = prefixed.iter().map(String::as_str).collect();
        self.client
            .delete(&refs)
            .await
            .map(|_| ())
            .map_err(|e| e.to_string())
    }
}
