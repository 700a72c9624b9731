//! Traits for key-value store and mail delivery integration

use async_trait::async_trait;
use std::collections::HashMap;

/// Trait for a key-value store with per-key expiry
///
/// The store owns expiry enforcement: an expired key must behave exactly
/// like an absent one. Each operation is a single atomic round trip; no
/// multi-key transactions are assumed.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Get the value for a key, or `None` when absent or expired
    async fn get(&self, key: &str) -> Result<Option<String>, String>;
    /// Set a value, overwriting any previous value and resetting the TTL
    async fn set_with_expiry(
        &self,
        key: &str,
        value: &str,
        expiry_seconds: u64,
    ) -> Result<(), String>;
    /// Delete one or more keys; missing keys are not an error
    async fn delete(&self, keys: &[&str]) -> Result<(), String>;
}

/// Trait for template-based mail delivery
///
/// Template rendering is the implementation's responsibility; callers pass
/// only the template id and a flat map of substitutions.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Render the named template with `data` and deliver it to `to`
    async fn send(
        &self,
        to: &str,
        subject: &str,
        template_id: &str,
        data: &HashMap<String, String>,
    ) -> Result<(), String>;
}
