//! Test doubles for the OTP guard collaborators

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;
use tokio::time::{Duration, Instant};

use crate::services::otp::{KeyValueStore, Notifier};

struct Entry {
    value: String,
    expires_at: Instant,
}

/// In-memory key-value store honoring per-key expiry
///
/// Each entry carries a monotonic expiry instant compared on read, so an
/// expired key behaves exactly like an absent one. Driven by tokio's
/// paused test clock, TTL transitions become deterministic.
#[derive(Default)]
pub struct InMemoryStore {
    entries: RwLock<HashMap<String, Entry>>,
    fail_writes: AtomicBool,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent write fail (store outage simulation)
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Check presence without consuming anything
    pub async fn contains(&self, key: &str) -> bool {
        let entries = self.entries.read().await;
        entries
            .get(key)
            .map(|e| e.expires_at > Instant::now())
            .unwrap_or(false)
    }
}

#[async_trait]
impl KeyValueStore for InMemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, String> {
        let entries = self.entries.read().await;
        Ok(entries.get(key).and_then(|e| {
            if e.expires_at > Instant::now() {
                Some(e.value.clone())
            } else {
                None
            }
        }))
    }

    async fn set_with_expiry(
        &self,
        key: &str,
        value: &str,
        expiry_seconds: u64,
    ) -> Result<(), String> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err("simulated store failure".to_string());
        }
        let mut entries = self.entries.write().await;
        entries.insert(
            key.to_string(),
            Entry {
                value: value.to_string(),
                expires_at: Instant::now() + Duration::from_secs(expiry_seconds),
            },
        );
        Ok(())
    }

    async fn delete(&self, keys: &[&str]) -> Result<(), String> {
        let mut entries = self.entries.write().await;
        for key in keys {
            entries.remove(*key);
        }
        Ok(())
    }
}

/// A message captured by the recording notifier
#[derive(Debug, Clone)]
pub struct SentEmail {
    pub to: String,
    pub subject: String,
    pub template_id: String,
    pub data: HashMap<String, String>,
}

/// Notifier double recording every delivery
#[derive(Default)]
pub struct RecordingNotifier {
    sent: RwLock<Vec<SentEmail>>,
    fail: AtomicBool,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent delivery fail
    pub fn set_fail(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    pub async fn sent_count(&self) -> usize {
        self.sent.read().await.len()
    }

    pub async fn last_sent(&self) -> Option<SentEmail> {
        self.sent.read().await.last().cloned()
    }

    /// The OTP bound into the most recent delivery
    pub async fn last_otp(&self) -> Option<String> {
        self.last_sent().await.and_then(|m| m.data.get("otp").cloned())
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn send(
        &self,
        to: &str,
        subject: &str,
        template_id: &str,
        data: &HashMap<String, String>,
    ) -> Result<(), String> {
        if self.fail.load(Ordering::SeqCst) {
            return Err("simulated delivery failure".to_string());
        }
        let mut sent = self.sent.write().await;
        sent.push(SentEmail {
            to: to.to_string(),
            subject: subject.to_string(),
            template_id: template_id.to_string(),
            data: data.clone(),
        });
        Ok(())
    }
}
