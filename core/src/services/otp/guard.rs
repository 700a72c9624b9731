//! OTP guard implementation
//!
//! State model (one cache key per concern, all TTL-expired by the store):
//!
//! | key                        | value         | TTL    |
//! |----------------------------|---------------|--------|
//! | `otp:<email>`              | 4-digit code  | 300s   |
//! | `otp_cooldown:<email>`     | sentinel      | 60s    |
//! | `otp_request_count:<email>`| counter       | 3600s  |
//! | `otp_spam_lock:<email>`    | sentinel      | 3600s  |
//! | `otp_attempts:<email>`     | counter       | 300s   |
//! | `otp_lock:<email>`         | sentinel      | 1800s  |
//!
//! A subject's state is the union of whichever keys have not yet expired;
//! there is no cross-key transaction.

use constant_time_eq::constant_time_eq;
use rand::{rngs::OsRng, Rng};
use std::collections::HashMap;
use std::sync::Arc;

use mt_shared::config::OtpConfig;

use crate::errors::{AuthError, DomainError, DomainResult};

use super::traits::{KeyValueStore, Notifier};

/// Length of an issued OTP code
pub const OTP_CODE_LENGTH: usize = 4;

/// Subject line used for every OTP email
const OTP_EMAIL_SUBJECT: &str = "Verify Your Email";

const OTP_KEY_PREFIX: &str = "otp";
const COOLDOWN_KEY_PREFIX: &str = "otp_cooldown";
const REQUEST_COUNT_KEY_PREFIX: &str = "otp_request_count";
const SPAM_LOCK_KEY_PREFIX: &str = "otp_spam_lock";
const ATTEMPTS_KEY_PREFIX: &str = "otp_attempts";
const LOCK_KEY_PREFIX: &str = "otp_lock";

/// Guard enforcing OTP issuance and verification policy for a subject
/// identified by an email address
///
/// The guard is the sole writer of OTP state; the store owns expiry. All
/// collaborators are injected so tests can substitute doubles.
pub struct OtpGuard<S: KeyValueStore, N: Notifier> {
    /// Key-value store holding all OTP state
    store: Arc<S>,
    /// Mail delivery service
    notifier: Arc<N>,
    /// Policy configuration (TTLs and thresholds)
    config: OtpConfig,
}

impl<S: KeyValueStore, N: Notifier> OtpGuard<S, N> {
    /// Create a new OTP guard
    pub fn new(store: Arc<S>, notifier: Arc<N>, config: OtpConfig) -> Self {
        Self {
            store,
            notifier,
            config,
        }
    }

    /// Check whether a subject is currently allowed to request an OTP
    ///
    /// Checks, in this fixed order, for an active verification lock, spam
    /// lock, and cooldown; the first one present short-circuits. The
    /// ordering matters: the most severe restriction always wins, so a
    /// locked subject never sees a "wait 1 minute" message.
    ///
    /// This method has no side effects.
    ///
    /// # Returns
    ///
    /// * `Ok(())` - No restriction is active
    /// * `Err(DomainError::Auth)` - The matching restriction, with its wait
    pub async fn check_restrictions(&self, email: &str) -> DomainResult<()> {
        if self.key_present(&lock_key(email)).await? {
            tracing::warn!(
                email = %mask_email(email),
                event = "otp_restricted",
                restriction = "lock",
                "OTP request blocked by verification lock"
            );
            return Err(AuthError::AccountLocked.into());
        }

        if self.key_present(&spam_lock_key(email)).await? {
            tracing::warn!(
                email = %mask_email(email),
                event = "otp_restricted",
                restriction = "spam_lock",
                "OTP request blocked by spam lock"
            );
            return Err(AuthError::OtpSpamLocked.into());
        }

        if self.key_present(&cooldown_key(email)).await? {
            tracing::warn!(
                email = %mask_email(email),
                event = "otp_restricted",
                restriction = "cooldown",
                "OTP request blocked by cooldown"
            );
            return Err(AuthError::OtpCooldown.into());
        }

        Ok(())
    }

    /// Count an issuance request against the subject's sliding window
    ///
    /// Reaching the request threshold arms the spam lock instead of
    /// incrementing; the counter is left to expire on its own since the
    /// spam lock dominates. Otherwise the counter is rewritten with a fresh
    /// window TTL, so the window slides with every request rather than
    /// covering a fixed hour.
    pub async fn track_request(&self, email: &str) -> DomainResult<()> {
        let count_key = request_count_key(email);
        let count: u32 = self
            .read_counter(&count_key)
            .await?;

        if count >= self.config.max_requests {
            self.store
                .set_with_expiry(&spam_lock_key(email), "locked", self.config.spam_lock)
                .await
                .map_err(|e| DomainError::Internal {
                    message: format!("Failed to arm spam lock: {}", e),
                })?;

            tracing::warn!(
                email = %mask_email(email),
                event = "otp_spam_lock_armed",
                request_count = count,
                "Excessive OTP requests, spam lock armed"
            );
            return Err(AuthError::OtpSpamLocked.into());
        }

        self.store
            .set_with_expiry(
                &count_key,
                &(count + 1).to_string(),
                self.config.request_window,
            )
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to track OTP request: {}", e),
            })?;

        Ok(())
    }

    /// Generate, deliver, and record a fresh OTP for a subject
    ///
    /// The code is drawn from the OS CSPRNG; it is the sole proof of
    /// mailbox ownership, so a predictable generator is not acceptable
    /// here. Delivery failure is logged but does not roll back state: the
    /// code and cooldown are written either way, and only a store failure
    /// fails the call.
    ///
    /// # Arguments
    ///
    /// * `name` - Display name bound into the email template
    /// * `email` - Subject address the code is issued to
    /// * `template_id` - Mail template to render
    pub async fn issue(&self, name: &str, email: &str, template_id: &str) -> DomainResult<()> {
        let code = generate_code();

        let mut data = HashMap::new();
        data.insert("name".to_string(), name.to_string());
        data.insert("otp".to_string(), code.clone());

        if let Err(e) = self
            .notifier
            .send(email, OTP_EMAIL_SUBJECT, template_id, &data)
            .await
        {
            tracing::error!(
                email = %mask_email(email),
                template = template_id,
                error = %e,
                event = "otp_email_failed",
                "Failed to deliver OTP email"
            );
        }

        self.store
            .set_with_expiry(&otp_key(email), &code, self.config.code_ttl)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to store OTP code: {}", e),
            })?;

        self.store
            .set_with_expiry(&cooldown_key(email), "true", self.config.cooldown)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to arm OTP cooldown: {}", e),
            })?;

        tracing::info!(
            email = %mask_email(email),
            template = template_id,
            event = "otp_issued",
            "Issued new OTP"
        );

        Ok(())
    }

    /// Verify a submitted code for a subject
    ///
    /// A locked subject always fails with the lock reason, even if the
    /// submission would otherwise match. An absent code means it expired or
    /// was never issued. A wrong submission past the attempt threshold arms
    /// the verification lock and clears the code; earlier wrong submissions
    /// count up with a refreshed attempt TTL. A correct submission consumes
    /// the code and the attempt counter so it cannot be replayed.
    pub async fn verify(&self, email: &str, submitted: &str) -> DomainResult<()> {
        if self.key_present(&lock_key(email)).await? {
            tracing::warn!(
                email = %mask_email(email),
                event = "otp_verify_locked",
                "Verification attempted while locked"
            );
            return Err(AuthError::AccountLocked.into());
        }

        let code_key = otp_key(email);
        let stored = self
            .store
            .get(&code_key)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to read OTP code: {}", e),
            })?
            .ok_or(AuthError::OtpExpired)?;

        let attempts_key = attempts_key(email);
        let attempts: u32 = self.read_counter(&attempts_key).await?;

        if !Self::codes_match(&stored, submitted) {
            if attempts >= self.config.max_failed_attempts {
                self.store
                    .set_with_expiry(&lock_key(email), "locked", self.config.lock)
                    .await
                    .map_err(|e| DomainError::Internal {
                        message: format!("Failed to arm verification lock: {}", e),
                    })?;
                self.delete_keys(&[code_key.as_str(), attempts_key.as_str()])
                    .await?;

                tracing::warn!(
                    email = %mask_email(email),
                    event = "otp_lock_armed",
                    "Max failed attempts reached, verification lock armed"
                );
                return Err(AuthError::MaxAttemptsExceeded.into());
            }

            self.store
                .set_with_expiry(
                    &attempts_key,
                    &(attempts + 1).to_string(),
                    self.config.attempts_ttl,
                )
                .await
                .map_err(|e| DomainError::Internal {
                    message: format!("Failed to record failed attempt: {}", e),
                })?;

            let remaining = self.config.max_failed_attempts - attempts;
            tracing::warn!(
                email = %mask_email(email),
                event = "otp_verify_failed",
                remaining = remaining,
                "Incorrect OTP submitted"
            );
            return Err(AuthError::IncorrectOtp { remaining }.into());
        }

        // Consume the code so it cannot be replayed within its TTL
        self.delete_keys(&[code_key.as_str(), attempts_key.as_str()])
            .await?;

        tracing::info!(
            email = %mask_email(email),
            event = "otp_verified",
            "OTP successfully verified"
        );

        Ok(())
    }

    /// Constant-time comparison of two codes
    ///
    /// Prevents timing attacks from leaking how much of a guess matched.
    fn codes_match(stored: &str, submitted: &str) -> bool {
        if stored.len() != submitted.len() {
            return false;
        }
        constant_time_eq(stored.as_bytes(), submitted.as_bytes())
    }

    /// Check whether a sentinel key exists
    async fn key_present(&self, key: &str) -> DomainResult<bool> {
        self.store
            .get(key)
            .await
            .map(|v| v.is_some())
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to read key {}: {}", key, e),
            })
    }

    /// Read a counter key, treating absence or garbage as zero
    async fn read_counter(&self, key: &str) -> DomainResult<u32> {
        let value = self
            .store
            .get(key)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to read counter {}: {}", key, e),
            })?;

        Ok(value.and_then(|v| v.parse().ok()).unwrap_or(0))
    }

    async fn delete_keys(&self, keys: &[&str]) -> DomainResult<()> {
        self.store
            .delete(keys)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to delete OTP keys: {}", e),
            })
    }
}

/// Generate a cryptographically secure random 4-digit code
///
/// Draws uniformly from [1000, 9999) using the OS CSPRNG; the code is the
/// sole proof of mailbox ownership, so a seedable generator would not do.
fn generate_code() -> String {
    OsRng.gen_range(1000..9999).to_string()
}

fn otp_key(email: &str) -> String {
    format!("{}:{}", OTP_KEY_PREFIX, email)
}

fn cooldown_key(email: &str) -> String {
    format!("{}:{}", COOLDOWN_KEY_PREFIX, email)
}

fn request_count_key(email: &str) -> String {
    format!("{}:{}", REQUEST_COUNT_KEY_PREFIX, email)
}

fn spam_lock_key(email: &str) -> String {
    format!("{}:{}", SPAM_LOCK_KEY_PREFIX, email)
}

fn attempts_key(email: &str) -> String {
    format!("{}:{}", ATTEMPTS_KEY_PREFIX, email)
}

fn lock_key(email: &str) -> String {
    format!("{}:{}", LOCK_KEY_PREFIX, email)
}

/// Mask an email address for logging
///
/// Keeps the first character of the local part and the domain.
pub fn mask_email(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() => {
            let first = local.chars().next().unwrap_or('*');
            format!("{}***@{}", first, domain)
        }
        _ => "***".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_code_format() {
        for _ in 0..200 {
            let code = generate_code();
            assert_eq!(code.len(), OTP_CODE_LENGTH);
            let num: u32 = code.parse().expect("code should be numeric");
            assert!((1000..9999).contains(&num));
        }
    }

    #[test]
    fn test_generated_codes_vary() {
        let codes: std::collections::HashSet<String> =
            (0..100).map(|_| generate_code()).collect();
        assert!(codes.len() > 1);
    }

    #[test]
    fn test_mask_email() {
        assert_eq!(mask_email("ada@example.com"), "a***@example.com");
        assert_eq!(mask_email("not-an-email"), "***");
        assert_eq!(mask_email("@example.com"), "***");
    }
}
