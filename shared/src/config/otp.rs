//! OTP policy configuration

use serde::{Deserialize, Serialize};

/// OTP issuance and verification policy
///
/// All durations are seconds. Every piece of OTP state lives in the cache
/// under its own key with one of these TTLs; nothing here is persisted.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OtpConfig {
    /// How long an issued code stays valid
    pub code_ttl: u64,

    /// Mandatory wait between successive issuances to the same address
    pub cooldown: u64,

    /// Window over which issuance requests are counted
    pub request_window: u64,

    /// Requests allowed within the window before the spam lock arms
    pub max_requests: u32,

    /// Duration of the spam lock once armed
    pub spam_lock: u64,

    /// Wrong submissions allowed before the verification lock arms
    pub max_failed_attempts: u32,

    /// How long the failed-attempt counter lives between submissions
    pub attempts_ttl: u64,

    /// Duration of the verification lock once armed
    pub lock: u64,
}

impl Default for OtpConfig {
    fn default() -> Self {
        Self {
            code_ttl: 300,
            cooldown: 60,
            request_window: 3600,
            max_requests: 2,
            spam_lock: 3600,
            max_failed_attempts: 2,
            attempts_ttl: 300,
            lock: 1800,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_otp_config_defaults() {
        let config = OtpConfig::default();
        assert_eq!(config.code_ttl, 300);
        assert_eq!(config.cooldown, 60);
        assert_eq!(config.max_requests, 2);
        assert_eq!(config.lock, 1800);
    }
}
