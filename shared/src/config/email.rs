//! Email delivery configuration

use serde::{Deserialize, Serialize};

/// SMTP email configuration
///
/// An empty `smtp_host` puts the mailer into no-op mode: messages are
/// logged but not sent. Useful for development without mail infrastructure.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EmailConfig {
    /// SMTP relay host ("" disables sending)
    pub smtp_host: String,

    /// SMTP relay port
    pub smtp_port: u16,

    /// SMTP username
    #[serde(default)]
    pub smtp_user: Option<String>,

    /// SMTP password
    #[serde(default)]
    pub smtp_pass: Option<String>,

    /// From address used for all outbound mail
    pub from_address: String,

    /// Use STARTTLS instead of implicit TLS
    #[serde(default = "default_starttls")]
    pub use_starttls: bool,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            smtp_host: String::new(),
            smtp_port: 587,
            smtp_user: None,
            smtp_pass: None,
            from_address: String::from("no-reply@mercato.dev"),
            use_starttls: default_starttls(),
        }
    }
}

impl EmailConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        Self {
            smtp_host: std::env::var("SMTP_HOST").unwrap_or_default(),
            smtp_port: std::env::var("SMTP_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(587),
            smtp_user: std::env::var("SMTP_USER").ok(),
            smtp_pass: std::env::var("SMTP_PASS").ok(),
            from_address: std::env::var("SMTP_FROM")
                .unwrap_or_else(|_| "no-reply@mercato.dev".to_string()),
            use_starttls: default_starttls(),
        }
    }

    /// Whether a real SMTP transport should be constructed
    pub fn is_enabled(&self) -> bool {
        !self.smtp_host.trim().is_empty()
    }
}

fn default_starttls() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_config_default_is_noop() {
        let config = EmailConfig::default();
        assert!(!config.is_enabled());
        assert_eq!(config.smtp_port, 587);
    }
}
