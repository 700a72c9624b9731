//! SMTP notifier implementation
//!
//! Renders a named template and delivers it over an async SMTP transport.
//! When no SMTP host is configured the notifier runs in no-op mode and only
//! logs, which keeps development environments mail-free.

use async_trait::async_trait;
use lettre::message::{header, Mailbox, Message};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Tokio1Executor};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{info, warn};

use mt_core::services::otp::{mask_email, Notifier};
use mt_shared::config::EmailConfig;

use crate::InfrastructureError;

use super::templates::render_template;

/// Async SMTP notifier (or no-op when unconfigured)
#[derive(Clone)]
pub struct SmtpNotifier {
    transport: Option<Arc<AsyncSmtpTransport<Tokio1Executor>>>,
    from: Mailbox,
}

impl SmtpNotifier {
    /// Build the notifier from configuration
    pub fn new(config: &EmailConfig) -> Result<Self, InfrastructureError> {
        let from = config
            .from_address
            .parse::<Mailbox>()
            .map_err(|e| InfrastructureError::Config(format!("Invalid SMTP_FROM address: {}", e)))?;

        let transport = if !config.is_enabled() {
            warn!("SMTP host not configured; email notifier will operate in no-op mode");
            None
        } else {
            let builder = if config.use_starttls {
                AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)
            } else {
                AsyncSmtpTransport::<Tokio1Executor>::relay(&config.smtp_host)
            }
            .map_err(|e| {
                InfrastructureError::Config(format!("Failed to configure SMTP transport: {}", e))
            })?
            .port(config.smtp_port);

            let builder = if let (Some(user), Some(pass)) = (&config.smtp_user, &config.smtp_pass)
            {
                builder.credentials(Credentials::new(user.clone(), pass.clone()))
            } else {
                builder
            };

            Some(Arc::new(builder.build()))
        };

        Ok(Self { transport, from })
    }

    /// Whether a real transport is configured
    pub fn is_enabled(&self) -> bool {
        self.transport.is_some()
    }

    async fn send_mail(
        &self,
        to: &str,
        subject: &str,
        html_body: String,
    ) -> Result<(), InfrastructureError> {
        let transport = match &self.transport {
            Some(transport) => transport,
            None => {
                info!(
                    to = %mask_email(to),
                    subject,
                    "Email notifier running in no-op mode; skipping actual send"
                );
                return Ok(());
            }
        };

        let to_mailbox = to
            .parse::<Mailbox>()
            .map_err(|e| InfrastructureError::Email(format!("Invalid recipient address: {}", e)))?;

        let email = Message::builder()
            .from(self.from.clone())
            .to(to_mailbox)
            .subject(subject)
            .header(header::ContentType::TEXT_HTML)
            .body(html_body)
            .map_err(|e| InfrastructureError::Email(format!("Failed to build message: {}", e)))?;

        transport
            .send(email)
            .await
            .map_err(|e| InfrastructureError::Email(format!("Failed to send email: {}", e)))?;

        info!(to = %mask_email(to), subject, "Email sent successfully");
        Ok(())
    }
}

#[async_trait]
impl Notifier for SmtpNotifier {
    async fn send(
        &self,
        to: &str,
        subject: &str,
        template_id: &str,
        data: &HashMap<String, String>,
    ) -> Result<(), String> {
        let body = render_template(template_id, data).map_err(|e| e.to_string())?;
        self.send_mail(to, subject, body)
            .await
            .map_err(|e| e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_noop_notifier_accepts_sends() {
        let notifier = SmtpNotifier::new(&EmailConfig::default()).unwrap();
        assert!(!notifier.is_enabled());

        let mut data = HashMap::new();
        data.insert("name".to_string(), "Ada".to_string());
        data.insert("otp".to_string(), "4821".to_string());

        let result = notifier
            .send("a@x.com", "Verify Your Email", "user-activation-mail", &data)
            .await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_unknown_template_fails_before_delivery() {
        let notifier = SmtpNotifier::new(&EmailConfig::default()).unwrap();

        let result = notifier
            .send("a@x.com", "Verify Your Email", "bogus", &HashMap::new())
            .await;
        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_from_address_is_rejected() {
        let config = EmailConfig {
            from_address: "not an address".to_string(),
            ..EmailConfig::default()
        };
        assert!(SmtpNotifier::new(&config).is_err());
    }
}
