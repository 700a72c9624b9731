//! Mock notifier for development and testing
//!
//! Renders templates like the real notifier but only logs the result and
//! counts deliveries.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{info, warn};

use mt_core::services::otp::{mask_email, Notifier};

use super::templates::render_template;

/// Mock notifier that logs instead of sending
#[derive(Clone)]
pub struct MockNotifier {
    /// Counter for tracking number of messages sent
    message_count: Arc<AtomicU64>,
    /// Whether to simulate failures (for testing)
    simulate_failure: bool,
}

impl MockNotifier {
    /// Create a new mock notifier
    pub fn new() -> Self {
        Self {
            message_count: Arc::new(AtomicU64::new(0)),
            simulate_failure: false,
        }
    }

    /// Create a mock that fails every delivery
    pub fn failing() -> Self {
        Self {
            message_count: Arc::new(AtomicU64::new(0)),
            simulate_failure: true,
        }
    }

    /// Get the total number of messages sent
    pub fn message_count(&self) -> u64 {
        self.message_count.load(Ordering::SeqCst)
    }
}

impl Default for MockNotifier {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Notifier for MockNotifier {
    async fn send(
        &self,
        to: &str,
        subject: &str,
        template_id: &str,
        data: &HashMap<String, String>,
    ) -> Result<(), String> {
        if self.simulate_failure {
            warn!(
                to = %mask_email(to),
                "Mock notifier simulating delivery failure"
            );
            return Err("Simulated email delivery failure".to_string());
        }

        let body = render_template(template_id, data).map_err(|e| e.to_string())?;
        let count = self.message_count.fetch_add(1, Ordering::SeqCst) + 1;

        info!(
            target: "email",
            provider = "mock",
            to = %mask_email(to),
            subject,
            template = template_id,
            message_number = count,
            body_length = body.len(),
            "Email sent successfully (mock)"
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data() -> HashMap<String, String> {
        let mut data = HashMap::new();
        data.insert("name".to_string(), "Ada".to_string());
        data.insert("otp".to_string(), "4821".to_string());
        data
    }

    #[tokio::test]
    async fn test_mock_counts_deliveries() {
        let notifier = MockNotifier::new();

        for _ in 0..3 {
            notifier
                .send("a@x.com", "Verify Your Email", "user-activation-mail", &data())
                .await
                .unwrap();
        }
        assert_eq!(notifier.message_count(), 3);
    }

    #[tokio::test]
    async fn test_failing_mock_rejects_delivery() {
        let notifier = MockNotifier::failing();

        let result = notifier
            .send("a@x.com", "Verify Your Email", "user-activation-mail", &data())
            .await;
        assert!(result.is_err());
        assert_eq!(notifier.message_count(), 0);
    }
}
