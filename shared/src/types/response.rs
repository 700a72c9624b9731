//! API response types and wrappers

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Response status enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
    Success,
    Error,
}

/// Simple success body carrying a human-readable message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Human-readable outcome message
    pub message: String,
}

impl MessageResponse {
    /// Create a new message response
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Standardized error body for all failure responses
///
/// Every error response carries `status` fixed to `"error"`, a
/// human-readable `message`, and an optional `details` payload. Internal
/// failures are reduced to a generic message before they reach this type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Always `ResponseStatus::Error`
    pub status: ResponseStatus,

    /// Human-readable error message
    pub message: String,

    /// Optional additional error details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<HashMap<String, serde_json::Value>>,
}

impl ErrorBody {
    /// Create a new error body
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            status: ResponseStatus::Error,
            message: message.into(),
            details: None,
        }
    }

    /// Attach a details payload
    pub fn with_details(mut self, details: HashMap<String, serde_json::Value>) -> Self {
        self.details = Some(details);
        self
    }

    /// Attach a single detail entry
    pub fn with_detail(mut self, key: impl ToString, value: serde_json::Value) -> Self {
        let mut details = self.details.unwrap_or_default();
        details.insert(key.to_string(), value);
        self.details = Some(details);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_body_shape() {
        let body = ErrorBody::new("User not found");
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["status"], "error");
        assert_eq!(json["message"], "User not found");
        assert!(json.get("details").is_none());
    }

    #[test]
    fn test_error_body_with_details() {
        let body = ErrorBody::new("Incorrect OTP. 1 attempts left")
            .with_detail("remaining", serde_json::json!(1));
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["details"]["remaining"], 1);
    }

    #[test]
    fn test_message_response() {
        let body = MessageResponse::new("OTP sent to email. Please verify your account");
        let json = serde_json::to_value(&body).unwrap();
        assert!(json["message"].as_str().unwrap().contains("OTP sent"));
    }
}
