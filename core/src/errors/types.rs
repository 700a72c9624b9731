//! Domain-specific error types for authentication and OTP operations
//!
//! Error messages are the user-facing strings; the presentation layer maps
//! each variant to an HTTP status and serializes one uniform error body.

use thiserror::Error;

/// Authentication and OTP lifecycle errors
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Account locked due to multiple failed attempts. Try again after 30 minutes")]
    AccountLocked,

    #[error("Too many OTP requests. Please wait 1 hour before requesting again")]
    OtpSpamLocked,

    #[error("Please wait 1 minute before requesting a new OTP")]
    OtpCooldown,

    #[error("Invalid or expired OTP")]
    OtpExpired,

    #[error("Incorrect OTP. {remaining} attempts left")]
    IncorrectOtp { remaining: u32 },

    #[error("Too many failed attempts. Account locked for 30 minutes")]
    MaxAttemptsExceeded,

    #[error("Failed to send OTP email. Please try again later")]
    EmailDeliveryFailure,

    #[error("User not found")]
    UserNotFound,

    #[error("User already exists with this email")]
    UserAlreadyExists,

    #[error("New password cannot be the same as the old password")]
    PasswordReuse,
}

/// Input validation errors
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Missing required fields")]
    MissingFields,

    #[error("Required field: {field}")]
    RequiredField { field: String },

    #[error("Invalid email format")]
    InvalidEmail,

    #[error("Invalid format for field: {field}")]
    InvalidFormat { field: String },

    #[error("Invalid length for field: {field} (expected: {expected}, actual: {actual})")]
    InvalidLength {
        field: String,
        expected: usize,
        actual: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_error_messages() {
        assert_eq!(
            AuthError::OtpCooldown.to_string(),
            "Please wait 1 minute before requesting a new OTP"
        );
        assert_eq!(
            AuthError::IncorrectOtp { remaining: 1 }.to_string(),
            "Incorrect OTP. 1 attempts left"
        );
    }

    #[test]
    fn test_validation_error_with_fields() {
        let error = ValidationError::RequiredField {
            field: "email".to_string(),
        };
        assert!(error.to_string().contains("email"));
    }
}
