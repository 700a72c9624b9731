use serde::{Deserialize, Serialize};
use validator::Validate;

use mt_core::domain::entities::user::UserType;
use mt_core::services::auth::RegistrationData;

/// Body for POST /api/user-registration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UserRegistrationRequest {
    /// Display name
    #[validate(length(min = 1, max = 100))]
    pub name: String,

    /// Email address the OTP is sent to
    #[validate(email)]
    pub email: String,

    /// Plaintext password, hashed before storage
    #[validate(length(min = 6, max = 128))]
    pub password: String,

    /// "user" (default) or "seller"
    #[serde(default)]
    pub user_type: Option<UserType>,

    /// Contact phone number (required for sellers)
    pub phone_number: Option<String>,

    /// Country of operation (required for sellers)
    pub country: Option<String>,
}

impl UserRegistrationRequest {
    /// Convert into the core registration input
    pub fn into_registration_data(self) -> RegistrationData {
        RegistrationData {
            name: self.name,
            email: self.email,
            password: self.password,
            user_type: self.user_type.unwrap_or(UserType::User),
            phone_number: self.phone_number,
            country: self.country,
        }
    }
}

/// Body for POST /api/verify-user
///
/// Carries the registration data again: no account exists until the OTP
/// checks out.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct VerifyUserRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,

    #[validate(email)]
    pub email: String,

    #[validate(length(min = 6, max = 128))]
    pub password: String,

    /// 4-digit code from the activation email
    #[validate(length(equal = 4))]
    pub otp: String,

    #[serde(default)]
    pub user_type: Option<UserType>,

    pub phone_number: Option<String>,

    pub country: Option<String>,
}

impl VerifyUserRequest {
    /// Convert into the core registration input, dropping the OTP
    pub fn into_registration_data(self) -> RegistrationData {
        RegistrationData {
            name: self.name,
            email: self.email,
            password: self.password,
            user_type: self.user_type.unwrap_or(UserType::User),
            phone_number: self.phone_number,
            country: self.country,
        }
    }
}

/// Body for POST /api/user-forgot-password
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ForgotPasswordRequest {
    #[validate(email)]
    pub email: String,
}

/// Body for POST /api/verify-user-forgot-password
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct VerifyForgotPasswordRequest {
    #[validate(email)]
    pub email: String,

    /// 4-digit code from the reset email
    #[validate(length(equal = 4))]
    pub otp: String,
}

/// Body for POST /api/reset-user-password
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ResetPasswordRequest {
    #[validate(email)]
    pub email: String,

    #[validate(length(min = 6, max = 128))]
    pub new_password: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registration_request_validation() {
        let request = UserRegistrationRequest {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            password: "s3cret-pass".to_string(),
            user_type: None,
            phone_number: None,
            country: None,
        };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_registration_rejects_short_password() {
        let request = UserRegistrationRequest {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            password: "short".to_string(),
            user_type: None,
            phone_number: None,
            country: None,
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_otp_must_be_four_digits() {
        let mut request = VerifyForgotPasswordRequest {
            email: "ada@example.com".to_string(),
            otp: "4821".to_string(),
        };
        assert!(request.validate().is_ok());

        request.otp = "482".to_string();
        assert!(request.validate().is_err());

        request.otp = "48213".to_string();
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_forgot_password_rejects_bad_email() {
        let request = ForgotPasswordRequest {
            email: "not-an-email".to_string(),
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_user_type_defaults_to_user() {
        let request: UserRegistrationRequest = serde_json::from_value(serde_json::json!({
            "name": "Ada",
            "email": "ada@example.com",
            "password": "s3cret-pass"
        }))
        .unwrap();
        let data = request.into_registration_data();
        assert_eq!(data.user_type, UserType::User);
    }
}
