//! Authentication service implementation

use std::sync::Arc;

use mt_shared::config::OtpConfig;
use mt_shared::utils::validation;

use crate::domain::entities::user::{User, UserType};
use crate::errors::{AuthError, DomainError, DomainResult, ValidationError};
use crate::repositories::UserRepository;
use crate::services::otp::{mask_email, KeyValueStore, Notifier, OtpGuard};

/// Mail template for registration verification
const USER_ACTIVATION_TEMPLATE: &str = "user-activation-mail";

/// Mail template for password recovery
const FORGOT_PASSWORD_TEMPLATE: &str = "forgot-password-user-mail";

/// Registration input shared by the request and verification steps
#[derive(Debug, Clone)]
pub struct RegistrationData {
    pub name: String,
    pub email: String,
    pub password: String,
    pub user_type: UserType,
    /// Required for sellers
    pub phone_number: Option<String>,
    /// Required for sellers
    pub country: Option<String>,
}

/// Authentication service for registration and password recovery
///
/// Owns no OTP state itself; everything goes through the [`OtpGuard`].
pub struct AuthService<U, S, N>
where
    U: UserRepository,
    S: KeyValueStore,
    N: Notifier,
{
    /// User account persistence
    user_repository: Arc<U>,
    /// OTP issuance and verification policy
    otp_guard: OtpGuard<S, N>,
}

impl<U, S, N> AuthService<U, S, N>
where
    U: UserRepository,
    S: KeyValueStore,
    N: Notifier,
{
    /// Create a new authentication service
    pub fn new(
        user_repository: Arc<U>,
        store: Arc<S>,
        notifier: Arc<N>,
        otp_config: OtpConfig,
    ) -> Self {
        Self {
            user_repository,
            otp_guard: OtpGuard::new(store, notifier, otp_config),
        }
    }

    /// Start a registration by issuing a verification OTP
    ///
    /// No account is written yet; the user only exists once
    /// [`verify_registration`](Self::verify_registration) succeeds.
    pub async fn register(&self, data: &RegistrationData) -> DomainResult<()> {
        validate_registration(data)?;

        if self.user_repository.exists_by_email(&data.email).await? {
            return Err(AuthError::UserAlreadyExists.into());
        }

        self.otp_guard.check_restrictions(&data.email).await?;
        self.otp_guard.track_request(&data.email).await?;
        self.otp_guard
            .issue(&data.name, &data.email, USER_ACTIVATION_TEMPLATE)
            .await?;

        tracing::info!(
            email = %mask_email(&data.email),
            event = "registration_started",
            "Registration OTP issued"
        );

        Ok(())
    }

    /// Complete a registration by verifying the OTP and creating the account
    pub async fn verify_registration(
        &self,
        data: &RegistrationData,
        otp: &str,
    ) -> DomainResult<User> {
        validate_registration(data)?;

        if self.user_repository.exists_by_email(&data.email).await? {
            return Err(AuthError::UserAlreadyExists.into());
        }

        self.otp_guard.verify(&data.email, otp).await?;

        let password_hash = hash_password(&data.password)?;
        let mut user = User::new(
            data.name.clone(),
            data.email.clone(),
            password_hash,
            data.user_type,
        );
        if let (Some(phone), Some(country)) = (&data.phone_number, &data.country) {
            user = user.with_seller_details(phone.clone(), country.clone());
        }

        let user = self.user_repository.create(user).await?;

        tracing::info!(
            email = %mask_email(&user.email),
            user_id = %user.id,
            event = "registration_completed",
            "User account created"
        );

        Ok(user)
    }

    /// Start a password reset by issuing an OTP to a known account
    ///
    /// Restrictions are checked before the request is tracked, and tracking
    /// happens before issuance. Always in that order.
    pub async fn forgot_password(&self, email: &str) -> DomainResult<()> {
        if !validation::is_valid_email(email) {
            return Err(ValidationError::InvalidEmail.into());
        }

        let user = self
            .user_repository
            .find_by_email(email)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        self.otp_guard.check_restrictions(email).await?;
        self.otp_guard.track_request(email).await?;
        self.otp_guard
            .issue(&user.name, email, FORGOT_PASSWORD_TEMPLATE)
            .await?;

        tracing::info!(
            email = %mask_email(email),
            event = "password_reset_started",
            "Password reset OTP issued"
        );

        Ok(())
    }

    /// Verify a password-reset OTP
    ///
    /// Success means the caller may proceed to
    /// [`reset_password`](Self::reset_password).
    pub async fn verify_forgot_password(&self, email: &str, otp: &str) -> DomainResult<()> {
        if !validation::not_empty(email) || !validation::not_empty(otp) {
            return Err(ValidationError::MissingFields.into());
        }

        self.otp_guard.verify(email, otp).await
    }

    /// Replace the password of a known account
    ///
    /// The new password must differ from the current one.
    pub async fn reset_password(&self, email: &str, new_password: &str) -> DomainResult<()> {
        if !validation::not_empty(email) || !validation::not_empty(new_password) {
            return Err(ValidationError::MissingFields.into());
        }

        let user = self
            .user_repository
            .find_by_email(email)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        let same_as_old =
            bcrypt::verify(new_password, &user.password_hash).map_err(|e| {
                DomainError::Internal {
                    message: format!("Failed to compare password: {}", e),
                }
            })?;
        if same_as_old {
            return Err(AuthError::PasswordReuse.into());
        }

        let password_hash = hash_password(new_password)?;
        self.user_repository
            .update_password(email, &password_hash)
            .await?;

        tracing::info!(
            email = %mask_email(email),
            event = "password_reset_completed",
            "Password updated"
        );

        Ok(())
    }
}

/// Validate registration input
///
/// Sellers additionally require a phone number and country.
fn validate_registration(data: &RegistrationData) -> DomainResult<()> {
    let mut missing = !validation::not_empty(&data.name)
        || !validation::not_empty(&data.email)
        || !validation::not_empty(&data.password);

    if data.user_type == UserType::Seller {
        missing = missing
            || data.phone_number.as_deref().map_or(true, |p| !validation::not_empty(p))
            || data.country.as_deref().map_or(true, |c| !validation::not_empty(c));
    }

    if missing {
        return Err(ValidationError::MissingFields.into());
    }

    if !validation::is_valid_email(&data.email) {
        return Err(ValidationError::InvalidEmail.into());
    }

    Ok(())
}

/// Hash a password with bcrypt
fn hash_password(password: &str) -> DomainResult<String> {
    bcrypt::hash(password, bcrypt::DEFAULT_COST).map_err(|e| DomainError::Internal {
        message: format!("Failed to hash password: {}", e),
    })
}
