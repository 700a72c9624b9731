//! User repository trait defining the interface for account persistence.
//!
//! The trait is async-first and returns `DomainError` so that core services
//! never see database-specific failures. Implementations live in the
//! infrastructure layer.

use async_trait::async_trait;

use crate::domain::entities::user::User;
use crate::errors::DomainError;

/// Repository trait for User entity persistence operations
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by their email address
    ///
    /// # Returns
    /// * `Ok(Some(User))` - User found
    /// * `Ok(None)` - No user registered under this email
    /// * `Err(DomainError)` - Database or other error occurred
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;

    /// Check if a user exists with the given email address
    async fn exists_by_email(&self, email: &str) -> Result<bool, DomainError>;

    /// Create a new user in the repository
    ///
    /// Fails with a validation error when the email is already taken.
    async fn create(&self, user: User) -> Result<User, DomainError>;

    /// Replace the stored password hash for the given email
    ///
    /// # Returns
    /// * `Ok(())` - Password hash updated
    /// * `Err(DomainError::NotFound)` - No user registered under this email
    async fn update_password(&self, email: &str, password_hash: &str) -> Result<(), DomainError>;
}
