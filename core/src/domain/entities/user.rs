//! User entity representing a registered account in the Mercato system.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Represents the type of account in the system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserType {
    /// A buyer shopping on the marketplace
    User,
    /// A seller operating a shop on the marketplace
    Seller,
}

/// User entity representing a registered account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier for the user
    pub id: Uuid,

    /// Display name
    pub name: String,

    /// Email address (unique, used as the verification subject)
    pub email: String,

    /// Bcrypt hash of the password; never the plaintext
    pub password_hash: String,

    /// Type of account (User or Seller)
    pub user_type: UserType,

    /// Contact phone number (required for sellers)
    pub phone_number: Option<String>,

    /// Country of operation (required for sellers)
    pub country: Option<String>,

    /// Timestamp when the user was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the user was last updated
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Creates a new User instance
    pub fn new(
        name: String,
        email: String,
        password_hash: String,
        user_type: UserType,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name,
            email,
            password_hash,
            user_type,
            phone_number: None,
            country: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Attach seller contact details
    pub fn with_seller_details(mut self, phone_number: String, country: String) -> Self {
        self.phone_number = Some(phone_number);
        self.country = Some(country);
        self
    }

    /// Replace the stored password hash
    pub fn set_password_hash(&mut self, password_hash: String) {
        self.password_hash = password_hash;
        self.updated_at = Utc::now();
    }

    /// Checks if the account is a seller
    pub fn is_seller(&self) -> bool {
        self.user_type == UserType::Seller
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_user_creation() {
        let user = User::new(
            "Ada".to_string(),
            "ada@example.com".to_string(),
            "$2b$10$hash".to_string(),
            UserType::User,
        );

        assert_eq!(user.name, "Ada");
        assert_eq!(user.email, "ada@example.com");
        assert!(!user.is_seller());
        assert!(user.phone_number.is_none());
        assert_eq!(user.created_at, user.updated_at);
    }

    #[test]
    fn test_seller_details() {
        let user = User::new(
            "Shop One".to_string(),
            "shop@example.com".to_string(),
            "$2b$10$hash".to_string(),
            UserType::Seller,
        )
        .with_seller_details("+61412345678".to_string(), "AU".to_string());

        assert!(user.is_seller());
        assert_eq!(user.phone_number.as_deref(), Some("+61412345678"));
        assert_eq!(user.country.as_deref(), Some("AU"));
    }

    #[test]
    fn test_set_password_hash_touches_updated_at() {
        let mut user = User::new(
            "Ada".to_string(),
            "ada@example.com".to_string(),
            "$2b$10$old".to_string(),
            UserType::User,
        );
        let before = user.updated_at;
        user.set_password_hash("$2b$10$new".to_string());

        assert_eq!(user.password_hash, "$2b$10$new");
        assert!(user.updated_at >= before);
    }
}
