//! MySQL implementation of the UserRepository trait.
//!
//! Concrete implementation of account persistence using MySQL with SQLx.
//! Database failures are reduced to `DomainError::Internal` so the core
//! never sees driver-specific errors.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use mt_core::domain::entities::user::{User, UserType};
use mt_core::errors::DomainError;
use mt_core::repositories::UserRepository;

const SELECT_USER_COLUMNS: &str = r#"
    SELECT id, name, email, password_hash, user_type,
           phone_number, country, created_at, updated_at
    FROM users
"#;

/// MySQL implementation of UserRepository
pub struct MySqlUserRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlUserRepository {
    /// Create a new MySQL user repository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert a database row to a User entity
    fn row_to_user(row: &sqlx::mysql::MySqlRow) -> Result<User, DomainError> {
        let id: String = row
            .try_get("id")
            .map_err(|e| internal(format!("Failed to get id: {}", e)))?;

        let user_type_str: String = row
            .try_get("user_type")
            .map_err(|e| internal(format!("Failed to get user_type: {}", e)))?;
        let user_type = match user_type_str.as_str() {
            "seller" => UserType::Seller,
            _ => UserType::User,
        };

        Ok(User {
            id: Uuid::parse_str(&id).map_err(|e| internal(format!("Invalid UUID: {}", e)))?,
            name: row
                .try_get("name")
                .map_err(|e| internal(format!("Failed to get name: {}", e)))?,
            email: row
                .try_get("email")
                .map_err(|e| internal(format!("Failed to get email: {}", e)))?,
            password_hash: row
                .try_get("password_hash")
                .map_err(|e| internal(format!("Failed to get password_hash: {}", e)))?,
            user_type,
            phone_number: row
                .try_get("phone_number")
                .map_err(|e| internal(format!("Failed to get phone_number: {}", e)))?,
            country: row
                .try_get("country")
                .map_err(|e| internal(format!("Failed to get country: {}", e)))?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| internal(format!("Failed to get created_at: {}", e)))?,
            updated_at: row
                .try_get::<DateTime<Utc>, _>("updated_at")
                .map_err(|e| internal(format!("Failed to get updated_at: {}", e)))?,
        })
    }

    fn user_type_str(user_type: UserType) -> &'static str {
        match user_type {
            UserType::User => "user",
            UserType::Seller => "seller",
        }
    }
}

#[async_trait]
impl UserRepository for MySqlUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let query = format!("{} WHERE email = ? LIMIT 1", SELECT_USER_COLUMNS);

        let result = sqlx::query(&query)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| internal(format!("Database query failed: {}", e)))?;

        match result {
            Some(row) => Ok(Some(Self::row_to_user(&row)?)),
            None => Ok(None),
        }
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, DomainError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE email = ?")
            .bind(email)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| internal(format!("Database query failed: {}", e)))?;

        Ok(count > 0)
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        let query = r#"
            INSERT INTO users (id, name, email, password_hash, user_type,
                               phone_number, country, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(user.id.to_string())
            .bind(&user.name)
            .bind(&user.email)
            .bind(&user.password_hash)
            .bind(Self::user_type_str(user.user_type))
            .bind(&user.phone_number)
            .bind(&user.country)
            .bind(user.created_at)
            .bind(user.updated_at)
            .execute(&self.pool)
            .await
            .map_err(|e| match &e {
                sqlx::Error::Database(db) if db.is_unique_violation() => {
                    DomainError::Validation {
                        message: "Email already registered".to_string(),
                    }
                }
                _ => internal(format!("Failed to create user: {}", e)),
            })?;

        Ok(user)
    }

    async fn update_password(&self, email: &str, password_hash: &str) -> Result<(), DomainError> {
        let result = sqlx::query("UPDATE users SET password_hash = ?, updated_at = ? WHERE email = ?")
            .bind(password_hash)
            .bind(Utc::now())
            .bind(email)
            .execute(&self.pool)
            .await
            .map_err(|e| internal(format!("Failed to update password: {}", e)))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound {
                resource: "User".to_string(),
            });
        }

        Ok(())
    }
}

fn internal(message: String) -> DomainError {
    DomainError::Internal { message }
}
