//! # Infrastructure Layer
//!
//! Concrete implementations of the core collaborator traits:
//! - **Cache**: Redis key-value store backing all OTP state
//! - **Email**: SMTP delivery via lettre, plus a recording mock
//! - **Database**: MySQL user repository using SQLx

/// Cache module - Redis client and the key-value store adapter
pub mod cache;

/// Database module - MySQL implementations using SQLx
pub mod database;

/// Email module - SMTP notifier and templates
pub mod email;

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Redis cache error
    #[error("Cache error: {0}")]
    Cache(#[from] redis::RedisError),

    /// Email delivery error
    #[error("Email error: {0}")]
    Email(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
