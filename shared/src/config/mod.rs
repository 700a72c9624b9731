//! Configuration module with business-specific sub-modules
//!
//! This module organizes configuration into logical areas:
//! - `cache` - Redis connection configuration
//! - `database` - MySQL connection configuration
//! - `email` - SMTP transport and sender configuration
//! - `otp` - OTP issuance and verification policy
//! - `server` - HTTP server configuration

pub mod cache;
pub mod database;
pub mod email;
pub mod otp;
pub mod server;

use serde::{Deserialize, Serialize};

// Re-export commonly used types
pub use cache::CacheConfig;
pub use database::DatabaseConfig;
pub use email::EmailConfig;
pub use otp::OtpConfig;
pub use server::ServerConfig;

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// HTTP server configuration
    pub server: ServerConfig,

    /// Redis cache configuration
    pub cache: CacheConfig,

    /// MySQL database configuration
    pub database: DatabaseConfig,

    /// Email delivery configuration
    pub email: EmailConfig,

    /// OTP policy configuration
    pub otp: OtpConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            cache: CacheConfig::default(),
            database: DatabaseConfig::default(),
            email: EmailConfig::default(),
            otp: OtpConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load the complete configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            server: ServerConfig::from_env(),
            cache: CacheConfig::from_env(),
            database: DatabaseConfig::from_env(),
            email: EmailConfig::from_env(),
            otp: OtpConfig::default(),
        }
    }
}
