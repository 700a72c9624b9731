//! Shared utilities and common types for the Mercato server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types
//! - Response and error body structures
//! - Validation utilities (email format, required fields)

pub mod config;
pub mod types;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{AppConfig, CacheConfig, DatabaseConfig, EmailConfig, OtpConfig, ServerConfig};
pub use types::response::{ErrorBody, MessageResponse, ResponseStatus};
pub use utils::validation;
