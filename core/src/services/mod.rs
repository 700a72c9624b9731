//! Business services

pub mod auth;
pub mod otp;

pub use auth::AuthService;
pub use otp::{mask_email, KeyValueStore, Notifier, OtpGuard};
