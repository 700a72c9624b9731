//! Authentication routes
//!
//! One handler per endpoint, all generic over the collaborator traits so
//! tests can wire in doubles.

mod forgot_password;
mod register;
mod reset_password;
mod verify_forgot_password;
mod verify_user;

use actix_web::web;
use std::sync::Arc;

use mt_core::repositories::UserRepository;
use mt_core::services::auth::AuthService;
use mt_core::services::otp::{KeyValueStore, Notifier};

pub use forgot_password::user_forgot_password;
pub use register::user_registration;
pub use reset_password::reset_user_password;
pub use verify_forgot_password::verify_user_forgot_password;
pub use verify_user::verify_user;

/// Application state that holds shared services
pub struct AppState<U, S, N>
where
    U: UserRepository,
    S: KeyValueStore,
    N: Notifier,
{
    pub auth_service: Arc<AuthService<U, S, N>>,
}

/// Register the auth routes under the current scope
pub fn configure<U, S, N>(cfg: &mut web::ServiceConfig)
where
    U: UserRepository + 'static,
    S: KeyValueStore + 'static,
    N: Notifier + 'static,
{
    cfg.route("/user-registration", web::post().to(user_registration::<U, S, N>))
        .route("/verify-user", web::post().to(verify_user::<U, S, N>))
        .route(
            "/user-forgot-password",
            web::post().to(user_forgot_password::<U, S, N>),
        )
        .route(
            "/verify-user-forgot-password",
            web::post().to(verify_user_forgot_password::<U, S, N>),
        )
        .route(
            "/reset-user-password",
            web::post().to(reset_user_password::<U, S, N>),
        );
}
