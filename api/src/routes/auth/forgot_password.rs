use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::dto::auth::ForgotPasswordRequest;
use crate::handlers::{handle_domain_error, handle_validation_errors};

use mt_core::repositories::UserRepository;
use mt_core::services::otp::{mask_email, KeyValueStore, Notifier};
use mt_shared::types::response::MessageResponse;

use super::AppState;

/// Handler for POST /api/user-forgot-password
///
/// Issues a password-reset OTP to a registered email address. The flow is
/// restrictions, then request tracking, then issuance; the guard enforces
/// cooldown, spam lock, and verification lock in severity order.
///
/// ## Errors
/// - 400 Bad Request: invalid email
/// - 404 Not Found: no account under this email
/// - 429 Too Many Requests: cooldown, spam lock, or verification lock active
pub async fn user_forgot_password<U, S, N>(
    state: web::Data<AppState<U, S, N>>,
    request: web::Json<ForgotPasswordRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    S: KeyValueStore + 'static,
    N: Notifier + 'static,
{
    if let Err(errors) = request.validate() {
        return handle_validation_errors(errors);
    }

    log::info!(
        "Processing forgot-password request for {}",
        mask_email(&request.email)
    );

    match state.auth_service.forgot_password(&request.email).await {
        Ok(()) => HttpResponse::Ok().json(MessageResponse::new(
            "OTP sent to email. Please verify to reset your password",
        )),
        Err(error) => handle_domain_error(error),
    }
}
