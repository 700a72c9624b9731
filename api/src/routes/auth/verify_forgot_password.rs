use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::dto::auth::VerifyForgotPasswordRequest;
use crate::handlers::{handle_domain_error, handle_validation_errors};

use mt_core::repositories::UserRepository;
use mt_core::services::otp::{mask_email, KeyValueStore, Notifier};
use mt_shared::types::response::MessageResponse;

use super::AppState;

/// Handler for POST /api/verify-user-forgot-password
///
/// Verifies a password-reset OTP. Success means the client may proceed to
/// `/api/reset-user-password`.
///
/// ## Errors
/// - 400 Bad Request: invalid body, wrong or expired OTP
/// - 429 Too Many Requests: verification lock active
pub async fn verify_user_forgot_password<U, S, N>(
    state: web::Data<AppState<U, S, N>>,
    request: web::Json<VerifyForgotPasswordRequest>,
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
        "Processing forgot-password OTP verification for {}",
        mask_email(&request.email)
    );

    match state
        .auth_service
        .verify_forgot_password(&request.email, &request.otp)
        .await
    {
        Ok(()) => HttpResponse::Ok().json(MessageResponse::new(
            "OTP verified. You can now reset your password",
        )),
        Err(error) => handle_domain_error(error),
    }
}
