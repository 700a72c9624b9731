use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::dto::auth::ResetPasswordRequest;
use crate::handlers::{handle_domain_error, handle_validation_errors};

use mt_core::repositories::UserRepository;
use mt_core::services::otp::{mask_email, KeyValueStore, Notifier};
use mt_shared::types::response::MessageResponse;

use super::AppState;

/// Handler for POST /api/reset-user-password
///
/// Replaces the password of a registered account. The new password must
/// differ from the current one.
///
/// ## Errors
/// - 400 Bad Request: invalid body or password reuse
/// - 404 Not Found: no account under this email
pub async fn reset_user_password<U, S, N>(
    state: web::Data<AppState<U, S, N>>,
    request: web::Json<ResetPasswordRequest>,
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
        "Processing password reset for {}",
        mask_email(&request.email)
    );

    match state
        .auth_service
        .reset_password(&request.email, &request.new_password)
        .await
    {
        Ok(()) => HttpResponse::Ok().json(MessageResponse::new("Password reset successfully")),
        Err(error) => handle_domain_error(error),
    }
}
