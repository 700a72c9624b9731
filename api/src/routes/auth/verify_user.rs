use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::dto::auth::VerifyUserRequest;
use crate::handlers::{handle_domain_error, handle_validation_errors};

use mt_core::repositories::UserRepository;
use mt_core::services::otp::{mask_email, KeyValueStore, Notifier};
use mt_shared::types::response::MessageResponse;

use super::AppState;

/// Handler for POST /api/verify-user
///
/// Completes a registration: verifies the activation OTP and creates the
/// account with a hashed password.
///
/// ## Errors
/// - 400 Bad Request: invalid body, wrong or expired OTP
/// - 409 Conflict: email already registered
/// - 429 Too Many Requests: verification lock active
pub async fn verify_user<U, S, N>(
    state: web::Data<AppState<U, S, N>>,
    request: web::Json<VerifyUserRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    S: KeyValueStore + 'static,
    N: Notifier + 'static,
{
    if let Err(errors) = request.validate() {
        return handle_validation_errors(errors);
    }

    let request = request.into_inner();
    let otp = request.otp.clone();
    let data = request.into_registration_data();
    log::info!(
        "Processing registration verification for {}",
        mask_email(&data.email)
    );

    match state.auth_service.verify_registration(&data, &otp).await {
        Ok(_user) => {
            HttpResponse::Created().json(MessageResponse::new("Account verified successfully"))
        }
        Err(error) => handle_domain_error(error),
    }
}
