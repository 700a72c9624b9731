use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::dto::auth::UserRegistrationRequest;
use crate::handlers::{handle_domain_error, handle_validation_errors};

use mt_core::repositories::UserRepository;
use mt_core::services::otp::{mask_email, KeyValueStore, Notifier};
use mt_shared::types::response::MessageResponse;

use super::AppState;

/// Handler for POST /api/user-registration
///
/// Starts a registration by emailing an activation OTP. No account is
/// created until the code is verified via `/api/verify-user`.
///
/// # Request Body
///
/// ```json
/// {
///     "name": "Ada",
///     "email": "ada@example.com",
///     "password": "s3cret-pass",
///     "user_type": "seller",
///     "phone_number": "+61412345678",
///     "country": "AU"
/// }
/// ```
///
/// ## Errors
/// - 400 Bad Request: invalid body or missing seller fields
/// - 409 Conflict: email already registered
/// - 429 Too Many Requests: cooldown, spam lock, or verification lock active
pub async fn user_registration<U, S, N>(
    state: web::Data<AppState<U, S, N>>,
    request: web::Json<UserRegistrationRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    S: KeyValueStore + 'static,
    N: Notifier + 'static,
{
    if let Err(errors) = request.validate() {
        return handle_validation_errors(errors);
    }

    let data = request.into_inner().into_registration_data();
    log::info!(
        "Processing registration request for {}",
        mask_email(&data.email)
    );

    match state.auth_service.register(&data).await {
        Ok(()) => HttpResponse::Ok().json(MessageResponse::new(
            "OTP sent to email. Please verify your account",
        )),
        Err(error) => handle_domain_error(error),
    }
}
