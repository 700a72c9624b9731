//! Domain error to HTTP response mapping
//!
//! Every failure leaving the API goes through this module so the wire
//! shape stays uniform: `{"status": "error", "message": ..., "details"?}`.
//! Internal errors are logged server-side and reduced to a generic 500
//! body; their text never reaches the client.

use actix_web::HttpResponse;

use mt_core::errors::{AuthError, DomainError};
use mt_shared::types::response::ErrorBody;

/// Convert domain errors to appropriate HTTP responses
pub fn handle_domain_error(error: DomainError) -> HttpResponse {
    match error {
        DomainError::Auth(auth_error) => handle_auth_error(auth_error),
        DomainError::ValidationErr(validation_error) => {
            HttpResponse::BadRequest().json(ErrorBody::new(validation_error.to_string()))
        }
        DomainError::Validation { message } => {
            HttpResponse::BadRequest().json(ErrorBody::new(message))
        }
        DomainError::NotFound { resource } => {
            HttpResponse::NotFound().json(ErrorBody::new(format!("{} not found", resource)))
        }
        DomainError::Internal { message } => {
            log::error!("Internal error: {}", message);
            HttpResponse::InternalServerError().json(ErrorBody::new("Internal server error"))
        }
    }
}

fn handle_auth_error(error: AuthError) -> HttpResponse {
    let message = error.to_string();
    match error {
        // Active restriction: the client must wait it out
        AuthError::AccountLocked
        | AuthError::OtpSpamLocked
        | AuthError::OtpCooldown
        | AuthError::MaxAttemptsExceeded => {
            HttpResponse::TooManyRequests().json(ErrorBody::new(message))
        }
        AuthError::OtpExpired => HttpResponse::BadRequest().json(ErrorBody::new(message)),
        AuthError::IncorrectOtp { remaining } => HttpResponse::BadRequest().json(
            ErrorBody::new(message).with_detail("remaining_attempts", serde_json::json!(remaining)),
        ),
        AuthError::EmailDeliveryFailure => {
            HttpResponse::ServiceUnavailable().json(ErrorBody::new(message))
        }
        AuthError::UserNotFound => HttpResponse::NotFound().json(ErrorBody::new(message)),
        AuthError::UserAlreadyExists => HttpResponse::Conflict().json(ErrorBody::new(message)),
        AuthError::PasswordReuse => HttpResponse::BadRequest().json(ErrorBody::new(message)),
    }
}

/// Convert DTO validation failures to a 400 with field-level details
pub fn handle_validation_errors(errors: validator::ValidationErrors) -> HttpResponse {
    let mut body = ErrorBody::new("Invalid request data");
    for (field, field_errors) in errors.field_errors() {
        let messages: Vec<String> = field_errors
            .iter()
            .map(|e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string())
            })
            .collect();
        body = body.with_detail(field, serde_json::json!(messages));
    }
    HttpResponse::BadRequest().json(body)
}
