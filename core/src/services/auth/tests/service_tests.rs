//! Behavior tests for registration and password recovery flows

use std::sync::Arc;

use mt_shared::config::OtpConfig;

use crate::domain::entities::user::{User, UserType};
use crate::errors::{AuthError, DomainError, ValidationError};
use crate::repositories::MockUserRepository;
use crate::services::auth::{AuthService, RegistrationData};
use crate::services::otp::tests::mocks::{InMemoryStore, RecordingNotifier};

const EMAIL: &str = "ada@example.com";

fn service() -> (
    AuthService<MockUserRepository, InMemoryStore, RecordingNotifier>,
    Arc<MockUserRepository>,
    Arc<RecordingNotifier>,
) {
    let users = Arc::new(MockUserRepository::new());
    let store = Arc::new(InMemoryStore::new());
    let notifier = Arc::new(RecordingNotifier::new());
    let service = AuthService::new(
        users.clone(),
        store,
        notifier.clone(),
        OtpConfig::default(),
    );
    (service, users, notifier)
}

fn registration(email: &str) -> RegistrationData {
    RegistrationData {
        name: "Ada".to_string(),
        email: email.to_string(),
        password: "s3cret-pass".to_string(),
        user_type: UserType::User,
        phone_number: None,
        country: None,
    }
}

async fn seeded_user(users: &MockUserRepository, email: &str, password: &str) -> User {
    let hash = bcrypt::hash(password, 4).unwrap();
    let user = User::new("Ada".to_string(), email.to_string(), hash, UserType::User);
    users.insert(user.clone()).await;
    user
}

#[tokio::test(start_paused = true)]
async fn register_issues_activation_otp_without_creating_user() {
    let (service, users, notifier) = service();

    service.register(&registration(EMAIL)).await.unwrap();

    let sent = notifier.last_sent().await.unwrap();
    assert_eq!(sent.to, EMAIL);
    assert_eq!(sent.template_id, "user-activation-mail");
    assert!(sent.data.contains_key("otp"));

    use crate::repositories::UserRepository;
    assert!(!users.exists_by_email(EMAIL).await.unwrap());
}

#[tokio::test(start_paused = true)]
async fn register_rejects_existing_email() {
    let (service, users, _) = service();
    seeded_user(&users, EMAIL, "old-pass").await;

    let result = service.register(&registration(EMAIL)).await;
    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::UserAlreadyExists))
    ));
}

#[tokio::test(start_paused = true)]
async fn register_rejects_missing_fields() {
    let (service, _, _) = service();

    let mut data = registration(EMAIL);
    data.password = String::new();

    let result = service.register(&data).await;
    assert!(matches!(
        result,
        Err(DomainError::ValidationErr(ValidationError::MissingFields))
    ));
}

#[tokio::test(start_paused = true)]
async fn register_rejects_invalid_email() {
    let (service, _, _) = service();

    let result = service.register(&registration("not-an-email")).await;
    assert!(matches!(
        result,
        Err(DomainError::ValidationErr(ValidationError::InvalidEmail))
    ));
}

#[tokio::test(start_paused = true)]
async fn seller_registration_requires_contact_details() {
    let (service, _, notifier) = service();

    let mut data = registration("shop@example.com");
    data.user_type = UserType::Seller;

    let result = service.register(&data).await;
    assert!(matches!(
        result,
        Err(DomainError::ValidationErr(ValidationError::MissingFields))
    ));

    data.phone_number = Some("+61412345678".to_string());
    data.country = Some("AU".to_string());
    service.register(&data).await.unwrap();
    assert_eq!(notifier.sent_count().await, 1);
}

#[tokio::test(start_paused = true)]
async fn verify_registration_creates_account_with_hashed_password() {
    let (service, users, notifier) = service();
    let data = registration(EMAIL);

    service.register(&data).await.unwrap();
    let otp = notifier.last_otp().await.unwrap();

    let user = service.verify_registration(&data, &otp).await.unwrap();
    assert_eq!(user.email, EMAIL);
    assert_ne!(user.password_hash, data.password);
    assert!(bcrypt::verify(&data.password, &user.password_hash).unwrap());

    use crate::repositories::UserRepository;
    assert!(users.exists_by_email(EMAIL).await.unwrap());
}

#[tokio::test(start_paused = true)]
async fn verify_registration_rejects_wrong_otp() {
    let (service, _, notifier) = service();
    let data = registration(EMAIL);

    service.register(&data).await.unwrap();
    let otp = notifier.last_otp().await.unwrap();
    let wrong = if otp == "1234" { "4321" } else { "1234" };

    let result = service.verify_registration(&data, wrong).await;
    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::IncorrectOtp { remaining: 2 }))
    ));
}

#[tokio::test(start_paused = true)]
async fn forgot_password_requires_known_account() {
    let (service, _, _) = service();

    let result = service.forgot_password(EMAIL).await;
    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::UserNotFound))
    ));
}

#[tokio::test(start_paused = true)]
async fn forgot_password_issues_reset_otp() {
    let (service, users, notifier) = service();
    seeded_user(&users, EMAIL, "old-pass").await;

    service.forgot_password(EMAIL).await.unwrap();

    let sent = notifier.last_sent().await.unwrap();
    assert_eq!(sent.template_id, "forgot-password-user-mail");
    assert_eq!(sent.data.get("name").map(String::as_str), Some("Ada"));
}

#[tokio::test(start_paused = true)]
async fn forgot_password_honors_cooldown() {
    let (service, users, _) = service();
    seeded_user(&users, EMAIL, "old-pass").await;

    service.forgot_password(EMAIL).await.unwrap();
    let result = service.forgot_password(EMAIL).await;
    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::OtpCooldown))
    ));
}

#[tokio::test(start_paused = true)]
async fn verify_forgot_password_accepts_issued_otp() {
    let (service, users, notifier) = service();
    seeded_user(&users, EMAIL, "old-pass").await;

    service.forgot_password(EMAIL).await.unwrap();
    let otp = notifier.last_otp().await.unwrap();

    assert!(service.verify_forgot_password(EMAIL, &otp).await.is_ok());
}

#[tokio::test(start_paused = true)]
async fn reset_password_rejects_reuse() {
    let (service, users, _) = service();
    seeded_user(&users, EMAIL, "old-pass").await;

    let result = service.reset_password(EMAIL, "old-pass").await;
    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::PasswordReuse))
    ));
}

#[tokio::test(start_paused = true)]
async fn reset_password_updates_stored_hash() {
    let (service, users, _) = service();
    seeded_user(&users, EMAIL, "old-pass").await;

    service.reset_password(EMAIL, "brand-new-pass").await.unwrap();

    use crate::repositories::UserRepository;
    let user = users.find_by_email(EMAIL).await.unwrap().unwrap();
    assert!(bcrypt::verify("brand-new-pass", &user.password_hash).unwrap());
    assert!(!bcrypt::verify("old-pass", &user.password_hash).unwrap());
}

#[tokio::test(start_paused = true)]
async fn reset_password_requires_known_account() {
    let (service, _, _) = service();

    let result = service.reset_password(EMAIL, "whatever").await;
    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::UserNotFound))
    ));
}
