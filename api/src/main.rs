use actix_web::{middleware::Logger, web, App, HttpResponse, HttpServer};
use anyhow::Context;
use sqlx::mysql::MySqlPoolOptions;
use std::sync::Arc;
use std::time::Duration;

use mt_api::middleware::cors::create_cors;
use mt_api::routes::{self, AppState};
use mt_core::services::auth::AuthService;
use mt_infra::cache::{RedisClient, RedisStore};
use mt_infra::database::MySqlUserRepository;
use mt_infra::email::SmtpNotifier;
use mt_shared::config::AppConfig;
use mt_shared::types::response::ErrorBody;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    log::info!("Starting Mercato auth service");

    let config = AppConfig::from_env();
    let bind_address = config.server.bind_address();

    // Wire up infrastructure
    let redis_client = RedisClient::new(&config.cache)
        .await
        .context("Failed to connect to Redis")?;
    let store = Arc::new(RedisStore::new(redis_client.clone(), config.cache.clone()));

    let notifier = Arc::new(SmtpNotifier::new(&config.email).context("Failed to build mailer")?);

    let pool = MySqlPoolOptions::new()
        .max_connections(config.database.max_connections)
        .acquire_timeout(Duration::from_secs(config.database.connect_timeout))
        .connect(&config.database.url)
        .await
        .context("Failed to connect to MySQL")?;
    let user_repository = Arc::new(MySqlUserRepository::new(pool));

    let auth_service = Arc::new(AuthService::new(
        user_repository,
        store,
        notifier,
        config.otp.clone(),
    ));
    let state = web::Data::new(AppState { auth_service });
    let redis_data = web::Data::new(redis_client);

    log::info!("Auth service listening at http://{}/api", bind_address);

    let cors_origins = config.server.cors_origins.clone();
    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(create_cors(&cors_origins))
            .app_data(state.clone())
            .app_data(redis_data.clone())
            // Health check endpoint
            .route("/health", web::get().to(health_check))
            // Auth routes
            .service(
                web::scope("/api").configure(
                    routes::auth::configure::<MySqlUserRepository, RedisStore, SmtpNotifier>,
                ),
            )
            // Default 404 handler
            .default_service(web::route().to(not_found))
    })
    .bind(&bind_address)?
    .run()
    .await?;

    Ok(())
}

async fn health_check(redis: web::Data<RedisClient>) -> HttpResponse {
    let cache_healthy = redis.health_check().await.unwrap_or(false);
    HttpResponse::Ok().json(serde_json::json!({
        "status": if cache_healthy { "healthy" } else { "degraded" },
        "service": "mercato-auth",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorBody::new("The requested resource was not found"))
}
