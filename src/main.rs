pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod state;
pub mod validation;

use axum::{
    extract::State,
    http::{StatusCode, Uri},
    response::Json,
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;

use auth::middleware::AuthenticatedUser;
use auth::rate_limit::LoginRateLimiter;
use auth::repository::UserRepository;
use auth::service::AuthService;
use auth::token::TokenService;
use config::AppConfig;
use error::ApiError;
use models::{CreateRecord, Record};
use state::AppState;

/// Handler for GET /data
/// Returns all records; requires a valid bearer token
async fn list_records(
    user: AuthenticatedUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<Record>>, ApiError> {
    tracing::debug!("Fetching all records for user_id={}", user.user_id);

    let records = sqlx::query_as::<_, Record>(
        r#"
        SELECT id, name, city, country
        FROM records
        ORDER BY id
        "#,
    )
    .fetch_all(&state.db)
    .await?;

    tracing::debug!("Retrieved {} records", records.len());
    Ok(Json(records))
}

/// Handler for POST /data
/// Creates a new record; requires a valid bearer token
async fn create_record(
    user: AuthenticatedUser,
    State(state): State<AppState>,
    Json(payload): Json<CreateRecord>,
) -> Result<(StatusCode, Json<Record>), ApiError> {
    validation::require_fields(&[
        ("name", payload.name.as_deref()),
        ("city", payload.city.as_deref()),
        ("country", payload.country.as_deref()),
    ])?;

    let record = sqlx::query_as::<_, Record>(
        r#"
        INSERT INTO records (name, city, country)
        VALUES ($1, $2, $3)
        RETURNING id, name, city, country
        "#,
    )
    .bind(payload.name.unwrap_or_default())
    .bind(payload.city.unwrap_or_default())
    .bind(payload.country.unwrap_or_default())
    .fetch_one(&state.db)
    .await?;

    tracing::info!(
        "User {} created record with id: {}",
        user.user_id,
        record.id
    );
    Ok((StatusCode::CREATED, Json(record)))
}

/// Terminal handler for unmatched routes
async fn not_found(uri: Uri) -> ApiError {
    ApiError::NotFound {
        message: format!("Route {} not found", uri.path()),
    }
}

/// Creates and configures the application router
/// Maps all endpoints to their handlers and adds CORS middleware
fn create_router(state: AppState) -> Router {
    use tower_http::cors::{Any, CorsLayer};

    // Configure CORS to allow all origins, methods, and headers
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/login", post(auth::handlers::login_handler))
        .route("/data", get(list_records).post(create_record))
        .fallback(not_found)
        .layer(cors)
        .with_state(state)
}

#[tokio::main]
async fn main() {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    let app_config = AppConfig::from_env().expect("Invalid configuration");
    config::set_dev_mode(app_config.development);

    // Initialize tracing subscriber for logging; development mode
    // turns on debug-level output unless RUST_LOG says otherwise
    let default_level = if app_config.development {
        "debug"
    } else {
        "info"
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true)
        .init();

    tracing::info!("Directory API - Starting...");

    // Log unexpected faults loudly but keep the process running; a
    // panicking handler task does not take the server down
    std::panic::set_hook(Box::new(|info| {
        tracing::error!("Unhandled panic: {}", info);
    }));

    // Create database connection pool
    tracing::info!("Connecting to database...");
    let db_pool = db::create_pool(&app_config.database_url())
        .await
        .expect("Failed to create database pool");

    // Auth components, built once from config
    let tokens = Arc::new(TokenService::with_ttl(
        app_config.jwt_secret.clone(),
        app_config.token_ttl_secs,
    ));
    let auth_service = Arc::new(AuthService::new(
        UserRepository::new(db_pool.clone()),
        tokens.clone(),
    ));

    let app = create_router(AppState {
        db: db_pool,
        tokens,
        auth: auth_service,
        limiter: LoginRateLimiter::default(),
    });

    // Start the Axum server
    let addr = format!("{}:{}", app_config.host, app_config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind to address");

    tracing::info!("Directory API is running on http://{}", addr);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .expect("Server error");
}

#[cfg(test)]
mod tests;
