// Authentication and authorization error types

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::fmt;
use tracing::{error, warn};

use crate::config;

/// Authentication error types
///
/// Token failures are split internally for logging but share one
/// external status and message, so callers cannot tell an expired
/// token from a forged one. Likewise a missing user and a wrong
/// password both surface as `InvalidCredentials`.
#[derive(Debug)]
pub enum AuthError {
    Validation(validator::ValidationErrors),
    InvalidCredentials,
    RateLimited,
    MissingToken,
    TokenInvalid,
    TokenExpired,
    DatabaseError(String),
    PasswordHashError,
    TokenGenerationError(String),
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthError::Validation(errors) => write!(f, "Validation error: {}", errors),
            AuthError::InvalidCredentials => write!(f, "Invalid email or password"),
            AuthError::RateLimited => write!(f, "Too many login attempts"),
            AuthError::MissingToken => write!(f, "Missing authentication token"),
            AuthError::TokenInvalid => write!(f, "Invalid token"),
            AuthError::TokenExpired => write!(f, "Token has expired"),
            AuthError::DatabaseError(msg) => write!(f, "Database error: {}", msg),
            AuthError::PasswordHashError => write!(f, "Password hashing error"),
            AuthError::TokenGenerationError(msg) => {
                write!(f, "Token generation error: {}", msg)
            }
        }
    }
}

impl std::error::Error for AuthError {}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, message, detail) = match &self {
            AuthError::Validation(errors) => {
                let body = Json(json!({
                    "error": "Request validation failed",
                    "fields": errors,
                }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }
            AuthError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                "Invalid email or password",
                None,
            ),
            AuthError::RateLimited => (
                StatusCode::TOO_MANY_REQUESTS,
                "Too many login attempts, please try again later",
                None,
            ),
            AuthError::MissingToken => {
                warn!("Missing token in request");
                (
                    StatusCode::UNAUTHORIZED,
                    "Missing authentication token",
                    None,
                )
            }
            // Same status and body for both token failures; the log
            // line is the only place the distinction appears
            AuthError::TokenInvalid => {
                warn!("Invalid token attempt");
                (StatusCode::FORBIDDEN, "Invalid or expired token", None)
            }
            AuthError::TokenExpired => {
                warn!("Expired token attempt");
                (StatusCode::FORBIDDEN, "Invalid or expired token", None)
            }
            AuthError::DatabaseError(msg) => {
                error!("Database error in auth: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error",
                    Some(msg.clone()),
                )
            }
            AuthError::PasswordHashError => {
                error!("Password hashing error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error",
                    None,
                )
            }
            AuthError::TokenGenerationError(msg) => {
                error!("Token generation error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error",
                    Some(msg.clone()),
                )
            }
        };

        let body = match detail.filter(|_| config::dev_mode()) {
            Some(detail) => Json(json!({ "error": message, "detail": detail })),
            None => Json(json!({ "error": message })),
        };

        (status, body).into_response()
    }
}

impl AuthError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::Validation(_) => StatusCode::BAD_REQUEST,
            AuthError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AuthError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            AuthError::MissingToken => StatusCode::UNAUTHORIZED,
            AuthError::TokenInvalid => StatusCode::FORBIDDEN,
            AuthError::TokenExpired => StatusCode::FORBIDDEN,
            AuthError::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AuthError::PasswordHashError => StatusCode::INTERNAL_SERVER_ERROR,
            AuthError::TokenGenerationError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
