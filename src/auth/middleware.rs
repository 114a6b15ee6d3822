// Authentication middleware for protected routes

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::{header, request::Parts},
};
use std::sync::Arc;
use tracing::{debug, warn};

use crate::auth::{error::AuthError, token::TokenService};

/// Authenticated user extractor for protected routes
///
/// Missing Authorization header short-circuits with 401; a present
/// but unverifiable token with 403. On success the decoded claims are
/// handed to the handler. Verification is a pure local check, no
/// retries.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: i32,
    pub email: String,
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthenticatedUser
where
    Arc<TokenService>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let endpoint = parts.uri.path().to_string();

        // Extract Authorization header
        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .ok_or_else(|| {
                warn!("Missing Authorization header for endpoint: {}", endpoint);
                AuthError::MissingToken
            })?
            .to_str()
            .map_err(|_| {
                warn!("Non-ASCII Authorization header for endpoint: {}", endpoint);
                AuthError::TokenInvalid
            })?;

        // Verify Bearer token format
        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            warn!(
                "Authorization header missing 'Bearer ' prefix for endpoint: {}",
                endpoint
            );
            AuthError::TokenInvalid
        })?;

        // Token service comes from the app state, secret loaded once
        // at startup
        let token_service = Arc::<TokenService>::from_ref(state);
        let claims = token_service.verify(token).map_err(|e| {
            match e {
                AuthError::TokenExpired => {
                    warn!("Expired token for endpoint: {}", endpoint)
                }
                _ => warn!("Invalid token for endpoint: {}", endpoint),
            }
            e
        })?;

        debug!(
            "Authenticated user_id={} for endpoint: {}",
            claims.sub, endpoint
        );

        Ok(AuthenticatedUser {
            user_id: claims.sub,
            email: claims.email,
        })
    }
}
