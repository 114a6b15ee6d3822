// Shared application state

use axum::extract::FromRef;
use sqlx::PgPool;
use std::sync::Arc;

use crate::auth::{rate_limit::LoginRateLimiter, service::AuthService, token::TokenService};

/// Application state shared across handlers
///
/// The rate limiter and token service are owned components injected
/// here rather than module-level singletons.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub tokens: Arc<TokenService>,
    pub auth: Arc<AuthService>,
    pub limiter: LoginRateLimiter,
}

/// Lets the auth extractor pull the token service out of the state
impl FromRef<AppState> for Arc<TokenService> {
    fn from_ref(state: &AppState) -> Self {
        state.tokens.clone()
    }
}
