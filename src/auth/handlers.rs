// HTTP handler for the login endpoint

use axum::{
    extract::{ConnectInfo, State},
    Json,
};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use tracing::{info, warn};

use crate::auth::{
    error::AuthError,
    models::{LoginRequest, LoginResponse},
    rate_limit::RateDecision,
};
use crate::state::AppState;
use crate::validation::require_fields;

/// Login a user
/// POST /login
///
/// Order matters: field validation, then the rate limiter, and only
/// then the credential store, so throttled attempts never touch the
/// database.
pub async fn login_handler(
    State(state): State<AppState>,
    client_addr: Option<ConnectInfo<SocketAddr>>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AuthError> {
    require_fields(&[
        ("email", request.email.as_deref()),
        ("password", request.password.as_deref()),
    ])
    .map_err(AuthError::Validation)?;

    let addr = client_addr
        .map(|ConnectInfo(a)| a.ip())
        .unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED));

    if state.limiter.check(addr) == RateDecision::Throttled {
        warn!("Login throttled for {}", addr);
        return Err(AuthError::RateLimited);
    }

    let email = request.email.unwrap_or_default();
    let password = request.password.unwrap_or_default();

    let response = state.auth.login(&email, &password).await?;
    info!("Login succeeded for user_id={}", response.user_id);

    Ok(Json(response))
}
