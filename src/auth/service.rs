// Authentication service - business logic layer

use std::sync::Arc;
use tracing::debug;

use crate::auth::{
    error::AuthError,
    models::LoginResponse,
    password::PasswordService,
    repository::UserRepository,
    token::TokenService,
};

/// Authentication service coordinating credential checks and token
/// issuance
pub struct AuthService {
    users: UserRepository,
    tokens: Arc<TokenService>,
}

impl AuthService {
    pub fn new(users: UserRepository, tokens: Arc<TokenService>) -> Self {
        Self { users, tokens }
    }

    /// Check credentials and issue a token
    ///
    /// An unknown email and a wrong password produce the same
    /// `InvalidCredentials`, so the response never reveals whether the
    /// account exists.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, AuthError> {
        let user = self.users.find_by_email(email).await?.ok_or_else(|| {
            debug!("Login attempt for unknown email");
            AuthError::InvalidCredentials
        })?;

        if !PasswordService::verify_password(password, &user.password_hash) {
            debug!("Password mismatch for user_id={}", user.id);
            return Err(AuthError::InvalidCredentials);
        }

        let token = self.tokens.issue(user.id, &user.email)?;

        Ok(LoginResponse {
            token,
            user_id: user.id,
            email: user.email,
        })
    }
}
