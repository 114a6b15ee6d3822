// Password hashing and verification service

use crate::auth::error::AuthError;

/// Default bcrypt cost factor
pub const DEFAULT_COST: u32 = 10;

/// Password service for hashing and verification
///
/// bcrypt is salted and adaptive; the comparison inside
/// `bcrypt::verify` is constant-time with respect to the mismatch
/// position.
pub struct PasswordService {
    cost: u32,
}

impl PasswordService {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    /// Hash a password with the configured cost
    ///
    /// Only fails on resource exhaustion inside bcrypt.
    pub fn hash_password(&self, password: &str) -> Result<String, AuthError> {
        bcrypt::hash(password, self.cost).map_err(|_| AuthError::PasswordHashError)
    }

    /// Verify a password against a stored digest
    ///
    /// Returns false for a mismatch and for a malformed digest; never
    /// errors.
    pub fn verify_password(password: &str, digest: &str) -> bool {
        bcrypt::verify(password, digest).unwrap_or(false)
    }
}

impl Default for PasswordService {
    fn default() -> Self {
        Self::new(DEFAULT_COST)
    }
}
