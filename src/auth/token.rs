// JWT token issuance and verification service

use crate::auth::error::AuthError;
use chrono::Utc;
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};

/// Default token lifetime: one hour
pub const DEFAULT_TTL_SECS: i64 = 3600;

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: i32, // user_id
    pub email: String,
    pub iat: i64, // issued at timestamp
    pub exp: i64, // expiration timestamp
}

/// Token service for JWT operations
///
/// Stateless: nothing is stored server-side, so an issued token stays
/// valid until its expiry. There is no revocation.
pub struct TokenService {
    secret: String,
    ttl_secs: i64,
}

impl TokenService {
    /// Create a TokenService with the default one-hour lifetime
    pub fn new(secret: String) -> Self {
        Self::with_ttl(secret, DEFAULT_TTL_SECS)
    }

    /// Create a TokenService with an explicit lifetime in seconds
    pub fn with_ttl(secret: String, ttl_secs: i64) -> Self {
        Self { secret, ttl_secs }
    }

    /// Issue a signed token for the given user
    pub fn issue(&self, user_id: i32, email: &str) -> Result<String, AuthError> {
        let now = Utc::now().timestamp();

        let claims = Claims {
            sub: user_id,
            email: email.to_string(),
            iat: now,
            exp: now + self.ttl_secs,
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(|e| AuthError::TokenGenerationError(e.to_string()))
    }

    /// Verify a token's signature and expiry
    ///
    /// The signature is checked before the expiry. Zero leeway: a
    /// token is rejected the second after its exp.
    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        let mut validation = Validation::default();
        validation.leeway = 0;

        decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &validation,
        )
        .map(|data| data.claims)
        .map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => AuthError::TokenExpired,
            _ => AuthError::TokenInvalid,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    // Helper to create a test token service
    fn test_token_service() -> TokenService {
        TokenService::new("test_secret_key_for_testing_purposes".to_string())
    }

    // Helper to encode arbitrary claims with the test secret
    fn encode_claims(claims: &Claims) -> String {
        encode(
            &Header::default(),
            claims,
            &EncodingKey::from_secret("test_secret_key_for_testing_purposes".as_bytes()),
        )
        .unwrap()
    }

    #[test]
    fn test_default_lifetime_is_one_hour() {
        let service = test_token_service();
        let token = service.issue(1, "test@example.com").unwrap();
        let claims = service.verify(&token).unwrap();

        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn test_configured_lifetime_is_honored() {
        let service =
            TokenService::with_ttl("test_secret_key_for_testing_purposes".to_string(), 120);
        let token = service.issue(1, "test@example.com").unwrap();
        let claims = service.verify(&token).unwrap();

        assert_eq!(claims.exp - claims.iat, 120);
    }

    #[test]
    fn test_claims_contain_user_identity() {
        let service = test_token_service();
        let token = service.issue(42, "user@example.com").unwrap();
        let claims = service.verify(&token).unwrap();

        assert_eq!(claims.sub, 42);
        assert_eq!(claims.email, "user@example.com");
    }

    #[test]
    fn test_malformed_tokens_are_rejected() {
        let service = test_token_service();

        for garbage in ["", "not.a.token", "invalid_token_format"] {
            assert!(matches!(
                service.verify(garbage),
                Err(AuthError::TokenInvalid)
            ));
        }
    }

    #[test]
    fn test_wrong_secret_is_rejected_as_invalid() {
        let issuer = TokenService::new("secret1".to_string());
        let verifier = TokenService::new("secret2".to_string());

        let token = issuer.issue(1, "test@example.com").unwrap();
        assert!(issuer.verify(&token).is_ok());
        assert!(matches!(
            verifier.verify(&token),
            Err(AuthError::TokenInvalid)
        ));
    }

    #[test]
    fn test_token_past_expiry_is_expired_not_invalid() {
        let service = test_token_service();
        let now = Utc::now().timestamp();

        // exp one hour in the past plus a second, as if verified just
        // after a one-hour token lapsed
        let token = encode_claims(&Claims {
            sub: 1,
            email: "test@example.com".to_string(),
            iat: now - 3601,
            exp: now - 1,
        });

        assert!(matches!(
            service.verify(&token),
            Err(AuthError::TokenExpired)
        ));
    }

    #[test]
    fn test_tampered_token_fails_signature_before_expiry() {
        let service = test_token_service();
        let now = Utc::now().timestamp();

        // Expired AND signed with another secret: the signature check
        // wins, so the failure is Invalid rather than Expired
        let token = encode(
            &Header::default(),
            &Claims {
                sub: 1,
                email: "test@example.com".to_string(),
                iat: now - 7200,
                exp: now - 3600,
            },
            &EncodingKey::from_secret("some_other_secret".as_bytes()),
        )
        .unwrap();

        assert!(matches!(
            service.verify(&token),
            Err(AuthError::TokenInvalid)
        ));
    }

    // Property-based tests using proptest

    proptest! {
        #[test]
        fn prop_claims_roundtrip_identity(
            user_id in 1i32..1000000,
            email in "[a-z]{3,10}@[a-z]{3,10}\\.(com|org|net)"
        ) {
            let service = test_token_service();
            let token = service.issue(user_id, &email)?;
            let claims = service.verify(&token)?;

            prop_assert_eq!(claims.sub, user_id);
            prop_assert_eq!(claims.email, email);
        }

        #[test]
        fn prop_lifetime_matches_configured_ttl(
            ttl in 60i64..604800
        ) {
            let service = TokenService::with_ttl(
                "test_secret_key_for_testing_purposes".to_string(),
                ttl,
            );
            let token = service.issue(1, "test@example.com")?;
            let claims = service.verify(&token)?;

            prop_assert_eq!(claims.exp - claims.iat, ttl);
        }

        #[test]
        fn prop_random_strings_rejected(
            malformed in "[a-zA-Z0-9]{10,50}"
        ) {
            let service = test_token_service();
            prop_assert!(service.verify(&malformed).is_err());
        }
    }
}
