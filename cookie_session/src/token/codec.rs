//! Signing and verification of session tokens
//!
//! Tokens are compact HS256 JWTs carrying `userId`, `email`, `iat` and `exp`.
//! Expiry is enforced here, independent of the cookie Max-Age.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};

use super::errors::TokenError;
use super::types::{SessionClaims, WireClaims};

/// Seam between the session manager and the token format
pub trait SessionTokenCodec: Send + Sync {
    /// Issue a token for the given principal with a fresh expiry
    fn sign(&self, user_id: &str, email: &str) -> Result<String, TokenError>;

    /// Check signature and expiry, returning the verified claims
    fn verify(&self, token: &str) -> Result<SessionClaims, TokenError>;
}

#[derive(Clone)]
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl std::fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenCodec")
            .field("algorithm", &Algorithm::HS256)
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

impl TokenCodec {
    pub fn new(secret: &[u8], ttl: Duration) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "iat"]);

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub(crate) fn sign_at(
        &self,
        user_id: &str,
        email: &str,
        issued_at: DateTime<Utc>,
    ) -> Result<String, TokenError> {
        let claims = WireClaims {
            user_id: user_id.to_string(),
            email: email.to_string(),
            iat: issued_at.timestamp(),
            exp: (issued_at + self.ttl).timestamp(),
        };

        jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| TokenError::Signing(e.to_string()))
    }
}

impl SessionTokenCodec for TokenCodec {
    fn sign(&self, user_id: &str, email: &str) -> Result<String, TokenError> {
        self.sign_at(user_id, email, Utc::now())
    }

    fn verify(&self, token: &str) -> Result<SessionClaims, TokenError> {
        let data = jsonwebtoken::decode::<WireClaims>(token, &self.decoding_key, &self.validation)?;
        SessionClaims::try_from(data.claims)
    }
}
