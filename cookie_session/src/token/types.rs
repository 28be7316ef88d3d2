use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::errors::TokenError;

/// Verified contents of a session token
///
/// Only produced by successful verification of a token signed with the server secret.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionClaims {
    user_id: String,
    email: String,
    expires_at: DateTime<Utc>,
}

impl SessionClaims {
    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    #[cfg(test)]
    pub(crate) fn for_test(user_id: &str, email: &str, expires_at: DateTime<Utc>) -> Self {
        Self {
            user_id: user_id.to_string(),
            email: email.to_string(),
            expires_at,
        }
    }
}

/// Claims as they are serialized inside the signed token
#[derive(Debug, Serialize, Deserialize)]
pub(super) struct WireClaims {
    #[serde(rename = "userId")]
    pub(super) user_id: String,
    pub(super) email: String,
    pub(super) iat: i64,
    pub(super) exp: i64,
}

impl TryFrom<WireClaims> for SessionClaims {
    type Error = TokenError;

    fn try_from(wire: WireClaims) -> Result<Self, Self::Error> {
        let expires_at = DateTime::from_timestamp(wire.exp, 0)
            .ok_or_else(|| TokenError::Malformed("exp out of range".to_string()))?;
        Ok(Self {
            user_id: wire.user_id,
            email: wire.email,
            expires_at,
        })
    }
}
