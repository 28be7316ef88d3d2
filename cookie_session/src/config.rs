//! Central configuration for the cookie_session crate

use chrono::Duration;
use thiserror::Error;

/// Name of the cookie carrying the signed session token
pub const SESSION_COOKIE_NAME: &str = "auth-token";

/// Validity window of an issued session, shared by the token expiry and the cookie Max-Age
pub const SESSION_TTL_SECONDS: i64 = 7 * 24 * 60 * 60;

pub(crate) const MIN_PRODUCTION_SECRET_LEN: usize = 32;

const DEV_FALLBACK_SECRET: &str = "dev_session_secret_change_in_production";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("SESSION_SECRET must be set in production")]
    MissingSecret,

    #[error("SESSION_SECRET must be at least 32 bytes in production")]
    WeakSecret,

    #[error("Session secret must not be empty")]
    EmptySecret,
}

/// Deployment environment, which drives the `Secure` cookie attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    /// Parse the value of `APP_ENV`. Anything other than `production`/`prod` is development.
    pub fn parse(value: Option<&str>) -> Self {
        match value.map(|v| v.trim().to_ascii_lowercase()) {
            Some(v) if v == "production" || v == "prod" => Environment::Production,
            _ => Environment::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }
}

/// Process-wide session configuration, loaded once at startup and never mutated
#[derive(Clone)]
pub struct SessionConfig {
    pub(crate) secret: Vec<u8>,
    pub environment: Environment,
    pub ttl: Duration,
}

impl std::fmt::Debug for SessionConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionConfig")
            .field("secret", &"[redacted]")
            .field("environment", &self.environment)
            .field("ttl", &self.ttl)
            .finish()
    }
}

impl SessionConfig {
    /// Build a configuration from an explicit secret
    pub fn new(secret: impl Into<Vec<u8>>, environment: Environment) -> Result<Self, ConfigError> {
        let secret = secret.into();
        if secret.is_empty() {
            return Err(ConfigError::EmptySecret);
        }
        if environment.is_production() && secret.len() < MIN_PRODUCTION_SECRET_LEN {
            return Err(ConfigError::WeakSecret);
        }
        Ok(Self {
            secret,
            environment,
            ttl: Duration::seconds(SESSION_TTL_SECONDS),
        })
    }

    /// Load the configuration from `SESSION_SECRET` and `APP_ENV`
    ///
    /// Outside production a missing secret falls back to a fixed development key.
    pub fn from_env() -> Result<Self, ConfigError> {
        let environment = Environment::parse(std::env::var("APP_ENV").ok().as_deref());
        let secret = resolve_secret(std::env::var("SESSION_SECRET").ok(), environment)?;
        Self::new(secret, environment)
    }

    pub fn is_production(&self) -> bool {
        self.environment.is_production()
    }
}

fn resolve_secret(value: Option<String>, environment: Environment) -> Result<String, ConfigError> {
    match value.filter(|s| !s.is_empty()) {
        Some(secret) => Ok(secret),
        None if environment.is_production() => Err(ConfigError::MissingSecret),
        None => {
            tracing::warn!("SESSION_SECRET not set, using development fallback secret");
            Ok(DEV_FALLBACK_SECRET.to_string())
        }
    }
}
