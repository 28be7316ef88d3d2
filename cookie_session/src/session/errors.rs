use thiserror::Error;

use crate::config::ConfigError;
use crate::token::TokenError;

#[derive(Debug, Error, Clone)]
pub enum SessionError {
    #[error("Cookie store unavailable outside of a request scope")]
    CookieStoreUnavailable,

    #[error("Cookie error: {0}")]
    Cookie(String),

    /// Error from token signing
    #[error("Token error: {0}")]
    Token(#[from] TokenError),

    /// Error from configuration loading
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}
