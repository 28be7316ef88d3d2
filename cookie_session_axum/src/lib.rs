//! cookie_session_axum - Axum integration for cookie_session
//!
//! - [`cookie_scope`] middleware provides the ambient cookie store for handlers.
//! - [`require_session_401`] / [`require_session_redirect`] guard routes using
//!   the session cookie on the request itself.
//! - [`AuthSession`] extracts verified session claims in handlers.

mod config;
mod error;
mod middleware;
mod session;

pub use config::SESSION_REDIRECT_ANON;
pub use error::IntoResponseError;
pub use middleware::{cookie_scope, require_session_401, require_session_redirect};
pub use session::{AuthRedirect, AuthSession};

// Re-export the core session types so applications depend on one crate
pub use cookie_session::{
    ConfigError, Environment, SESSION_COOKIE_NAME, SessionClaims, SessionConfig, SessionError,
    SessionManager,
};
