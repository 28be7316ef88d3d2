//! cookie_session - Stateless signed-cookie session authentication
//!
//! Sessions are carried entirely by a signed, self-expiring token in the
//! `auth-token` cookie. Nothing is kept server-side between requests; every
//! check re-derives the session from the cookie.
//!
//! The [`SessionManager`] reads the cookie either from the ambient per-request
//! store (see [`CookieScope`]) or from an explicit request object, through the
//! single [`CookieSource`] seam.

mod config;
mod cookie;
mod session;
mod token;

pub use config::{ConfigError, Environment, SESSION_COOKIE_NAME, SESSION_TTL_SECONDS, SessionConfig};

pub use cookie::{
    AmbientCookieStore, CookieOptions, CookieScope, CookieSource, CookieStore, RequestCookies,
    SameSite, cookie_from_headers, with_cookie_scope,
};

pub use session::{SessionError, SessionManager};

pub use token::{SessionClaims, SessionTokenCodec, TokenCodec, TokenError};
