//! Central configuration for the cookie_session_axum crate

use std::sync::LazyLock;

/// Where unauthenticated GET requests are sent
/// Default: "/login"
pub static SESSION_REDIRECT_ANON: LazyLock<String> = LazyLock::new(|| {
    redirect_anon_from(std::env::var("SESSION_REDIRECT_ANON").ok().as_deref())
});

fn redirect_anon_from(env_value: Option<&str>) -> String {
    env_value
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .unwrap_or_else(|| "/login".to_string())
}
