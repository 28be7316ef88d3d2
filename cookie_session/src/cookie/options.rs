use http::HeaderValue;

use crate::config::SessionConfig;
use crate::session::SessionError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SameSite {
    Strict,
    Lax,
    None,
}

impl SameSite {
    fn as_str(&self) -> &'static str {
        match self {
            SameSite::Strict => "Strict",
            SameSite::Lax => "Lax",
            SameSite::None => "None",
        }
    }
}

/// Attributes written alongside the session cookie
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CookieOptions {
    pub http_only: bool,
    pub same_site: SameSite,
    pub path: String,
    pub secure: bool,
    pub max_age: i64,
}

impl CookieOptions {
    /// Session cookie policy: HttpOnly, Lax, root path, Secure only in production
    pub fn for_session(config: &SessionConfig) -> Self {
        Self {
            http_only: true,
            same_site: SameSite::Lax,
            path: "/".to_string(),
            secure: config.is_production(),
            max_age: config.ttl.num_seconds(),
        }
    }

    /// Same attributes, expiring immediately
    pub fn expired(&self) -> Self {
        Self {
            max_age: 0,
            ..self.clone()
        }
    }

    pub(crate) fn to_set_cookie(&self, name: &str, value: &str) -> Result<HeaderValue, SessionError> {
        if !is_cookie_token(name) {
            return Err(SessionError::Cookie(format!("Invalid cookie name: {name:?}")));
        }
        if !value.chars().all(is_cookie_value_char) {
            return Err(SessionError::Cookie(format!(
                "Invalid value for cookie {name}"
            )));
        }

        let mut cookie = format!(
            "{name}={value}; SameSite={}; Path={}; Max-Age={}",
            self.same_site.as_str(),
            self.path,
            self.max_age
        );
        if self.http_only {
            cookie.push_str("; HttpOnly");
        }
        if self.secure {
            cookie.push_str("; Secure");
        }

        cookie
            .parse()
            .map_err(|_| SessionError::Cookie("Failed to parse cookie".to_string()))
    }
}

fn is_cookie_token(name: &str) -> bool {
    !name.is_empty()
        && name.bytes().all(|b| {
            b.is_ascii_graphic() && !b"()<>@,;:\\\"/[]?={}".contains(&b)
        })
}

fn is_cookie_value_char(c: char) -> bool {
    c.is_ascii_graphic() && !matches!(c, '"' | ',' | ';' | '\\')
}
