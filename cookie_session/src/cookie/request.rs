//! Cookie lookup on an explicit inbound request, for layers with no ambient store

use async_trait::async_trait;
use headers::HeaderMapExt;
use http::{HeaderMap, Request, request::Parts};

use super::source::CookieSource;
use crate::session::SessionError;

/// Find a cookie value in the request's `Cookie` header(s)
///
/// A missing or non-UTF-8 header yields `None`.
pub fn cookie_from_headers(headers: &HeaderMap, name: &str) -> Option<String> {
    let Some(cookies) = headers.typed_get::<headers::Cookie>() else {
        tracing::debug!("No usable cookie header found");
        return None;
    };

    let value = cookies.get(name).map(str::to_string);
    if value.is_none() {
        tracing::debug!("No cookie '{}' found in cookies", name);
    }
    value
}

/// Inbound request objects the session cookie can be read from
///
/// Reading is synchronous and needs no `Sync` bound, so any `Request<B>` works,
/// including bodies that cannot be shared between threads.
pub trait RequestCookies {
    /// The parsed `Cookie` header, if present and valid UTF-8
    fn cookie_header(&self) -> Option<headers::Cookie>;
}

impl RequestCookies for headers::Cookie {
    fn cookie_header(&self) -> Option<headers::Cookie> {
        Some(self.clone())
    }
}

impl RequestCookies for HeaderMap {
    fn cookie_header(&self) -> Option<headers::Cookie> {
        self.typed_get::<headers::Cookie>()
    }
}

impl RequestCookies for Parts {
    fn cookie_header(&self) -> Option<headers::Cookie> {
        self.headers.cookie_header()
    }
}

impl<B> RequestCookies for Request<B> {
    fn cookie_header(&self) -> Option<headers::Cookie> {
        self.headers().cookie_header()
    }
}

// Request-header-backed side of the read seam; the ambient side is `StoreSource`
#[async_trait]
impl CookieSource for headers::Cookie {
    async fn cookie(&self, name: &str) -> Result<Option<String>, SessionError> {
        Ok(self.get(name).map(str::to_string))
    }
}
