//! Per-request cookie store reachable without threading a request object
//!
//! A [`CookieScope`] seeds a task-local jar from the request's `Cookie` header,
//! runs the handler future inside it, and hands back the `Set-Cookie` values
//! queued while it ran. [`AmbientCookieStore`] reads and writes that jar.

use std::cell::RefCell;
use std::collections::HashMap;
use std::future::Future;

use async_trait::async_trait;
use headers::HeaderMapExt;
use http::{HeaderMap, HeaderValue};

use super::options::CookieOptions;
use super::source::CookieStore;
use crate::session::SessionError;

tokio::task_local! {
    static COOKIE_JAR: RefCell<CookieJar>;
}

#[derive(Debug, Default)]
struct CookieJar {
    values: HashMap<String, String>,
    pending: Vec<(String, HeaderValue)>,
}

impl CookieJar {
    fn from_headers(headers: &HeaderMap) -> Self {
        let mut values = HashMap::new();
        if let Some(cookie) = headers.typed_get::<headers::Cookie>() {
            // Repeated names: first one wins, as with `headers::Cookie::get`.
            // Browsers list the most specific path first.
            for (name, value) in cookie.iter() {
                values
                    .entry(name.to_string())
                    .or_insert_with(|| value.to_string());
            }
        }

        Self {
            values,
            pending: Vec::new(),
        }
    }

    // Only the last Set-Cookie per name is sent
    fn queue(&mut self, name: &str, header: HeaderValue) {
        self.pending.retain(|(n, _)| n != name);
        self.pending.push((name.to_string(), header));
    }

    fn take_pending(&mut self) -> Vec<HeaderValue> {
        std::mem::take(&mut self.pending)
            .into_iter()
            .map(|(_, header)| header)
            .collect()
    }
}

/// Cookie jar for a single request/response cycle
#[derive(Debug, Default)]
pub struct CookieScope {
    jar: CookieJar,
}

impl CookieScope {
    pub fn from_headers(headers: &HeaderMap) -> Self {
        Self {
            jar: CookieJar::from_headers(headers),
        }
    }

    /// Run `fut` with this jar as the ambient cookie store
    ///
    /// Returns the future's output and the `Set-Cookie` header values to send.
    pub async fn run<F: Future>(self, fut: F) -> (F::Output, Vec<HeaderValue>) {
        COOKIE_JAR
            .scope(RefCell::new(self.jar), async move {
                let output = fut.await;
                let set_cookies = COOKIE_JAR
                    .try_with(|jar| jar.borrow_mut().take_pending())
                    .unwrap_or_default();
                (output, set_cookies)
            })
            .await
    }
}

/// Shorthand for `CookieScope::from_headers(headers).run(fut)`
pub fn with_cookie_scope<F: Future>(
    headers: &HeaderMap,
    fut: F,
) -> impl Future<Output = (F::Output, Vec<HeaderValue>)> + use<F> {
    CookieScope::from_headers(headers).run(fut)
}

/// [`CookieStore`] backed by the task-local jar of the current [`CookieScope`]
#[derive(Debug, Clone, Copy, Default)]
pub struct AmbientCookieStore;

impl AmbientCookieStore {
    pub fn new() -> Self {
        Self
    }

    fn with_jar<R>(f: impl FnOnce(&mut CookieJar) -> R) -> Result<R, SessionError> {
        COOKIE_JAR
            .try_with(|jar| f(&mut jar.borrow_mut()))
            .map_err(|_| {
                tracing::error!("Cookie store accessed outside of a cookie scope");
                SessionError::CookieStoreUnavailable
            })
    }
}

#[async_trait]
impl CookieStore for AmbientCookieStore {
    async fn get(&self, name: &str) -> Result<Option<String>, SessionError> {
        Self::with_jar(|jar| jar.values.get(name).cloned())
    }

    async fn set(
        &self,
        name: &str,
        value: &str,
        options: &CookieOptions,
    ) -> Result<(), SessionError> {
        let header = options.to_set_cookie(name, value)?;
        Self::with_jar(|jar| {
            jar.values.insert(name.to_string(), value.to_string());
            jar.queue(name, header);
        })
    }

    async fn delete(&self, name: &str, options: &CookieOptions) -> Result<(), SessionError> {
        // Same attributes as issuance or the browser keeps the old cookie
        let header = options.expired().to_set_cookie(name, "")?;
        Self::with_jar(|jar| {
            jar.values.remove(name);
            jar.queue(name, header);
        })
    }
}
