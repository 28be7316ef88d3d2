use async_trait::async_trait;

use super::options::CookieOptions;
use crate::session::SessionError;

/// Read access to a cookie by name, whatever surface the caller runs on
#[async_trait]
pub trait CookieSource: Send + Sync {
    async fn cookie(&self, name: &str) -> Result<Option<String>, SessionError>;
}

/// Read/write cookie store bound to the current request/response cycle
#[async_trait]
pub trait CookieStore: Send + Sync {
    async fn get(&self, name: &str) -> Result<Option<String>, SessionError>;

    async fn set(&self, name: &str, value: &str, options: &CookieOptions)
    -> Result<(), SessionError>;

    /// Expire the cookie set with `options`
    ///
    /// Removing a cookie that is not present is not an error.
    async fn delete(&self, name: &str, options: &CookieOptions) -> Result<(), SessionError>;
}

/// Exposes a [`CookieStore`] through the read-only [`CookieSource`] seam
pub(crate) struct StoreSource<'a, S: ?Sized>(pub(crate) &'a S);

#[async_trait]
impl<S> CookieSource for StoreSource<'_, S>
where
    S: CookieStore + ?Sized,
{
    async fn cookie(&self, name: &str) -> Result<Option<String>, SessionError> {
        self.0.get(name).await
    }
}
