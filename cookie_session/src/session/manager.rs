use std::future::Future;

use tracing::Instrument;

use crate::config::{SESSION_COOKIE_NAME, SessionConfig};
use crate::cookie::{
    AmbientCookieStore, CookieOptions, CookieSource, CookieStore, RequestCookies, StoreSource,
};
use crate::session::errors::SessionError;
use crate::token::{SessionClaims, SessionTokenCodec, TokenCodec};

/// Issues, reads and revokes cookie-carried sessions
///
/// Holds no per-session state: every read re-derives validity from the cookie.
/// The production form, `SessionManager` with its default type parameters,
/// signs with [`TokenCodec`] and writes through the [`AmbientCookieStore`] of the
/// current request scope.
#[derive(Debug)]
pub struct SessionManager<C = TokenCodec, S = AmbientCookieStore> {
    codec: C,
    store: S,
    cookie_options: CookieOptions,
}

impl SessionManager {
    pub fn new(config: &SessionConfig) -> Self {
        let cookie_options = CookieOptions::for_session(config);
        Self {
            codec: TokenCodec::new(&config.secret, config.ttl),
            store: AmbientCookieStore::new(),
            cookie_options,
        }
    }

    /// Build from `SESSION_SECRET` / `APP_ENV`
    pub fn from_env() -> Result<Self, SessionError> {
        let config = SessionConfig::from_env()?;
        tracing::info!("Session manager configured: {:?}", config);
        Ok(Self::new(&config))
    }
}

impl<C, S> SessionManager<C, S>
where
    C: SessionTokenCodec,
    S: CookieStore,
{
    pub fn with_parts(codec: C, store: S, cookie_options: CookieOptions) -> Self {
        Self {
            codec,
            store,
            cookie_options,
        }
    }

    pub fn cookie_options(&self) -> &CookieOptions {
        &self.cookie_options
    }

    /// Sign a fresh session for the principal and write it to the session cookie
    ///
    /// Signing and cookie store failures are returned; the caller must not treat
    /// the user as logged in when this fails.
    #[tracing::instrument(skip(self, email))]
    pub async fn create_session(&self, user_id: &str, email: &str) -> Result<(), SessionError> {
        let token = self.codec.sign(user_id, email).map_err(|e| {
            tracing::error!("Failed to sign session token: {}", e);
            SessionError::from(e)
        })?;

        self.store
            .set(SESSION_COOKIE_NAME, &token, &self.cookie_options)
            .await?;

        tracing::debug!("Session cookie issued");
        Ok(())
    }

    /// Current session from the ambient cookie store
    ///
    /// An absent, empty, expired, tampered or malformed cookie all yield `Ok(None)`.
    /// Only an unavailable cookie store is an error.
    #[tracing::instrument(skip(self))]
    pub async fn get_session(&self) -> Result<Option<SessionClaims>, SessionError> {
        self.session_from_source(&StoreSource(&self.store)).await
    }

    /// Remove the session cookie. Idempotent.
    #[tracing::instrument(skip(self))]
    pub async fn delete_session(&self) -> Result<(), SessionError> {
        self.store
            .delete(SESSION_COOKIE_NAME, &self.cookie_options)
            .await?;
        tracing::debug!("Session cookie removed");
        Ok(())
    }

    /// Session carried by an explicit request (headers, parts or full request)
    ///
    /// Behaves like [`get_session`](Self::get_session) for the same cookie value.
    /// The cookie header is read up front; the returned future does not borrow
    /// `request`, so any `Request<B>` is accepted.
    pub fn verify_session<'a, R>(
        &'a self,
        request: &R,
    ) -> impl Future<Output = Option<SessionClaims>> + use<'a, C, S, R>
    where
        R: RequestCookies + ?Sized,
    {
        let cookies = request.cookie_header();

        async move {
            // No Cookie header at all, or one that is not valid UTF-8
            let Some(cookies) = cookies else {
                tracing::debug!("No cookie header on request");
                return None;
            };

            match self.session_from_source(&cookies).await {
                Ok(claims) => claims,
                Err(e) => {
                    tracing::warn!("Failed to read session cookie from request: {}", e);
                    None
                }
            }
        }
        .instrument(tracing::info_span!("verify_session"))
    }

    async fn session_from_source<R>(&self, source: &R) -> Result<Option<SessionClaims>, SessionError>
    where
        R: CookieSource + ?Sized,
    {
        let token = source.cookie(SESSION_COOKIE_NAME).await?;
        // An empty value is what a deleted cookie looks like; never verify it
        let Some(token) = token.filter(|t| !t.is_empty()) else {
            tracing::debug!("No session cookie present");
            return Ok(None);
        };

        match self.codec.verify(&token) {
            Ok(claims) => {
                tracing::debug!(user_id = claims.user_id(), "Session verified");
                Ok(Some(claims))
            }
            Err(e) => {
                // Every rejection looks like "no session" to the caller
                tracing::debug!(reason = e.kind(), "Session token rejected: {}", e);
                Ok(None)
            }
        }
    }
}
