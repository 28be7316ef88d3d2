use std::ops::Deref;
use std::sync::Arc;

use axum::{
    RequestPartsExt,
    extract::{FromRef, FromRequestParts, OptionalFromRequestParts},
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::{TypedHeader, headers};
use http::{Method, StatusCode, request::Parts};

use super::config::SESSION_REDIRECT_ANON;
use cookie_session::{SessionClaims, SessionManager};

/// Rejection for requests without a valid session
///
/// GET requests are redirected to `SESSION_REDIRECT_ANON`; everything else gets 401.
#[derive(Debug)]
pub struct AuthRedirect {
    method: Method,
}

impl AuthRedirect {
    pub(crate) fn new(method: Method) -> Self {
        Self { method }
    }

    fn into_response_with_method(self) -> Response {
        if self.method == Method::GET {
            tracing::debug!("Redirecting to {}", SESSION_REDIRECT_ANON.as_str());
            Redirect::temporary(SESSION_REDIRECT_ANON.as_str()).into_response()
        } else {
            tracing::debug!("Unauthorized");
            (StatusCode::UNAUTHORIZED, "Unauthorized").into_response()
        }
    }
}

impl IntoResponse for AuthRedirect {
    fn into_response(self) -> Response {
        self.into_response_with_method()
    }
}

/// Verified session of the requesting user, available as an Axum extractor
///
/// Reads the session cookie from the request itself, so it works with or without
/// the ambient cookie scope. If `require_session_*` middleware already verified
/// the request, its claims are reused.
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use axum::{routing::get, Router};
/// use cookie_session_axum::{AuthSession, SessionManager};
///
/// async fn protected_handler(session: AuthSession) -> String {
///     format!("Hello, {}!", session.email())
/// }
///
/// # fn app(manager: Arc<SessionManager>) -> Router {
/// Router::new()
///     .route("/protected", get(protected_handler))
///     .with_state(manager)
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct AuthSession(pub SessionClaims);

impl Deref for AuthSession {
    type Target = SessionClaims;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<S> FromRequestParts<S> for AuthSession
where
    Arc<SessionManager>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthRedirect;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        if let Some(claims) = parts.extensions.get::<SessionClaims>() {
            return Ok(AuthSession(claims.clone()));
        }

        let method = parts.method.clone();
        let cookies: TypedHeader<headers::Cookie> = parts.extract().await.map_err(|_| {
            tracing::debug!("No cookie header on request");
            AuthRedirect::new(method.clone())
        })?;

        let manager = Arc::<SessionManager>::from_ref(state);
        let claims = manager.verify_session(&cookies.0).await.ok_or_else(|| {
            tracing::debug!("No valid session on request");
            AuthRedirect::new(method.clone())
        })?;

        Ok(AuthSession(claims))
    }
}

impl<S> OptionalFromRequestParts<S> for AuthSession
where
    Arc<SessionManager>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthRedirect;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> Result<Option<Self>, Self::Rejection> {
        let result: Result<Self, Self::Rejection> =
            <AuthSession as FromRequestParts<S>>::from_request_parts(parts, state).await;
        Ok(result.ok())
    }
}
