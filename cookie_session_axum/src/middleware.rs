use std::sync::Arc;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use http::{StatusCode, header::SET_COOKIE};

use super::session::AuthRedirect;
use cookie_session::{CookieScope, SessionManager};

/// Run the request inside an ambient cookie scope
///
/// Handlers below this layer can call `create_session`, `get_session` and
/// `delete_session` without a request object; cookies they write are sent
/// back as `Set-Cookie` headers.
pub async fn cookie_scope(req: Request, next: Next) -> Response {
    let scope = CookieScope::from_headers(req.headers());
    let (mut response, set_cookies) = scope.run(next.run(req)).await;

    // Append, not insert: handlers may have set other cookies themselves
    for value in set_cookies {
        response.headers_mut().append(SET_COOKIE, value);
    }
    response
}

async fn require_session(
    manager: &SessionManager,
    mut req: Request,
    next: Next,
    redirect_on_error: bool,
) -> Response {
    let claims = manager.verify_session(&req).await;
    match claims {
        Some(claims) => {
            tracing::debug!(user_id = claims.user_id(), "Authenticated request");
            // Store verified claims so handlers and `AuthSession` can reuse them
            req.extensions_mut().insert(claims);
            next.run(req).await
        }
        None if redirect_on_error => AuthRedirect::new(req.method().clone()).into_response(),
        None => (StatusCode::UNAUTHORIZED, "Unauthorized").into_response(),
    }
}

/// Session check on the explicit request, responding 401 when absent or invalid
///
/// Verified `SessionClaims` are inserted into request extensions.
pub async fn require_session_401(
    State(manager): State<Arc<SessionManager>>,
    req: Request,
    next: Next,
) -> Response {
    require_session(&manager, req, next, false).await
}

/// Session check on the explicit request, redirecting GETs to the login page
///
/// Verified `SessionClaims` are inserted into request extensions.
pub async fn require_session_redirect(
    State(manager): State<Arc<SessionManager>>,
    req: Request,
    next: Next,
) -> Response {
    require_session(&manager, req, next, true).await
}
