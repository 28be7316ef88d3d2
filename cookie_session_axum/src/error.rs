use http::{Result as HttpResponse, StatusCode};
use cookie_session::{SessionError, TokenError};

/// Helper trait for converting errors to a standard response error format
pub trait IntoResponseError<T> {
    fn into_response_error(self) -> Result<T, (StatusCode, String)>;
}

/// Map session errors to status codes. Store and signing failures are server faults.
impl<T> IntoResponseError<T> for Result<T, SessionError> {
    fn into_response_error(self) -> Result<T, (StatusCode, String)> {
        self.map_err(|e| {
            let status = match &e {
                SessionError::Token(TokenError::Signing(_)) => StatusCode::INTERNAL_SERVER_ERROR,
                SessionError::Token(_) => StatusCode::UNAUTHORIZED,
                SessionError::Cookie(_) => StatusCode::BAD_REQUEST,
                SessionError::CookieStoreUnavailable | SessionError::Config(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            };
            if status.is_server_error() {
                tracing::error!("Session error: {}", e);
            }
            (status, e.to_string())
        })
    }
}

/// Implementation for http::Error (used by Response::builder())
impl<T> IntoResponseError<T> for HttpResponse<T> {
    fn into_response_error(self) -> Result<T, (StatusCode, String)> {
        self.map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))
    }
}
