use std::sync::Arc;

use axum::{
    Extension, Form,
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Redirect},
};
use serde::Deserialize;

use cookie_session_axum::{IntoResponseError, SessionClaims, SessionManager};

type AppState = Arc<SessionManager>;

#[derive(Debug, Deserialize)]
pub(crate) struct LoginForm {
    email: String,
}

pub(crate) async fn index(
    State(manager): State<AppState>,
) -> Result<Html<String>, (StatusCode, String)> {
    let session = manager.get_session().await.into_response_error()?;

    let body = match session {
        Some(claims) => format!(
            r#"<p>Signed in as {} (session valid until {})</p>
<form method="post" action="/logout"><button>Log out</button></form>
<p><a href="/protected">Protected page</a></p>"#,
            escape(claims.email()),
            claims.expires_at().to_rfc3339()
        ),
        None => r#"<p>Not signed in.</p><p><a href="/login">Log in</a></p>"#.to_string(),
    };
    Ok(Html(body))
}

pub(crate) async fn login_form() -> Html<&'static str> {
    Html(
        r#"<form method="post" action="/login">
<label>Email <input type="email" name="email" required></label>
<button>Log in</button>
</form>"#,
    )
}

/// Demo login: any well-formed email is accepted and gets a fresh user id
pub(crate) async fn login(
    State(manager): State<AppState>,
    Form(form): Form<LoginForm>,
) -> Result<Redirect, (StatusCode, String)> {
    let email = form.email.trim();
    if email.is_empty() || !email.contains('@') {
        return Err((StatusCode::BAD_REQUEST, "Invalid email".to_string()));
    }

    let user_id = uuid::Uuid::new_v4().to_string();
    manager
        .create_session(&user_id, email)
        .await
        .into_response_error()?;

    tracing::info!(user_id = %user_id, "User logged in");
    Ok(Redirect::to("/protected"))
}

pub(crate) async fn logout(
    State(manager): State<AppState>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    manager.delete_session().await.into_response_error()?;

    axum::response::Response::builder()
        .status(StatusCode::SEE_OTHER)
        .header(axum::http::header::LOCATION, "/")
        .body(axum::body::Body::empty())
        .into_response_error()
}

pub(crate) async fn protected(Extension(claims): Extension<SessionClaims>) -> Html<String> {
    Html(format!(
        "<p>Hello {} (user id {})</p><p><a href=\"/\">Home</a></p>",
        escape(claims.email()),
        escape(claims.user_id())
    ))
}

fn escape(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
