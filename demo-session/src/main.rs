use std::sync::Arc;

use axum::{
    Router, middleware,
    routing::{get, post},
};

use cookie_session_axum::{SessionManager, cookie_scope, require_session_redirect};

mod handlers;
mod server;

use crate::{
    handlers::{index, login, login_form, logout, protected},
    server::{init_tracing, port_from_env, spawn_http_server},
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    init_tracing(env!("CARGO_CRATE_NAME"));

    let manager = Arc::new(SessionManager::from_env()?);

    let protected_routes = Router::new()
        .route("/protected", get(protected))
        .route_layer(middleware::from_fn_with_state(
            manager.clone(),
            require_session_redirect,
        ));

    let app = Router::new()
        .route("/", get(index))
        .route("/login", get(login_form).post(login))
        .route("/logout", post(logout))
        .merge(protected_routes)
        .layer(middleware::from_fn(cookie_scope))
        .with_state(manager);

    spawn_http_server(port_from_env(), app).await?;
    Ok(())
}
