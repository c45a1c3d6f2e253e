pub mod bank;
pub mod clients;
pub mod db;
pub mod extractors;
pub mod handlers;
pub mod models;
pub mod names;
pub mod rejections;
pub mod services;
pub mod statics;
pub mod utils;
pub mod views;

use axum::{extract::FromRef, middleware, Router};
use axum_extra::extract::cookie::Key;
use color_eyre::Result;

use crate::services::{auth::AuthService, quiz::QuizService};

/// Minimum length of the secret the cookie signing key is derived from.
pub const MIN_SESSION_SECRET_LEN: usize = 32;

#[derive(Clone)]
pub struct AppState {
    pub db: db::Db,
    pub auth: AuthService,
    pub quiz: QuizService,
    pub key: Key,
    pub secure_cookies: bool,
}

impl FromRef<AppState> for Key {
    fn from_ref(state: &AppState) -> Self {
        state.key.clone()
    }
}

/// Derive the cookie signing key from the configured session secret.
pub fn session_key(secret: &str) -> Result<Key> {
    if secret.len() < MIN_SESSION_SECRET_LEN {
        color_eyre::eyre::bail!(
            "session secret must be at least {MIN_SESSION_SECRET_LEN} bytes long"
        );
    }
    Ok(Key::derive_from(secret.as_bytes()))
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .merge(handlers::homepage::routes())
        .merge(handlers::quiz::routes())
        .merge(handlers::leaderboard::routes())
        .layer(middleware::from_fn(csrf_check))
        .nest("/static", statics::routes())
        .with_state(state)
}

async fn csrf_check(
    req: axum::http::Request<axum::body::Body>,
    next: middleware::Next,
) -> axum::response::Response {
    use axum::http::{Method, StatusCode};
    use axum::response::IntoResponse;

    let state_changing = [Method::POST, Method::PUT, Method::PATCH, Method::DELETE];

    if state_changing.contains(req.method()) {
        let has_hx_request = req
            .headers()
            .get("HX-Request")
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v == "true");

        if !has_hx_request {
            return (StatusCode::FORBIDDEN, "CSRF check failed").into_response();
        }
    }

    next.run(req).await
}
