use std::convert::Infallible;

use axum::{extract::FromRequestParts, http::request::Parts};
use axum_extra::extract::SignedCookieJar;

use crate::{
    db::models::{AuthUser, SessionLookup},
    names,
    rejections::AppError,
    AppState,
};

/// Extracts whether the request is an HTMX request by checking the `HX-Request` header.
pub struct IsHtmx(pub bool);

impl<S: Send + Sync> FromRequestParts<S> for IsHtmx {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let is_htmx = parts
            .headers
            .get("HX-Request")
            .and_then(|v: &axum::http::HeaderValue| v.to_str().ok())
            .is_some_and(|v| v == "true");
        Ok(IsHtmx(is_htmx))
    }
}

async fn session_lookup(parts: &Parts, state: &AppState) -> SessionLookup {
    let jar = SignedCookieJar::from_headers(&parts.headers, state.key.clone());
    let Some(session_id) = jar
        .get(names::USER_SESSION_COOKIE_NAME)
        .map(|c| c.value().to_string())
    else {
        return SessionLookup::Invalid;
    };

    match state.db.lookup_session(&session_id).await {
        Ok(lookup) => lookup,
        Err(e) => {
            tracing::error!("could not look up session: {e}");
            SessionLookup::Invalid
        }
    }
}

/// Guard extractor that verifies the signed session cookie against the store.
/// Carries the authenticated user's info for use in handlers.
pub struct AuthGuard(pub AuthUser);

impl FromRequestParts<AppState> for AuthGuard {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        match session_lookup(parts, state).await {
            SessionLookup::Active(user) => Ok(AuthGuard(user)),
            SessionLookup::UserMissing => Err(AppError::UserMissing),
            SessionLookup::Invalid => Err(AppError::Unauthorized),
        }
    }
}

/// The logged-in user on public pages, if any.
pub struct MaybeUser(pub Option<AuthUser>);

impl FromRequestParts<AppState> for MaybeUser {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        match session_lookup(parts, state).await {
            SessionLookup::Active(user) => Ok(MaybeUser(Some(user))),
            _ => Ok(MaybeUser(None)),
        }
    }
}
