use axum_extra::extract::cookie::{Cookie, SameSite};

use crate::names;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Session cookie, expiring together with the server-side session.
pub fn cookie(name: &str, value: &str, secure: bool) -> Cookie<'static> {
    Cookie::build((name.to_owned(), value.to_owned()))
        .http_only(true)
        .max_age(time::Duration::seconds(names::SESSION_TTL_SECS as i64))
        .secure(secure)
        .path("/")
        .same_site(SameSite::Strict)
        .build()
}

/// Matches the path `cookie` sets so the jar's removal cookie reaches the browser's copy.
pub fn clear_cookie(name: &str) -> Cookie<'static> {
    Cookie::build((name.to_owned(), "")).path("/").build()
}
