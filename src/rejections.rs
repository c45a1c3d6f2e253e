use std::fmt::Display;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use maud::{html, Markup};

use crate::{names, views};

#[derive(Debug)]
pub enum AppError {
    Internal(&'static str),
    /// No valid session; answered with a redirect to the login page.
    Unauthorized,
    /// The session outlived its user record; login page with a notice.
    UserMissing,
    Input(&'static str),
    NotFound(&'static str),
    UpstreamUnavailable(&'static str),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::Unauthorized => return Redirect::to(names::LOGIN_URL).into_response(),
            AppError::UserMissing => {
                tracing::warn!("session refers to a missing user");
                let url = names::login_notice_url(names::NOTICE_USER_MISSING);
                return Redirect::to(&url).into_response();
            }
            AppError::Internal(msg) => {
                tracing::error!("internal error: {msg}");
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
            AppError::Input(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::UpstreamUnavailable(msg) => (StatusCode::SERVICE_UNAVAILABLE, msg),
        };

        if status != StatusCode::INTERNAL_SERVER_ERROR {
            tracing::debug!("request rejected: {message}");
        }
        (status, error_page(status, message)).into_response()
    }
}

fn error_page(status: StatusCode, message: &str) -> Markup {
    views::page(
        "Error",
        html! {
            h1 { (status.canonical_reason().unwrap_or("Error")) }
            p { (message) }
            a href=(names::HOME_URL) { "Back to the quizzes" }
        },
        None,
    )
}

pub trait ResultExt<T> {
    /// Log the error and turn it into an internal server error.
    fn reject(self, msg: &'static str) -> Result<T, AppError>;
}

impl<T, E: Display> ResultExt<T> for Result<T, E> {
    fn reject(self, msg: &'static str) -> Result<T, AppError> {
        self.map_err(|e| {
            tracing::error!("{msg}: {e}");
            AppError::Internal(msg)
        })
    }
}
