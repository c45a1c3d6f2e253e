use axum::{
    extract::{Form, Query, State},
    response::{IntoResponse, Redirect},
    routing::get,
    Router,
};
use axum_extra::extract::SignedCookieJar;
use serde::Deserialize;

use crate::{
    extractors::{IsHtmx, MaybeUser},
    names,
    rejections::{AppError, ResultExt},
    utils, views, AppState,
};

use crate::views::homepage as homepage_views;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(homepage))
        .route("/register", get(register_page).post(register_post))
        .route("/login", get(login_page).post(login_post))
        .route("/logout", get(logout))
}

async fn homepage(IsHtmx(is_htmx): IsHtmx, MaybeUser(user): MaybeUser) -> maud::Markup {
    let username = user.as_ref().map(|u| u.username.as_str());
    views::render(
        is_htmx,
        "Quizzes",
        homepage_views::category_list(username),
        username,
    )
}

async fn register_page(IsHtmx(is_htmx): IsHtmx) -> maud::Markup {
    views::render(
        is_htmx,
        "Register",
        homepage_views::register(homepage_views::RegisterState::NoError),
        None,
    )
}

#[derive(Deserialize)]
struct LoginQuery {
    notice: Option<String>,
}

async fn login_page(IsHtmx(is_htmx): IsHtmx, Query(query): Query<LoginQuery>) -> maud::Markup {
    views::render(
        is_htmx,
        "Log In",
        homepage_views::login(homepage_views::LoginState::from_notice(
            query.notice.as_deref(),
        )),
        None,
    )
}

#[derive(Deserialize)]
struct RegisterPost {
    username: String,
    password: String,
}

async fn register_post(
    State(state): State<AppState>,
    IsHtmx(is_htmx): IsHtmx,
    jar: SignedCookieJar,
    Form(body): Form<RegisterPost>,
) -> Result<axum::response::Response, AppError> {
    use crate::services::auth::RegisterOutcome;

    let outcome = state
        .auth
        .register(&body.username, &body.password)
        .await
        .reject("registration failed")?;

    let register_state = match outcome {
        RegisterOutcome::LoggedIn(session_token) => {
            let cookie = utils::cookie(
                names::USER_SESSION_COOKIE_NAME,
                &session_token,
                state.secure_cookies,
            );
            return Ok((jar.add(cookie), Redirect::to(names::HOME_URL)).into_response());
        }
        RegisterOutcome::EmptyFields => homepage_views::RegisterState::EmptyFields,
        RegisterOutcome::UsernameTaken => homepage_views::RegisterState::UsernameTaken,
    };

    Ok(views::render(
        is_htmx,
        "Register",
        homepage_views::register(register_state),
        None,
    )
    .into_response())
}

#[derive(Deserialize)]
struct LoginPost {
    username: String,
    password: String,
}

async fn login_post(
    State(state): State<AppState>,
    IsHtmx(is_htmx): IsHtmx,
    jar: SignedCookieJar,
    Form(body): Form<LoginPost>,
) -> Result<axum::response::Response, AppError> {
    use crate::services::auth::LoginOutcome;

    let outcome = state
        .auth
        .login(&body.username, &body.password)
        .await
        .reject("login failed")?;

    match outcome {
        LoginOutcome::Success(session_token) => {
            let cookie = utils::cookie(
                names::USER_SESSION_COOKIE_NAME,
                &session_token,
                state.secure_cookies,
            );
            Ok((jar.add(cookie), Redirect::to(names::HOME_URL)).into_response())
        }
        LoginOutcome::InvalidCredentials => Ok(views::render(
            is_htmx,
            "Log In",
            homepage_views::login(homepage_views::LoginState::InvalidCredentials),
            None,
        )
        .into_response()),
    }
}

async fn logout(
    State(state): State<AppState>,
    jar: SignedCookieJar,
) -> Result<impl IntoResponse, AppError> {
    if let Some(session_id) = jar
        .get(names::USER_SESSION_COOKIE_NAME)
        .map(|c| c.value().to_string())
    {
        state
            .auth
            .logout(&session_id)
            .await
            .reject("could not end session")?;
    }

    let jar = jar.remove(utils::clear_cookie(names::USER_SESSION_COOKIE_NAME));
    Ok((jar, Redirect::to(names::HOME_URL)))
}
