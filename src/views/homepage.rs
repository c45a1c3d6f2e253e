use maud::{html, Markup};

use crate::{
    models::CATEGORIES,
    names,
    views::components,
};

pub fn category_list(username: Option<&str>) -> Markup {
    html! {
        h1 { "Pick a quiz" }
        @if username.is_none() {
            p {
                a href=(names::LOGIN_URL) { "Log in" }
                " or "
                a href=(names::REGISTER_URL) { "register" }
                " to take a quiz and get on the leaderboard."
            }
        }
        div.category-grid {
            @for (idx, category) in CATEGORIES.iter().enumerate() {
                article.category-card {
                    (components::nav_link(&names::quiz_page_url(idx), category.title))
                }
            }
        }
    }
}

pub enum RegisterState {
    NoError,
    UsernameTaken,
    EmptyFields,
}

pub fn register(state: RegisterState) -> Markup {
    let error_msg = match state {
        RegisterState::NoError => None,
        RegisterState::UsernameTaken => Some("Username already exists"),
        RegisterState::EmptyFields => Some("Username and password are required"),
    };

    html! {
        h1 { "Register" }
        article style="width: fit-content;" {
            @if let Some(msg) = error_msg {
                (components::notice(msg))
            }
            form action=(names::REGISTER_URL) method="post" {
                label {
                    "Username"
                    input name="username"
                          type="text"
                          autocomplete="username"
                          required="true"
                          aria-invalid=[error_msg.map(|_| "true")];
                }
                label {
                    "Password"
                    input name="password"
                          type="password"
                          autocomplete="new-password"
                          required="true";
                }
                button type="submit" { "Register" }
            }
            p {
                "Already have an account? "
                a href=(names::LOGIN_URL) { "Log in" }
            }
        }
    }
}

pub enum LoginState {
    NoError,
    InvalidCredentials,
    UserMissing,
}

impl LoginState {
    /// State for a `?notice=` passed along with a redirect to the login page.
    pub fn from_notice(notice: Option<&str>) -> Self {
        match notice {
            Some(names::NOTICE_USER_MISSING) => LoginState::UserMissing,
            _ => LoginState::NoError,
        }
    }
}

pub fn login(state: LoginState) -> Markup {
    let error_msg = match state {
        LoginState::NoError => None,
        LoginState::InvalidCredentials => Some("Invalid username or password"),
        LoginState::UserMissing => Some("User not found. Please log in again."),
    };

    html! {
        h1 { "Log in" }
        article style="width: fit-content;" {
            @if let Some(msg) = error_msg {
                (components::notice(msg))
            }
            form action=(names::LOGIN_URL) method="post" {
                label {
                    "Username"
                    input name="username"
                          type="text"
                          autocomplete="username"
                          required="true";
                }
                label {
                    "Password"
                    input name="password"
                          type="password"
                          autocomplete="current-password"
                          required="true"
                          aria-invalid=[matches!(state, LoginState::InvalidCredentials).then_some("true")];
                }
                button type="submit" { "Log in" }
            }
            p {
                "No account yet? "
                a href=(names::REGISTER_URL) { "Register" }
            }
        }
    }
}
