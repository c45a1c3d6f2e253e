use maud::{html, Markup, DOCTYPE};

use crate::{names, utils, views::components};

const HTMX_CONFIG: &str = r#"{"responseHandling":[{"code":"204","swap":false},{"code":".*","swap":true}]}"#;

fn css() -> Markup {
    html! {
        link rel="stylesheet" href="https://cdn.jsdelivr.net/npm/@picocss/pico@2/css/pico.min.css";
        link rel="stylesheet" href="/static/index.css";
    }
}

fn js() -> Markup {
    html! {
        meta name="htmx-config" content=(HTMX_CONFIG);
        script src="https://unpkg.com/htmx.org@2.0.4" {}
    }
}

fn icon() -> Markup {
    html! {
        link rel="icon" href="/static/img/icon.svg" type="image/svg+xml" {}
    }
}

fn header(username: Option<&str>) -> Markup {
    html! {
        header {
            nav {
                ul {
                    li {
                        a href=(names::HOME_URL) {
                            strong { "Triviaboard" }
                        }
                    }
                }
                ul {
                    li { (components::nav_link(names::LEADERBOARD_URL, "Leaderboard")) }
                    @if let Some(username) = username {
                        li."secondary" { (username) }
                        li { (components::nav_link(names::LOGOUT_URL, "Log out")) }
                    } @else {
                        li { (components::nav_link(names::LOGIN_URL, "Log in")) }
                        li { (components::nav_link(names::REGISTER_URL, "Register")) }
                    }
                    li."secondary" { small { (utils::VERSION) } }
                }
            }
        }
    }
}

fn main(body: Markup) -> Markup {
    html! {
        main { (body) }
    }
}

/// Everything inside `<body>`; also what boosted requests swap in.
fn chrome(body: Markup, username: Option<&str>) -> Markup {
    html! {
        (header(username))
        (main(body))
    }
}

pub fn page(title: &str, body: Markup, username: Option<&str>) -> Markup {
    html! {
        (DOCTYPE)
        head {
            meta charset="utf-8";
            meta name="viewport" content="width=device-width, initial-scale=1";
            meta name="color-scheme" content="light dark";

            (css())
            (js())
            (icon())

            title { (format!("{title} - Triviaboard")) }
        }

        body."container" hx-boost="true" {
            (chrome(body, username))
        }
    }
}

pub fn titled(title: &str, body: Markup) -> Markup {
    html! {
        title { (title) " - Triviaboard" }
        (body)
    }
}

/// Full page for normal navigation, body fragment for htmx-boosted requests.
pub fn render(is_htmx: bool, title: &str, body: Markup, username: Option<&str>) -> Markup {
    if is_htmx {
        titled(title, chrome(body, username))
    } else {
        page(title, body, username)
    }
}
