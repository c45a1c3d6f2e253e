use maud::{html, Markup, Render};

/// Link that htmx boosts into a body swap, with a plain href fallback.
pub fn nav_link(href: &str, body: impl Render) -> Markup {
    html! {
        a href=(href) hx-push-url="true" {
            (body)
        }
    }
}

/// Inline notice shown above a form.
pub fn notice(message: &str) -> Markup {
    html! {
        p."notice" role="alert" { (message) }
    }
}
