use axum::{extract::State, routing::get, Router};

use crate::{
    extractors::{IsHtmx, MaybeUser},
    names,
    services::leaderboard::top_scores,
    views, AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new().route("/leaderboard", get(leaderboard))
}

async fn leaderboard(
    State(state): State<AppState>,
    IsHtmx(is_htmx): IsHtmx,
    MaybeUser(user): MaybeUser,
) -> maud::Markup {
    let entries = top_scores(state.db.score_histories().await, names::LEADERBOARD_SIZE);
    views::render(
        is_htmx,
        "Leaderboard",
        views::leaderboard::leaderboard(&entries),
        user.as_ref().map(|u| u.username.as_str()),
    )
}
