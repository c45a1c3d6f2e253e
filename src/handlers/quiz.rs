use axum::{
    extract::{Form, Path, State},
    routing::{get, post},
    Router,
};

use crate::{
    extractors::{AuthGuard, IsHtmx},
    models::Submission,
    rejections::{AppError, ResultExt},
    services::quiz::QuizError,
    views::{self, quiz as quiz_views},
    AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/quiz/{category}", get(quiz_page))
        .route("/results", post(results))
}

fn quiz_rejection(err: QuizError) -> AppError {
    match err {
        QuizError::UnknownCategory => AppError::NotFound("no such quiz category"),
        QuizError::InsufficientQuestions => {
            AppError::UpstreamUnavailable("not enough questions are available for this quiz right now")
        }
        QuizError::UnresolvedQuestion(id) => {
            tracing::warn!("submitted question {id} could not be resolved");
            AppError::Input("a submitted question could not be found")
        }
        QuizError::Invalid(msg) => AppError::Input(msg),
        QuizError::Upstream(e) => {
            tracing::error!("trivia API unavailable: {e}");
            AppError::UpstreamUnavailable("the trivia service is unavailable, please try again later")
        }
    }
}

async fn quiz_page(
    AuthGuard(user): AuthGuard,
    State(state): State<AppState>,
    IsHtmx(is_htmx): IsHtmx,
    Path(category): Path<String>,
) -> Result<maud::Markup, AppError> {
    let quiz = state.quiz.quiz_for(&category).await.map_err(quiz_rejection)?;

    tracing::debug!(
        "{} quiz with {} questions for {}",
        quiz.category.title,
        quiz.questions.len(),
        user.username
    );

    Ok(views::render(
        is_htmx,
        quiz.category.title,
        quiz_views::quiz_page(&quiz),
        Some(&user.username),
    ))
}

async fn results(
    AuthGuard(user): AuthGuard,
    State(state): State<AppState>,
    IsHtmx(is_htmx): IsHtmx,
    Form(fields): Form<Vec<(String, String)>>,
) -> Result<maud::Markup, AppError> {
    let submission = Submission::from_pairs(&fields)
        .map_err(|_| AppError::Input("malformed question id"))?;

    let card = state
        .quiz
        .score(&submission)
        .await
        .map_err(quiz_rejection)?;

    let recorded = state
        .db
        .record_score(&user.username, card.correct)
        .await
        .reject("could not record score")?;
    if !recorded {
        return Err(AppError::UserMissing);
    }

    Ok(views::render(
        is_htmx,
        "Results",
        quiz_views::results_page(card),
        Some(&user.username),
    ))
}
