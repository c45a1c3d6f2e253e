use maud::{html, Markup};

use crate::{
    models::{Question, Quiz, ScoreCard},
    names,
    views::components,
};

fn question_card(number: usize, question: &Question) -> Markup {
    let question_ref = question.id.to_string();
    let answer_field = names::answer_field(&question_ref);

    html! {
        article.question {
            input type="hidden" name=(names::QUESTION_IDS_FIELD) value=(question_ref);
            header {
                small { "Question " (number) }
                h3 { (question.prompt) }
            }
            @if let Some(image) = &question.image {
                img.question-image src=(image) alt="" loading="lazy";
            }
            fieldset {
                @for option in &question.options {
                    label {
                        input type="radio" name=(answer_field) value=(option);
                        (option)
                    }
                }
            }
        }
    }
}

pub fn quiz_page(quiz: &Quiz) -> Markup {
    html! {
        h1 { (quiz.category.title) }
        p { (quiz.questions.len()) " questions. Pick one answer for each." }
        form action=(names::RESULTS_URL) method="post" {
            input type="hidden" name=(names::CATEGORY_FIELD) value=(quiz.category.title);
            @for (idx, question) in quiz.questions.iter().enumerate() {
                (question_card(idx + 1, question))
            }
            button type="submit" { "Submit answers" }
        }
    }
}

pub fn results_page(card: ScoreCard) -> Markup {
    html! {
        h1 { "Results" }
        article {
            p { mark { (card.category.title) } }
            h2 { "You got " (card.correct) " out of " (card.total) " correct." }
        }
        p {
            (components::nav_link(names::HOME_URL, "Take another quiz"))
            " · "
            (components::nav_link(names::LEADERBOARD_URL, "See the leaderboard"))
        }
    }
}
