use std::{collections::HashSet, fmt, sync::Arc};

use crate::{
    bank::QuestionBank,
    clients::{
        trivia::{TriviaApi, TriviaClient},
        unsplash::{ImageSearch, UnsplashClient},
        UpstreamError,
    },
    models::{Category, Question, QuestionRef, Quiz, ScoreCard, Submission},
    names,
};

#[derive(Debug)]
pub enum QuizError {
    UnknownCategory,
    /// Neither the bank nor the trivia API produced a single question.
    InsufficientQuestions,
    /// A submitted question id could not be found in its source.
    UnresolvedQuestion(QuestionRef),
    Invalid(&'static str),
    Upstream(UpstreamError),
}

impl fmt::Display for QuizError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuizError::UnknownCategory => f.write_str("unknown quiz category"),
            QuizError::InsufficientQuestions => f.write_str("no questions available"),
            QuizError::UnresolvedQuestion(id) => write!(f, "question {id} could not be found"),
            QuizError::Invalid(msg) => f.write_str(msg),
            QuizError::Upstream(e) => write!(f, "trivia API unavailable: {e}"),
        }
    }
}

impl std::error::Error for QuizError {}

pub struct QuizService<T: TriviaApi = TriviaClient, I: ImageSearch = UnsplashClient> {
    bank: Arc<QuestionBank>,
    trivia: T,
    images: I,
}

impl<T: TriviaApi + Clone, I: ImageSearch + Clone> Clone for QuizService<T, I> {
    fn clone(&self) -> Self {
        Self {
            bank: self.bank.clone(),
            trivia: self.trivia.clone(),
            images: self.images.clone(),
        }
    }
}

impl<T: TriviaApi, I: ImageSearch> QuizService<T, I> {
    pub fn new(bank: QuestionBank, trivia: T, images: I) -> Self {
        Self {
            bank: Arc::new(bank),
            trivia,
            images,
        }
    }

    /// Resolve the route segment and assemble a quiz for it.
    pub async fn quiz_for(&self, key: &str) -> Result<Quiz, QuizError> {
        let (_, category) = Category::lookup(key).ok_or(QuizError::UnknownCategory)?;
        let questions = self.assemble(&category).await?;
        Ok(Quiz {
            category,
            questions,
        })
    }

    /// Bank questions first, then trivia API questions up to the quiz size.
    pub async fn assemble(&self, category: &Category) -> Result<Vec<Question>, QuizError> {
        let mut questions = self.bank.sample(
            category.title,
            names::LOCAL_QUESTIONS_PER_QUIZ,
            &mut rand::thread_rng(),
        );

        let wanted = names::MAX_QUIZ_QUESTIONS - questions.len();
        let mut remote = self
            .trivia
            .fetch_questions(category.slug, wanted)
            .await
            .map_err(|e| {
                tracing::warn!("could not top up {} quiz: {e}", category.title);
                QuizError::Upstream(e)
            })?;

        let local_prompts: HashSet<String> = questions.iter().map(Question::dedup_key).collect();
        remote.retain(|q| !local_prompts.contains(&q.dedup_key()));
        remote.truncate(wanted);

        self.attach_images(&mut remote).await;
        questions.extend(remote);

        if questions.is_empty() {
            return Err(QuizError::InsufficientQuestions);
        }
        if questions.len() < names::MAX_QUIZ_QUESTIONS {
            tracing::info!(
                "{} quiz assembled with only {} questions",
                category.title,
                questions.len()
            );
        }
        Ok(questions)
    }

    /// Best effort: a failed search leaves the question without an image.
    async fn attach_images(&self, questions: &mut [Question]) {
        for question in questions.iter_mut() {
            question.image = match self.images.find_image(&question.correct_answer).await {
                Ok(image) => image,
                Err(e) => {
                    tracing::warn!("no image for {}: {e}", question.id);
                    None
                }
            };
        }
    }

    /// Count correct answers, resolving each question against its own source.
    /// Local questions must belong to the submitted category.
    pub async fn score(&self, submission: &Submission) -> Result<ScoreCard, QuizError> {
        if submission.answers.is_empty() {
            return Err(QuizError::Invalid("no questions submitted"));
        }
        if submission.answers.len() > names::MAX_QUIZ_QUESTIONS {
            return Err(QuizError::Invalid("too many answers submitted"));
        }
        let (_, category) = Category::lookup(&submission.category)
            .ok_or(QuizError::Invalid("unknown quiz category"))?;

        let mut correct = 0;
        for (question_ref, selected) in &submission.answers {
            let answer = self.correct_answer(&category, question_ref).await?;
            if selected.as_deref() == Some(answer.as_str()) {
                correct += 1;
            }
        }

        Ok(ScoreCard {
            category,
            correct,
            total: submission.answers.len() as u32,
        })
    }

    async fn correct_answer(
        &self,
        category: &Category,
        question_ref: &QuestionRef,
    ) -> Result<String, QuizError> {
        let answer = match question_ref {
            QuestionRef::Local(id) => self
                .bank
                .correct_answer(category.title, id)
                .map(str::to_string),
            QuestionRef::Remote(id) => self
                .trivia
                .fetch_question(id)
                .await
                .map_err(QuizError::Upstream)?
                .map(|q| q.correct_answer),
        };
        answer.ok_or_else(|| QuizError::UnresolvedQuestion(question_ref.clone()))
    }
}
