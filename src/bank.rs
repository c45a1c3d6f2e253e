use std::{collections::HashMap, path::Path};

use color_eyre::{eyre::WrapErr, Result};
use rand::{seq::SliceRandom, Rng};
use serde::Deserialize;

use crate::models::{Question, QuestionRef};

#[derive(Deserialize)]
struct BankFile {
    quizzes: HashMap<String, Vec<BankQuestion>>,
}

#[derive(Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
struct BankQuestion {
    id: String,
    question: String,
    correct_answer: String,
    #[serde(default)]
    incorrect_answers: Vec<String>,
}

impl BankQuestion {
    fn to_question(&self) -> Question {
        Question::new(
            QuestionRef::Local(self.id.clone()),
            self.question.clone(),
            self.correct_answer.clone(),
            self.incorrect_answers.clone(),
        )
    }
}

/// Curated questions keyed by category title, read once at startup.
#[derive(Default)]
pub struct QuestionBank {
    quizzes: HashMap<String, Vec<BankQuestion>>,
}

impl QuestionBank {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .wrap_err_with(|| format!("could not read question bank {}", path.display()))?;
        let bank = Self::from_json(&raw)?;
        tracing::info!(
            "question bank loaded from {}: {} categories, {} questions",
            path.display(),
            bank.quizzes.len(),
            bank.len()
        );
        Ok(bank)
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        let file: BankFile = serde_json::from_str(raw).wrap_err("malformed question bank")?;
        Ok(Self {
            quizzes: file.quizzes,
        })
    }

    pub fn len(&self) -> usize {
        self.quizzes.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Up to `amount` distinct questions of the category, chosen at random.
    pub fn sample<R: Rng + ?Sized>(&self, category: &str, amount: usize, rng: &mut R) -> Vec<Question> {
        self.quizzes
            .get(category)
            .map(|questions| {
                questions
                    .choose_multiple(rng, amount)
                    .map(BankQuestion::to_question)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// The correct answer of a bank question in the given category.
    pub fn correct_answer(&self, category: &str, id: &str) -> Option<&str> {
        self.quizzes
            .get(category)?
            .iter()
            .find(|q| q.id == id)
            .map(|q| q.correct_answer.as_str())
    }
}
