use std::{fmt, str::FromStr};

use rand::seq::SliceRandom;

use crate::names;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Category {
    /// Display title, also the key in the question bank.
    pub title: &'static str,
    /// Category slug understood by the trivia API.
    pub slug: &'static str,
}

pub const CATEGORIES: [Category; 10] = [
    Category { title: "Music", slug: "music" },
    Category { title: "Sports and Leisure", slug: "sport_and_leisure" },
    Category { title: "Film and TV", slug: "film_and_tv" },
    Category { title: "Arts and Literature", slug: "arts_and_literature" },
    Category { title: "History", slug: "history" },
    Category { title: "Society and Culture", slug: "society_and_culture" },
    Category { title: "Science", slug: "science" },
    Category { title: "Geography", slug: "geography" },
    Category { title: "Food and Drink", slug: "food_and_drink" },
    Category { title: "General Knowledge", slug: "general_knowledge" },
];

impl Category {
    /// Resolve a route segment: a category index, a title, or an API slug.
    pub fn lookup(key: &str) -> Option<(usize, Category)> {
        let key = key.trim();
        if let Ok(idx) = key.parse::<usize>() {
            return CATEGORIES.get(idx).map(|c| (idx, *c));
        }
        CATEGORIES
            .iter()
            .position(|c| c.title.eq_ignore_ascii_case(key) || c.slug.eq_ignore_ascii_case(key))
            .map(|idx| (idx, CATEGORIES[idx]))
    }
}

/// Where a question came from, and its id within that source.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum QuestionRef {
    Local(String),
    Remote(String),
}

impl fmt::Display for QuestionRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuestionRef::Local(id) => write!(f, "local:{id}"),
            QuestionRef::Remote(id) => write!(f, "remote:{id}"),
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub struct InvalidQuestionRef;

impl fmt::Display for InvalidQuestionRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("question id must be `local:<id>` or `remote:<id>`")
    }
}

impl std::error::Error for InvalidQuestionRef {}

impl FromStr for QuestionRef {
    type Err = InvalidQuestionRef;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (source, id) = s.split_once(':').ok_or(InvalidQuestionRef)?;
        if id.is_empty() {
            return Err(InvalidQuestionRef);
        }
        match source {
            "local" => Ok(QuestionRef::Local(id.to_string())),
            "remote" => Ok(QuestionRef::Remote(id.to_string())),
            _ => Err(InvalidQuestionRef),
        }
    }
}

/// A question from either source, normalized at ingestion.
#[derive(Debug, Clone, PartialEq)]
pub struct Question {
    pub id: QuestionRef,
    pub prompt: String,
    pub options: Vec<String>,
    pub correct_answer: String,
    pub image: Option<String>,
}

impl Question {
    /// Build a question with the correct answer shuffled in among the incorrect ones.
    pub fn new(
        id: QuestionRef,
        prompt: String,
        correct_answer: String,
        incorrect_answers: Vec<String>,
    ) -> Self {
        let mut options = incorrect_answers;
        options.push(correct_answer.clone());
        options.shuffle(&mut rand::thread_rng());
        Self {
            id,
            prompt,
            options,
            correct_answer,
            image: None,
        }
    }

    /// Prompt text used to spot the same question coming from both sources.
    pub fn dedup_key(&self) -> String {
        self.prompt.trim().to_lowercase()
    }
}

#[derive(Debug)]
pub struct Quiz {
    pub category: Category,
    pub questions: Vec<Question>,
}

/// Answers posted from the quiz form, in question order.
#[derive(Debug, PartialEq)]
pub struct Submission {
    pub category: String,
    pub answers: Vec<(QuestionRef, Option<String>)>,
}

impl Submission {
    /// Parse the urlencoded results form. Repeated question ids are counted once.
    pub fn from_pairs(pairs: &[(String, String)]) -> Result<Self, InvalidQuestionRef> {
        let mut category = String::new();
        let mut answers: Vec<(QuestionRef, Option<String>)> = Vec::new();

        for (key, value) in pairs {
            if key == names::CATEGORY_FIELD {
                category = value.clone();
            } else if key == names::QUESTION_IDS_FIELD {
                let question_ref = value.parse::<QuestionRef>()?;
                if !answers.iter().any(|(r, _)| *r == question_ref) {
                    answers.push((question_ref, None));
                }
            }
        }

        for (question_ref, selected) in answers.iter_mut() {
            let field = names::answer_field(&question_ref.to_string());
            *selected = pairs
                .iter()
                .find(|(k, _)| *k == field)
                .map(|(_, v)| v.clone());
        }

        Ok(Self { category, answers })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreCard {
    pub category: Category,
    pub correct: u32,
    pub total: u32,
}
