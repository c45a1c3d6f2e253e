use std::time::Duration;

use color_eyre::Result;
use reqwest::StatusCode;
use serde::Deserialize;

use super::{http_client, UpstreamError};
use crate::models::{Question, QuestionRef};

#[cfg_attr(test, mockall::automock)]
pub trait TriviaApi: Send + Sync {
    /// Up to `limit` questions of the category (API slug).
    fn fetch_questions(
        &self,
        category: &str,
        limit: usize,
    ) -> impl std::future::Future<Output = Result<Vec<Question>, UpstreamError>> + Send;

    /// A single question by its API id, `None` if the API does not know it.
    fn fetch_question(
        &self,
        id: &str,
    ) -> impl std::future::Future<Output = Result<Option<Question>, UpstreamError>> + Send;
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RemoteQuestion {
    id: String,
    question: QuestionText,
    correct_answer: String,
    #[serde(default)]
    incorrect_answers: Vec<String>,
}

/// v2 wraps the prompt in an object; older payloads send a bare string.
#[derive(Deserialize)]
#[serde(untagged)]
enum QuestionText {
    Plain(String),
    Rich { text: String },
}

impl From<RemoteQuestion> for Question {
    fn from(q: RemoteQuestion) -> Self {
        let prompt = match q.question {
            QuestionText::Plain(text) | QuestionText::Rich { text } => text,
        };
        Question::new(
            QuestionRef::Remote(q.id),
            prompt,
            q.correct_answer,
            q.incorrect_answers,
        )
    }
}

/// Client for the-trivia-api.com v2.
#[derive(Clone)]
pub struct TriviaClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl TriviaClient {
    pub fn new(base_url: String, api_key: String, timeout: Duration) -> Result<Self> {
        Ok(Self {
            http: http_client(timeout)?,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }
}

impl TriviaApi for TriviaClient {
    async fn fetch_questions(
        &self,
        category: &str,
        limit: usize,
    ) -> Result<Vec<Question>, UpstreamError> {
        let limit = limit.to_string();
        let resp = self
            .http
            .get(format!("{}/v2/questions", self.base_url))
            .header("X-API-Key", &self.api_key)
            .query(&[("categories", category), ("limit", limit.as_str())])
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            tracing::error!("trivia API error fetching {category}: {status}");
            return Err(UpstreamError::Status(status));
        }

        let questions = resp.json::<Vec<RemoteQuestion>>().await?;
        tracing::debug!("trivia API returned {} {category} questions", questions.len());
        Ok(questions.into_iter().map(Question::from).collect())
    }

    async fn fetch_question(&self, id: &str) -> Result<Option<Question>, UpstreamError> {
        // ids come back from a user-submitted form and end up in the path
        if !id.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_') {
            return Ok(None);
        }

        let resp = self
            .http
            .get(format!("{}/v2/question/{id}", self.base_url))
            .header("X-API-Key", &self.api_key)
            .send()
            .await?;

        match resp.status() {
            StatusCode::NOT_FOUND => Ok(None),
            status if status.is_success() => {
                let question = resp.json::<RemoteQuestion>().await?;
                Ok(Some(question.into()))
            }
            status => {
                tracing::error!("trivia API error fetching question {id}: {status}");
                Err(UpstreamError::Status(status))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_v2_question_list() {
        let body = r#"[{
            "category": "music",
            "id": "622a1c357cc59eab6f94fc82",
            "correctAnswer": "Kylie Minogue",
            "incorrectAnswers": ["Dannii Minogue", "Natalie Imbruglia", "Delta Goodrem"],
            "question": {"text": "Who had a hit with Spinning Around?"},
            "tags": ["music"],
            "type": "text_choice",
            "difficulty": "medium",
            "regions": [],
            "isNiche": false
        }]"#;
        let parsed: Vec<RemoteQuestion> = serde_json::from_str(body).unwrap();
        let q = Question::from(parsed.into_iter().next().unwrap());

        assert_eq!(
            q.id,
            QuestionRef::Remote("622a1c357cc59eab6f94fc82".to_string())
        );
        assert_eq!(q.prompt, "Who had a hit with Spinning Around?");
        assert_eq!(q.correct_answer, "Kylie Minogue");
        assert_eq!(q.options.len(), 4);
    }

    #[test]
    fn accepts_plain_string_prompt() {
        let body = r#"{"id": "abc", "question": "Capital of France?", "correctAnswer": "Paris"}"#;
        let q = Question::from(serde_json::from_str::<RemoteQuestion>(body).unwrap());
        assert_eq!(q.prompt, "Capital of France?");
        assert_eq!(q.options, vec!["Paris".to_string()]);
    }

    #[tokio::test]
    async fn path_like_id_is_not_requested() {
        let client = TriviaClient::new(
            "http://127.0.0.1:1".to_string(),
            "key".to_string(),
            Duration::from_secs(2),
        )
        .unwrap();

        assert!(client.fetch_question("../questions").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn unreachable_api_is_transport_error() {
        let client = TriviaClient::new(
            "http://127.0.0.1:1".to_string(),
            "key".to_string(),
            Duration::from_secs(2),
        )
        .unwrap();

        let err = client.fetch_questions("music", 8).await.unwrap_err();
        assert!(matches!(err, UpstreamError::Transport(_)));
    }
}
