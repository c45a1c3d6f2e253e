pub mod trivia;
pub mod unsplash;

use std::{fmt, time::Duration};

use color_eyre::Result;

/// Failure talking to a third-party API. "Nothing found" is not an error.
#[derive(Debug)]
pub enum UpstreamError {
    /// Connection, TLS or timeout failure.
    Transport(reqwest::Error),
    /// The API answered with an unexpected status.
    Status(reqwest::StatusCode),
    /// The body did not have the expected shape.
    Malformed(String),
}

impl fmt::Display for UpstreamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UpstreamError::Transport(e) => write!(f, "upstream unreachable: {e}"),
            UpstreamError::Status(status) => write!(f, "upstream returned {status}"),
            UpstreamError::Malformed(msg) => write!(f, "upstream sent a malformed body: {msg}"),
        }
    }
}

impl std::error::Error for UpstreamError {}

impl From<reqwest::Error> for UpstreamError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            UpstreamError::Malformed(e.to_string())
        } else {
            UpstreamError::Transport(e)
        }
    }
}

fn http_client(timeout: Duration) -> Result<reqwest::Client> {
    Ok(reqwest::Client::builder()
        .timeout(timeout)
        .user_agent(concat!("triviaboard/", env!("CARGO_PKG_VERSION")))
        .build()?)
}
