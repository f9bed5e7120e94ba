//! Word-of-the-day feed client
//!
//! The thesaurus feed returns a single JSON object for the requested date:
//!
//! ```json
//! { "term_id": "https://…", "answer": "appel", "answer_len": "5",
//!   "answer_hint": "fruit", "definition": "…" }
//! ```
//!
//! `answer_len` is advisory. The round length is always derived from the
//! normalized answer.

use crate::core::GameDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_API_URL: &str =
    "https://api.datasets.crow.nl/queries/redmer-kronemeijer/thesaurus-wordle/run";

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("request for {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("word feed returned status {status}")]
    Status { status: reqwest::StatusCode },

    #[error("word feed returned an unreadable payload: {0}")]
    Decode(#[from] serde_json::Error),
}

/// `answer_len` arrives either as a string or as a number
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerLength {
    Number(usize),
    Text(String),
}

impl AnswerLength {
    /// The advertised length, if it parses
    #[must_use]
    pub fn value(&self) -> Option<usize> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(s) => s.trim().parse().ok(),
        }
    }
}

/// The puzzle for one date, as served by the feed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordOfTheDay {
    /// Thesaurus link for the answer
    pub term_id: String,
    pub answer: String,
    #[serde(default)]
    pub answer_len: Option<AnswerLength>,
    #[serde(default)]
    pub answer_hint: Option<String>,
    #[serde(default)]
    pub definition: Option<String>,
    #[serde(default)]
    pub for_date: Option<String>,
}

impl WordOfTheDay {
    /// Decode a feed payload
    ///
    /// # Errors
    /// Returns `FeedError::Decode` if the payload is not a word-of-the-day object.
    pub fn from_json(body: &str) -> Result<Self, FeedError> {
        Ok(serde_json::from_str(body)?)
    }

    #[must_use]
    pub fn advertised_length(&self) -> Option<usize> {
        self.answer_len.as_ref().and_then(AnswerLength::value)
    }

    /// Hint text, ignoring blank hints
    #[must_use]
    pub fn hint(&self) -> Option<&str> {
        self.answer_hint
            .as_deref()
            .map(str::trim)
            .filter(|h| !h.is_empty())
    }

    /// Definition text, ignoring blank definitions
    #[must_use]
    pub fn definition(&self) -> Option<&str> {
        self.definition
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
    }
}

/// HTTP client for the thesaurus word feed
pub struct ThesaurusClient {
    api_url: String,
    http_client: reqwest::Client,
}

impl ThesaurusClient {
    #[must_use]
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            http_client: reqwest::Client::new(),
        }
    }

    /// Request URL for `date`
    #[must_use]
    pub fn url_for(&self, date: GameDate) -> String {
        let separator = if self.api_url.contains('?') { '&' } else { '?' };
        format!("{}{separator}today={}", self.api_url, date.to_xsd())
    }

    /// Fetch the word of the day for `date`
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - the request cannot be sent or the body cannot be read
    /// - the feed answers with a non-success status
    /// - the body is not a word-of-the-day object
    pub async fn fetch(&self, date: GameDate) -> Result<WordOfTheDay, FeedError> {
        let url = self.url_for(date);
        tracing::debug!("Fetching word of the day: {url}");

        let response = self
            .http_client
            .get(&url)
            .send()
            .await
            .map_err(|source| FeedError::Http {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!("Word feed returned {status} for {date}");
            return Err(FeedError::Status { status });
        }

        let body = response
            .text()
            .await
            .map_err(|source| FeedError::Http { url, source })?;

        let word = WordOfTheDay::from_json(&body)?;
        tracing::info!("Word of the day for {date} loaded ({})", word.term_id);
        Ok(word)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_carries_xsd_date() {
        let client = ThesaurusClient::new(DEFAULT_API_URL);
        let date = GameDate::parse("2025-03-03").unwrap();
        assert_eq!(
            client.url_for(date),
            format!("{DEFAULT_API_URL}?today=2025-03-03Z")
        );
    }

    #[test]
    fn url_appends_to_existing_query() {
        let client = ThesaurusClient::new("http://localhost/run?x=1");
        let date = GameDate::parse("2025-03-03").unwrap();
        assert_eq!(client.url_for(date), "http://localhost/run?x=1&today=2025-03-03Z");
    }

    #[test]
    fn decodes_string_length() {
        let word = WordOfTheDay::from_json(
            r#"{"term_id":"https://example.org/t/1","answer":"appel","answer_len":"5","answer_hint":"fruit"}"#,
        )
        .unwrap();
        assert_eq!(word.answer, "appel");
        assert_eq!(word.advertised_length(), Some(5));
        assert_eq!(word.hint(), Some("fruit"));
        assert_eq!(word.definition(), None);
    }

    #[test]
    fn decodes_numeric_length_and_definition() {
        let word = WordOfTheDay::from_json(
            r#"{"term_id":"t","answer":"ijsje","answer_len":4,"definition":" bevroren lekkernij "}"#,
        )
        .unwrap();
        assert_eq!(word.advertised_length(), Some(4));
        assert_eq!(word.definition(), Some("bevroren lekkernij"));
    }

    #[test]
    fn blank_or_missing_optionals() {
        let word =
            WordOfTheDay::from_json(r#"{"term_id":"t","answer":"appel","answer_hint":"  "}"#)
                .unwrap();
        assert_eq!(word.advertised_length(), None);
        assert_eq!(word.hint(), None);

        let odd = AnswerLength::Text("five".to_string());
        assert_eq!(odd.value(), None);
    }

    #[test]
    fn rejects_payload_without_answer() {
        assert!(matches!(
            WordOfTheDay::from_json(r#"{"term_id":"t"}"#),
            Err(FeedError::Decode(_))
        ));
        assert!(WordOfTheDay::from_json("[]").is_err());
    }
}
