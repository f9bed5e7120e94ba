//! Where allowed-guess word lists come from
//!
//! Lists are plain text, one word per line, one file per word length named
//! `allowed-<L>.txt`. They are served over HTTP or read from a local directory.

use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;

/// Errors raised while fetching a word list
#[derive(Debug, Error)]
pub enum DictionaryError {
    #[error("request for {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} returned status {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// File name of the list holding words of `length` glyphs
#[must_use]
pub fn list_file_name(length: usize) -> String {
    format!("allowed-{length}.txt")
}

/// A provider of raw word lists
#[async_trait]
pub trait WordListSource: Send + Sync {
    /// Fetch the raw newline-separated list for words of `length` glyphs
    async fn fetch(&self, length: usize) -> Result<String, DictionaryError>;
}

/// Word lists served over HTTP as `{base_url}/allowed-<L>.txt`
pub struct HttpWordListSource {
    base_url: String,
    client: reqwest::Client,
}

impl HttpWordListSource {
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    #[must_use]
    pub fn url_for(&self, length: usize) -> String {
        format!("{}/{}", self.base_url, list_file_name(length))
    }
}

#[async_trait]
impl WordListSource for HttpWordListSource {
    async fn fetch(&self, length: usize) -> Result<String, DictionaryError> {
        let url = self.url_for(length);
        tracing::debug!("Fetching word list: {url}");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|source| DictionaryError::Http {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(DictionaryError::Status { url, status });
        }

        response
            .text()
            .await
            .map_err(|source| DictionaryError::Http { url, source })
    }
}

/// Word lists read from `{dir}/allowed-<L>.txt`
pub struct DirWordListSource {
    dir: PathBuf,
}

impl DirWordListSource {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

#[async_trait]
impl WordListSource for DirWordListSource {
    async fn fetch(&self, length: usize) -> Result<String, DictionaryError> {
        let path = self.dir.join(list_file_name(length));
        tracing::debug!("Reading word list: {}", path.display());

        tokio::fs::read_to_string(&path)
            .await
            .map_err(|source| DictionaryError::Io { path, source })
    }
}

/// Configured location of the word lists
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DictionaryLocation {
    Url(String),
    Dir(PathBuf),
}

impl DictionaryLocation {
    /// `http://` and `https://` values are URLs, anything else is a directory
    #[must_use]
    pub fn parse(value: &str) -> Self {
        let value = value.trim();
        if value.starts_with("http://") || value.starts_with("https://") {
            Self::Url(value.to_string())
        } else {
            Self::Dir(PathBuf::from(value))
        }
    }

    #[must_use]
    pub fn into_source(self) -> Arc<dyn WordListSource> {
        match self {
            Self::Url(url) => Arc::new(HttpWordListSource::new(url)),
            Self::Dir(dir) => Arc::new(DirWordListSource::new(dir)),
        }
    }
}
