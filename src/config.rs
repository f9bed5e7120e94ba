//! Runtime configuration
//!
//! Values come from `CROWDLE_*` environment variables first; command-line
//! flags override them afterwards in `main`.

use crate::core::{DateError, GameDate};
use crate::dictionary::DictionaryLocation;
use crate::feed::DEFAULT_API_URL;
use std::env;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Days covered by the recent-results and missed-days views
pub const HISTORY_DAYS: u64 = 7;

/// A setting that was present but could not be used
///
/// Returned rather than logged, since configuration is read before the
/// subscriber is installed.
#[derive(Debug, Error)]
pub enum ConfigWarning {
    #[error("ignoring CROWDLE_DATE: {0}")]
    InvalidDate(#[from] DateError),
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    /// Word-of-the-day feed endpoint
    pub api_url: String,
    /// Explicit word list location; `None` falls back to `<data dir>/dictionaries`
    pub dictionary: Option<DictionaryLocation>,
    /// Root for stored rounds and logs
    pub data_dir: PathBuf,
    /// Link appended to share text
    pub share_url: Option<String>,
    /// Play this date instead of today
    pub date: Option<GameDate>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            dictionary: None,
            data_dir: default_data_dir(),
            share_url: None,
            date: None,
        }
    }
}

impl AppConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `CROWDLE_API_URL` - Word-of-the-day endpoint
    /// - `CROWDLE_DICTIONARY` - Word list base URL or directory
    /// - `CROWDLE_DATA_DIR` - Directory for saved rounds and logs (default: platform-specific)
    /// - `CROWDLE_SHARE_URL` - Link included in share text
    /// - `CROWDLE_DATE` - Date to play, `YYYY-MM-DD`
    ///
    /// Unusable values are skipped and reported alongside the configuration.
    #[must_use]
    pub fn from_env() -> (Self, Vec<ConfigWarning>) {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> (Self, Vec<ConfigWarning>) {
        let mut config = Self::default();
        let mut warnings: Vec<ConfigWarning> = Vec::new();
        let read = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(url) = read("CROWDLE_API_URL") {
            config.api_url = url;
        }

        config.dictionary = read("CROWDLE_DICTIONARY").map(|v| DictionaryLocation::parse(&v));

        if let Some(dir) = read("CROWDLE_DATA_DIR") {
            config.data_dir = PathBuf::from(dir);
        }

        config.share_url = read("CROWDLE_SHARE_URL");

        if let Some(value) = read("CROWDLE_DATE") {
            match GameDate::parse(&value) {
                Ok(date) => config.date = Some(date),
                Err(e) => warnings.push(e.into()),
            }
        }

        (config, warnings)
    }

    /// The date being played: the override if set, else today (UTC)
    #[must_use]
    pub fn today(&self) -> GameDate {
        self.date.unwrap_or_else(GameDate::today)
    }

    /// Word list location, if any is available
    ///
    /// Without an explicit location, `<data dir>/dictionaries` is used when it
    /// exists. `None` means guesses are not validated.
    #[must_use]
    pub fn dictionary_location(&self) -> Option<DictionaryLocation> {
        if let Some(location) = &self.dictionary {
            return Some(location.clone());
        }

        let local = self.data_dir.join("dictionaries");
        local.is_dir().then_some(DictionaryLocation::Dir(local))
    }

    #[must_use]
    pub fn store_dir(&self) -> PathBuf {
        self.data_dir.join("store")
    }

    #[must_use]
    pub fn log_dir(&self) -> PathBuf {
        self.data_dir.join("logs")
    }

    #[must_use]
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

/// Platform data directory
///
/// - Linux: `~/.local/share/crowdle`
/// - macOS: `~/Library/Application Support/crowdle`
/// - Windows: `%APPDATA%\crowdle`
/// - Fallback: `./crowdle_data`
fn default_data_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", "crowdle")
        .map_or_else(|| PathBuf::from("./crowdle_data"), |dirs| dirs.data_dir().to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> (AppConfig, Vec<ConfigWarning>) {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    fn config_from(vars: &[(&str, &str)]) -> AppConfig {
        let (config, warnings) = lookup(vars);
        assert!(warnings.is_empty(), "unexpected warnings: {warnings:?}");
        config
    }

    #[test]
    fn defaults_without_environment() {
        let config = config_from(&[]);
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert!(config.dictionary.is_none());
        assert!(config.share_url.is_none());
        assert!(config.date.is_none());
    }

    #[test]
    fn environment_overrides() {
        let config = config_from(&[
            ("CROWDLE_API_URL", "http://localhost:8080/run"),
            ("CROWDLE_DICTIONARY", "https://example.org/lists"),
            ("CROWDLE_DATA_DIR", "/tmp/crowdle-test"),
            ("CROWDLE_SHARE_URL", "https://example.org/play/"),
            ("CROWDLE_DATE", "2025-03-03Z"),
        ]);

        assert_eq!(config.api_url, "http://localhost:8080/run");
        assert_eq!(
            config.dictionary,
            Some(DictionaryLocation::Url("https://example.org/lists".to_string()))
        );
        assert_eq!(config.store_dir(), PathBuf::from("/tmp/crowdle-test/store"));
        assert_eq!(config.log_dir(), PathBuf::from("/tmp/crowdle-test/logs"));
        assert_eq!(config.share_url.as_deref(), Some("https://example.org/play/"));
        assert_eq!(config.today(), GameDate::parse("2025-03-03").unwrap());
    }

    #[test]
    fn blank_values_are_ignored() {
        let config = config_from(&[("CROWDLE_API_URL", "  "), ("CROWDLE_DATE", "")]);
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert!(config.date.is_none());
    }

    #[test]
    fn bad_date_is_reported_not_applied() {
        let (config, warnings) = lookup(&[("CROWDLE_DATE", "soon")]);
        assert!(config.date.is_none());
        assert_eq!(warnings.len(), 1);
        assert!(matches!(warnings[0], ConfigWarning::InvalidDate(_)));
        assert!(warnings[0].to_string().starts_with("ignoring CROWDLE_DATE"));
    }

    #[test]
    fn local_dictionaries_used_when_present() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = config_from(&[]);
        config.data_dir = dir.path().to_path_buf();
        assert_eq!(config.dictionary_location(), None);

        std::fs::create_dir(dir.path().join("dictionaries")).unwrap();
        assert_eq!(
            config.dictionary_location(),
            Some(DictionaryLocation::Dir(dir.path().join("dictionaries")))
        );
    }
}
