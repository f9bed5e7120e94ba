//! Shared startup for the playing commands
//!
//! Fetches the word of the day, opens the store, resumes the session and
//! starts the background word-list load.

use crate::config::AppConfig;
use crate::core::GameDate;
use crate::dictionary::{Dictionary, WordValidator};
use crate::feed::{ThesaurusClient, WordOfTheDay};
use crate::session::Session;
use crate::storage::{FileStore, GameRepository, KeyValueStore};
use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::{Handle, Runtime};
use tokio::sync::mpsc;

/// A resumed session plus the pending word-list delivery, if any
pub struct Startup {
    pub session: Session<FileStore>,
    pub dictionary: Option<DictionaryLoader>,
}

/// Build the runtime used for network and file I/O
///
/// # Errors
/// Returns an error if the runtime cannot be created.
pub fn build_runtime() -> Result<Runtime> {
    tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()
        .context("Failed to start async runtime")
}

/// Open the file-backed repository under the configured data directory
///
/// # Errors
/// Returns an error if the store directory cannot be created.
pub fn open_repository(config: &AppConfig) -> Result<GameRepository<FileStore>> {
    let dir = config.store_dir();
    let store = FileStore::new(&dir)
        .with_context(|| format!("Failed to open game store at {}", dir.display()))?;
    Ok(GameRepository::new(store))
}

/// Fetch the word of the day, optionally behind a spinner
///
/// # Errors
/// Returns an error if the feed cannot be reached or answers badly.
pub fn fetch_word(
    runtime: &Runtime,
    config: &AppConfig,
    date: GameDate,
    spinner: bool,
) -> Result<WordOfTheDay> {
    let client = ThesaurusClient::new(&config.api_url);

    let progress = spinner.then(|| {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.set_message(format!("Fetching the word for {date}..."));
        pb.enable_steady_tick(Duration::from_millis(80));
        pb
    });

    let result = runtime.block_on(client.fetch(date));

    if let Some(pb) = progress {
        pb.finish_and_clear();
    }

    result.with_context(|| {
        format!("Could not load the word for {date}. Check your connection and run again to retry")
    })
}

/// Resume or start the session for the configured date and kick off the
/// word-list load for its length
///
/// # Errors
/// Returns an error if the store cannot be opened, the feed fails, or the
/// feed's answer is not playable.
pub fn start(runtime: &Runtime, config: &AppConfig, spinner: bool) -> Result<Startup> {
    let date = config.today();
    let repository = open_repository(config)?;
    let word = fetch_word(runtime, config, date, spinner)?;
    let session = Session::start(repository, word, date)?;

    let dictionary = if session.is_finished() {
        None
    } else {
        spawn_dictionary_load(runtime, config, session.game().word_length())
    };

    Ok(Startup {
        session,
        dictionary,
    })
}

/// Load the word list for `length` in the background
///
/// Returns `None` when no word list is configured, in which case guesses
/// are never checked against one.
pub fn spawn_dictionary_load(
    runtime: &Runtime,
    config: &AppConfig,
    length: usize,
) -> Option<DictionaryLoader> {
    let Some(location) = config.dictionary_location() else {
        tracing::info!("No word list configured, guesses will not be validated");
        return None;
    };

    let validator = Arc::new(WordValidator::new(location.into_source()));
    Some(DictionaryLoader::spawn(runtime.handle().clone(), validator, length))
}

/// Background delivery of the word list for one length
///
/// Whatever arrives is attached to the session, including the empty list a
/// failed load produces, which rejects every guess. After such a failure
/// [`DictionaryLoader::retry`] starts the load again; the validator does not
/// cache failures, so a later success replaces the empty list.
pub struct DictionaryLoader {
    rx: Option<mpsc::Receiver<Arc<Dictionary>>>,
    reload: Option<Reload>,
    loaded: bool,
}

struct Reload {
    handle: Handle,
    validator: Arc<WordValidator>,
    length: usize,
}

impl Reload {
    fn start(&self) -> mpsc::Receiver<Arc<Dictionary>> {
        let (tx, rx) = mpsc::channel(1);
        let validator = Arc::clone(&self.validator);
        let length = self.length;

        self.handle.spawn(async move {
            let dictionary = validator.load_dictionary(length).await;
            if tx.send(dictionary).await.is_err() {
                tracing::debug!("Word list arrived after the session ended");
            }
        });

        rx
    }
}

impl DictionaryLoader {
    /// Start loading `length` on `handle`
    #[must_use]
    pub fn spawn(handle: Handle, validator: Arc<WordValidator>, length: usize) -> Self {
        let reload = Reload {
            handle,
            validator,
            length,
        };
        let rx = reload.start();

        Self {
            rx: Some(rx),
            reload: Some(reload),
            loaded: false,
        }
    }

    /// Wait on an existing channel; such a loader cannot retry
    #[must_use]
    pub const fn from_channel(rx: mpsc::Receiver<Arc<Dictionary>>) -> Self {
        Self {
            rx: Some(rx),
            reload: None,
            loaded: false,
        }
    }

    /// Hand a delivered word list to the session
    ///
    /// Returns `true` once a non-empty list has been attached.
    pub fn drain<S: KeyValueStore>(&mut self, session: &mut Session<S>) -> bool {
        let Some(rx) = self.rx.as_mut() else {
            return self.loaded;
        };

        match rx.try_recv() {
            Ok(dictionary) => {
                self.rx = None;
                self.loaded = !dictionary.is_empty();
                if !self.loaded {
                    tracing::warn!(
                        length = dictionary.length(),
                        "Word list unavailable, rejecting guesses until it loads"
                    );
                }
                session.attach_dictionary(dictionary);
            }
            Err(mpsc::error::TryRecvError::Empty) => {}
            Err(mpsc::error::TryRecvError::Disconnected) => self.rx = None,
        }

        self.loaded
    }

    /// Load again after a failed or abandoned attempt
    ///
    /// Does nothing while a load is in flight or once a list is attached.
    /// Returns `true` if a new load was started.
    pub fn retry(&mut self) -> bool {
        if self.loaded || self.rx.is_some() {
            return false;
        }
        let Some(reload) = &self.reload else {
            return false;
        };

        tracing::info!(length = reload.length, "Retrying word-list load");
        self.rx = Some(reload.start());
        true
    }

    /// Whether a load is still in flight
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.rx.is_some()
    }

    /// Whether a usable (non-empty) list has been attached
    #[must_use]
    pub const fn is_loaded(&self) -> bool {
        self.loaded
    }
}
