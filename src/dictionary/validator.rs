//! Length-indexed dictionary of acceptable guesses
//!
//! Each word length is fetched at most once per validator and then served
//! from the cache. A failed fetch yields an empty dictionary for that call
//! only, so the next request tries the source again.

use super::WordListSource;
use crate::core::{Word, apply_ligatures};
use rustc_hash::{FxHashMap, FxHashSet};
use std::sync::{Arc, Mutex, PoisonError};

/// Set of acceptable guesses for one word length
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dictionary {
    length: usize,
    words: FxHashSet<String>,
}

impl Dictionary {
    /// A dictionary that accepts nothing
    #[must_use]
    pub fn empty(length: usize) -> Self {
        Self {
            length,
            words: FxHashSet::default(),
        }
    }

    /// Parse a raw newline-separated list
    ///
    /// Lines are trimmed, blank lines dropped and every entry normalized with
    /// the same ligature rule as guesses.
    #[must_use]
    pub fn parse(length: usize, raw: &str) -> Self {
        let words = raw
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(apply_ligatures)
            .collect();

        Self { length, words }
    }

    /// Word length (in glyphs) this dictionary was requested for
    #[inline]
    #[must_use]
    pub const fn length(&self) -> usize {
        self.length
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    #[must_use]
    pub fn contains(&self, word: &Word) -> bool {
        self.words.contains(word.text())
    }
}

/// Lazily loading, caching word validator
pub struct WordValidator {
    source: Arc<dyn WordListSource>,
    cache: Mutex<FxHashMap<usize, Arc<Dictionary>>>,
}

impl WordValidator {
    #[must_use]
    pub fn new(source: Arc<dyn WordListSource>) -> Self {
        Self {
            source,
            cache: Mutex::new(FxHashMap::default()),
        }
    }

    /// Get the dictionary for `length`, fetching it on first use
    ///
    /// Never fails: a source error is logged and an empty dictionary is
    /// returned, which rejects every guess of that length.
    pub async fn load_dictionary(&self, length: usize) -> Arc<Dictionary> {
        if let Some(cached) = self.cached(length) {
            return cached;
        }

        match self.source.fetch(length).await {
            Ok(raw) => {
                let dictionary = Arc::new(Dictionary::parse(length, &raw));
                tracing::info!(
                    length,
                    words = dictionary.len(),
                    "Loaded word list"
                );
                self.cache
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .insert(length, Arc::clone(&dictionary));
                dictionary
            }
            Err(err) => {
                tracing::error!(length, error = %err, "Failed to load word list");
                Arc::new(Dictionary::empty(length))
            }
        }
    }

    /// Is `word` an acceptable guess of `length` glyphs?
    pub async fn is_valid(&self, word: &str, length: usize) -> bool {
        let dictionary = self.load_dictionary(length).await;
        Word::new(word).is_ok_and(|word| dictionary.contains(&word))
    }

    fn cached(&self, length: usize) -> Option<Arc<Dictionary>> {
        self.cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&length)
            .cloned()
    }
}
