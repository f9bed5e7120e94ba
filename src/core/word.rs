//! Puzzle word representation
//!
//! A Word stores a normalized target or guess: lower-cased, with the `ij`
//! digraph collapsed into the single `ĳ` glyph. Length is always counted in
//! glyphs (chars after normalization), never in bytes or keystrokes.

use std::fmt;
use thiserror::Error;

/// Display glyph that the `ij` digraph collapses into.
pub const IJ_LIGATURE: char = 'ĳ';

/// Lower-case `input` and collapse every `ij` into [`IJ_LIGATURE`].
///
/// This is the only place the ligature rule lives. Every length check on a
/// guess, the input buffer or a dictionary entry goes through it first.
///
/// # Examples
/// ```
/// use crowdle::core::apply_ligatures;
///
/// assert_eq!(apply_ligatures("IJsBeer"), "ĳsbeer");
/// assert_eq!(apply_ligatures("Ĳzer"), "ĳzer");
/// ```
#[must_use]
pub fn apply_ligatures(input: &str) -> String {
    input.to_lowercase().replace("ij", "ĳ")
}

/// Number of display glyphs in an already normalized string.
#[inline]
#[must_use]
pub fn glyph_count(normalized: &str) -> usize {
    normalized.chars().count()
}

/// A normalized puzzle word
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Word {
    text: String,
    chars: Vec<char>,
}

/// Error type for invalid words
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WordError {
    #[error("word is empty")]
    Empty,
    #[error("word contains non-letter character '{0}'")]
    InvalidCharacter(char),
}

impl Word {
    /// Create a new Word from a string
    ///
    /// Surrounding whitespace is trimmed, the text is lower-cased and the
    /// ligature rule is applied.
    ///
    /// # Errors
    /// Returns `WordError` if:
    /// - The text is empty after trimming
    /// - It contains anything other than alphabetic characters
    ///
    /// # Examples
    /// ```
    /// use crowdle::core::Word;
    ///
    /// let word = Word::new("Appel").unwrap();
    /// assert_eq!(word.text(), "appel");
    ///
    /// let word = Word::new("ijzer").unwrap();
    /// assert_eq!(word.len(), 4);
    ///
    /// assert!(Word::new("sh0rt").is_err());
    /// ```
    pub fn new(text: impl AsRef<str>) -> Result<Self, WordError> {
        let text = apply_ligatures(text.as_ref().trim());

        if text.is_empty() {
            return Err(WordError::Empty);
        }

        if let Some(bad) = text.chars().find(|c| !c.is_alphabetic()) {
            return Err(WordError::InvalidCharacter(bad));
        }

        let chars = text.chars().collect();
        Ok(Self { text, chars })
    }

    /// Get the word as a string slice
    #[inline]
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Get the word as glyphs
    #[inline]
    #[must_use]
    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    /// Number of glyphs
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    /// Always false for a constructed word; present for API symmetry.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Get the glyph at a specific position
    ///
    /// # Panics
    /// Panics if `position >= len()`
    #[inline]
    #[must_use]
    pub fn char_at(&self, position: usize) -> char {
        self.chars[position]
    }

    /// How many times `letter` occurs in the word
    #[must_use]
    pub fn count_of(&self, letter: char) -> usize {
        self.chars.iter().filter(|&&c| c == letter).count()
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}
