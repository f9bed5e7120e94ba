//! Keystroke buffer for the guess being typed

use crate::core::{apply_ligatures, glyph_count};

/// The partially typed guess
///
/// The buffer is kept normalized: after every keystroke the ligature rule is
/// re-applied, so typing `i` then `j` occupies a single glyph slot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputBuffer {
    text: String,
}

impl InputBuffer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a letter if the result still fits in `max_glyphs`
    ///
    /// Returns whether the keystroke was accepted. Non-letters are ignored.
    pub fn push(&mut self, c: char, max_glyphs: usize) -> bool {
        if !c.is_alphabetic() {
            return false;
        }

        let mut candidate = self.text.clone();
        candidate.push(c);
        let candidate = apply_ligatures(&candidate);

        if glyph_count(&candidate) > max_glyphs {
            return false;
        }

        self.text = candidate;
        true
    }

    /// Remove the last glyph (a whole ligature counts as one)
    pub fn backspace(&mut self) -> Option<char> {
        self.text.pop()
    }

    pub fn clear(&mut self) {
        self.text.clear();
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Number of glyph slots filled
    #[must_use]
    pub fn glyphs(&self) -> usize {
        glyph_count(&self.text)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}
