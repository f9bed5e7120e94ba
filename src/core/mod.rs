//! Core domain types for the puzzle
//!
//! Pure, side-effect free building blocks: normalized words, the letter
//! scorer, the aggregate keyboard state and calendar dates.

mod date;
mod letters;
mod verdict;
mod word;

pub use date::{DateError, GameDate};
pub use letters::LetterStates;
pub use verdict::{Verdict, score, score_all, verdicts_to_emoji};
pub use word::{IJ_LIGATURE, Word, WordError, apply_ligatures, glyph_count};
