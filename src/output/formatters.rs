//! Formatting utilities for terminal output

use crate::core::{Verdict, Word};
use colored::{ColoredString, Colorize};

/// On-screen keyboard layout. The `ĳ` ligature gets its own key.
pub const KEYBOARD_ROWS: [&str; 3] = ["qwertyuiop", "asdfghjkl", "zxcvbnmĳ"];

/// Uppercase form of a single glyph (`ĳ` → `Ĳ`)
#[must_use]
pub fn display_letter(c: char) -> String {
    c.to_uppercase().collect()
}

/// Uppercase form of a word
#[must_use]
pub fn display_word(word: &str) -> String {
    word.chars().map(display_letter).collect()
}

/// A letter tile coloured by verdict; unknown letters stay plain
#[must_use]
pub fn letter_tile(c: char, verdict: Option<Verdict>) -> ColoredString {
    let tile = format!(" {} ", display_letter(c));
    match verdict {
        Some(Verdict::Correct) => tile.black().on_green().bold(),
        Some(Verdict::Present) => tile.black().on_yellow().bold(),
        Some(Verdict::Absent) => tile.white().on_bright_black(),
        None => tile.bold(),
    }
}

/// One scored guess as a row of tiles
#[must_use]
pub fn colored_guess(guess: &Word, verdicts: &[Verdict]) -> String {
    guess
        .chars()
        .iter()
        .zip(verdicts)
        .map(|(c, v)| letter_tile(*c, Some(*v)).to_string())
        .collect()
}

/// `n guess` / `n guesses`
#[must_use]
pub fn guess_count_label(count: usize) -> String {
    if count == 1 {
        "1 guess".to_string()
    } else {
        format!("{count} guesses")
    }
}

/// Create a progress bar string
#[must_use]
pub fn create_progress_bar(value: f64, max: f64, width: usize) -> String {
    if max <= 0.0 {
        return "░".repeat(width);
    }

    // Cast is safe: values are clamped to [0, width]
    let filled = ((value / max) * width as f64).max(0.0) as usize;
    let filled = filled.min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}
