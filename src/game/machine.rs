//! Round progression: guess acceptance, bonus attempt, win/loss
//!
//! The game is an explicit state object. Every submission is one transition
//! that either rejects the candidate without touching any state, or scores it
//! and reports where the round went next. Nothing here performs I/O; the
//! session layer applies persistence and stats when a round finishes.

use super::input::InputBuffer;
use super::record::Round;
use crate::core::{
    GameDate, LetterStates, Verdict, Word, WordError, apply_ligatures, glyph_count, score_all,
};
use crate::dictionary::Dictionary;
use chrono::{DateTime, SubsecRound, Utc};
use std::sync::Arc;
use thiserror::Error;

/// Attempts available before the bonus is granted
pub const INITIAL_ATTEMPTS: usize = 6;

/// Attempts available including the single bonus attempt
pub const MAX_ATTEMPTS: usize = INITIAL_ATTEMPTS + 1;

/// Where the round is between submissions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    AwaitingInput,
    Finished { won: bool },
}

/// Why a candidate was not accepted as an attempt
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("the round is already finished")]
    AlreadyFinished,

    #[error("word must be {expected} letters long")]
    WrongLength { expected: usize, actual: usize },

    #[error("'{0}' contains characters that are not letters")]
    InvalidCharacters(String),

    #[error("'{0}' is not in the word list")]
    UnknownWord(String),
}

/// Result of one submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Nothing changed; the candidate did not count as an attempt
    Rejected(Rejection),
    /// Accepted, round continues
    Scored { verdicts: Vec<Verdict> },
    /// Accepted, sixth miss: one extra attempt granted
    BonusUnlocked {
        verdicts: Vec<Verdict>,
        hint: Option<String>,
    },
    /// Accepted, round over
    Finished { verdicts: Vec<Verdict>, won: bool },
}

impl SubmitOutcome {
    #[must_use]
    pub fn verdicts(&self) -> Option<&[Verdict]> {
        match self {
            Self::Rejected(_) => None,
            Self::Scored { verdicts }
            | Self::BonusUnlocked { verdicts, .. }
            | Self::Finished { verdicts, .. } => Some(verdicts),
        }
    }

    #[must_use]
    pub const fn is_finished(&self) -> bool {
        matches!(self, Self::Finished { .. })
    }
}

/// A stored round that cannot be turned back into a game
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RestoreError {
    #[error("stored word is invalid: {0}")]
    Word(#[from] WordError),

    #[error("stored guess '{guess}' does not have {expected} letters")]
    GuessLength { guess: String, expected: usize },
}

/// In-memory working copy of one round
#[derive(Debug, Clone)]
pub struct Game {
    date: GameDate,
    target: Word,
    hint: Option<String>,
    guesses: Vec<Word>,
    letter_states: LetterStates,
    input: InputBuffer,
    dictionary: Option<Arc<Dictionary>>,
    allowed_attempts: usize,
    bonus_granted: bool,
    won: bool,
    finished: bool,
    finished_at: Option<DateTime<Utc>>,
}

impl Game {
    /// Start a fresh round with zero guesses
    #[must_use]
    pub fn new(date: GameDate, target: Word, hint: Option<String>) -> Self {
        Self {
            date,
            target,
            hint,
            guesses: Vec::new(),
            letter_states: LetterStates::new(),
            input: InputBuffer::new(),
            dictionary: None,
            allowed_attempts: INITIAL_ATTEMPTS,
            bonus_granted: false,
            won: false,
            finished: false,
            finished_at: None,
        }
    }

    /// Rebuild a game from a stored round
    ///
    /// Guesses are re-scored to rebuild the keyboard state. Outcome flags are
    /// copied as stored; restoring never counts as a transition.
    ///
    /// # Errors
    /// Returns `RestoreError` if the stored word or a stored guess is invalid.
    pub fn restore(round: &Round, hint: Option<String>) -> Result<Self, RestoreError> {
        let target = Word::new(&round.word)?;
        let mut game = Self::new(round.date, target, hint);

        for raw in &round.guesses {
            let guess = Word::new(raw)?;
            if guess.len() != game.target.len() {
                return Err(RestoreError::GuessLength {
                    guess: raw.clone(),
                    expected: game.target.len(),
                });
            }
            let verdicts = score_all(&game.target, &guess);
            game.letter_states.merge_guess(&guess, &verdicts);
            game.guesses.push(guess);
        }

        game.bonus_granted = round.bonus_granted || game.guesses.len() >= INITIAL_ATTEMPTS;
        if game.bonus_granted {
            game.allowed_attempts = MAX_ATTEMPTS;
        }
        game.won = round.won;
        game.finished = round.finished;
        game.finished_at = round.finished_at;

        Ok(game)
    }

    /// Snapshot as a persistable record
    #[must_use]
    pub fn to_round(&self) -> Round {
        Round {
            date: self.date,
            word: self.target.text().to_string(),
            guesses: self.guesses.iter().map(|g| g.text().to_string()).collect(),
            won: self.won,
            finished: self.finished,
            bonus_granted: self.bonus_granted,
            finished_at: self.finished_at,
        }
    }

    /// Use `dictionary` for guess validation
    ///
    /// A dictionary loaded for a different word length is ignored, so a late
    /// delivery from an earlier request can never reject valid guesses.
    pub fn attach_dictionary(&mut self, dictionary: Arc<Dictionary>) -> bool {
        if dictionary.length() != self.target.len() {
            tracing::warn!(
                expected = self.target.len(),
                got = dictionary.length(),
                "Ignoring word list for another word length"
            );
            return false;
        }
        self.dictionary = Some(dictionary);
        true
    }

    /// Type one letter into the input buffer
    pub fn type_char(&mut self, c: char) -> bool {
        if self.finished {
            return false;
        }
        self.input.push(c, self.target.len())
    }

    pub fn backspace(&mut self) -> Option<char> {
        if self.finished {
            return None;
        }
        self.input.backspace()
    }

    /// Submit whatever is in the input buffer
    pub fn submit(&mut self) -> SubmitOutcome {
        let candidate = self.input.as_str().to_string();
        self.submit_guess(&candidate)
    }

    /// Submit `candidate` as the next attempt
    pub fn submit_guess(&mut self, candidate: &str) -> SubmitOutcome {
        if self.finished {
            return SubmitOutcome::Rejected(Rejection::AlreadyFinished);
        }

        let normalized = apply_ligatures(candidate.trim());
        let actual = glyph_count(&normalized);
        if actual != self.target.len() {
            return SubmitOutcome::Rejected(Rejection::WrongLength {
                expected: self.target.len(),
                actual,
            });
        }

        let Ok(guess) = Word::new(&normalized) else {
            return SubmitOutcome::Rejected(Rejection::InvalidCharacters(normalized));
        };

        // Still loading: accept without checking
        if let Some(dictionary) = &self.dictionary
            && !dictionary.contains(&guess)
        {
            return SubmitOutcome::Rejected(Rejection::UnknownWord(guess.text().to_string()));
        }

        let verdicts = score_all(&self.target, &guess);
        self.letter_states.merge_guess(&guess, &verdicts);
        let won = guess == self.target;
        self.guesses.push(guess);
        self.input.clear();

        if won {
            self.finish(true);
            return SubmitOutcome::Finished { verdicts, won };
        }

        if self.guesses.len() >= MAX_ATTEMPTS {
            self.finish(false);
            return SubmitOutcome::Finished { verdicts, won };
        }

        if self.guesses.len() >= INITIAL_ATTEMPTS && !self.bonus_granted {
            self.bonus_granted = true;
            self.allowed_attempts = MAX_ATTEMPTS;
            return SubmitOutcome::BonusUnlocked {
                verdicts,
                hint: self.hint.clone(),
            };
        }

        SubmitOutcome::Scored { verdicts }
    }

    /// Record when the round finished; only the first stamp sticks
    ///
    /// Kept at millisecond precision, the precision rounds are stored with.
    pub fn stamp_finished_at(&mut self, at: DateTime<Utc>) {
        if self.finished && self.finished_at.is_none() {
            self.finished_at = Some(at.trunc_subsecs(3));
        }
    }

    fn finish(&mut self, won: bool) {
        self.won = won;
        self.finished = true;
    }

    #[must_use]
    pub const fn phase(&self) -> Phase {
        if self.finished {
            Phase::Finished { won: self.won }
        } else {
            Phase::AwaitingInput
        }
    }

    #[must_use]
    pub const fn date(&self) -> GameDate {
        self.date
    }

    #[must_use]
    pub const fn target(&self) -> &Word {
        &self.target
    }

    #[must_use]
    pub fn word_length(&self) -> usize {
        self.target.len()
    }

    #[must_use]
    pub fn hint(&self) -> Option<&str> {
        self.hint.as_deref()
    }

    #[must_use]
    pub fn guesses(&self) -> &[Word] {
        &self.guesses
    }

    /// Accepted guesses paired with their verdicts
    pub fn scored_guesses(&self) -> impl Iterator<Item = (&Word, Vec<Verdict>)> {
        self.guesses
            .iter()
            .map(|guess| (guess, score_all(&self.target, guess)))
    }

    #[must_use]
    pub const fn letter_states(&self) -> &LetterStates {
        &self.letter_states
    }

    #[must_use]
    pub const fn input(&self) -> &InputBuffer {
        &self.input
    }

    #[must_use]
    pub const fn allowed_attempts(&self) -> usize {
        self.allowed_attempts
    }

    #[must_use]
    pub const fn bonus_granted(&self) -> bool {
        self.bonus_granted
    }

    #[must_use]
    pub const fn is_won(&self) -> bool {
        self.won
    }

    #[must_use]
    pub const fn is_finished(&self) -> bool {
        self.finished
    }

    #[must_use]
    pub const fn finished_at(&self) -> Option<DateTime<Utc>> {
        self.finished_at
    }

    /// Whether guesses are being checked against a word list yet
    #[must_use]
    pub const fn has_dictionary(&self) -> bool {
        self.dictionary.is_some()
    }
}
