//! A playing session for one date
//!
//! The session owns the game, the repository and the lifetime stats. It
//! restores a saved round on start, upserts the round after every accepted
//! guess, and applies the finish side effects (timestamp, stats) exactly
//! once per round, including across reloads.

use crate::core::{GameDate, Word, WordError};
use crate::dictionary::Dictionary;
use crate::feed::WordOfTheDay;
use crate::game::{Game, LifetimeStats, Round, SubmitOutcome};
use crate::storage::{GameRepository, KeyValueStore};
use chrono::Utc;
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("the word of the day '{answer}' is not playable: {source}")]
    InvalidAnswer {
        answer: String,
        #[source]
        source: WordError,
    },
}

/// What happened when the round finished
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FinishReport {
    pub guesses: usize,
    pub won: bool,
    /// Stats after counting this round
    pub stats: LifetimeStats,
}

/// Result of submitting one candidate through the session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub outcome: SubmitOutcome,
    /// Present only on the transition into finished
    pub finished: Option<FinishReport>,
    /// Set when the round or stats could not be persisted
    pub save_failed: bool,
}

pub struct Session<S> {
    repository: GameRepository<S>,
    word: WordOfTheDay,
    game: Game,
    stats: LifetimeStats,
    finish_recorded: bool,
}

impl<S: KeyValueStore> Session<S> {
    /// Start or resume the round for `date`
    ///
    /// # Errors
    /// Returns `SessionError::InvalidAnswer` if the feed's answer has no
    /// playable letters.
    pub fn start(
        repository: GameRepository<S>,
        word: WordOfTheDay,
        date: GameDate,
    ) -> Result<Self, SessionError> {
        let target = Word::new(&word.answer).map_err(|source| SessionError::InvalidAnswer {
            answer: word.answer.clone(),
            source,
        })?;

        if let Some(advertised) = word.advertised_length()
            && advertised != target.len()
        {
            tracing::warn!(
                advertised,
                actual = target.len(),
                "Feed length disagrees with the answer, using the answer"
            );
        }

        let hint = word.hint().map(str::to_string);
        let stats = repository.load_stats();
        let game = repository
            .load_round(date)
            .and_then(|round| resume(&round, &target, hint.clone()))
            .unwrap_or_else(|| Game::new(date, target, hint));

        // A round stored as finished already had its side effects applied
        let finish_recorded = game.is_finished();

        tracing::info!(
            %date,
            length = game.word_length(),
            guesses = game.guesses().len(),
            finished = finish_recorded,
            "Session started"
        );

        Ok(Self {
            repository,
            word,
            game,
            stats,
            finish_recorded,
        })
    }

    /// Type one letter into the current row
    pub fn type_char(&mut self, c: char) -> bool {
        self.game.type_char(c)
    }

    pub fn backspace(&mut self) -> Option<char> {
        self.game.backspace()
    }

    /// Hand a loaded dictionary to the game
    pub fn attach_dictionary(&mut self, dictionary: Arc<Dictionary>) -> bool {
        self.game.attach_dictionary(dictionary)
    }

    /// Submit the current row
    pub fn submit(&mut self) -> Submission {
        let outcome = self.game.submit();
        self.apply(outcome)
    }

    /// Submit `candidate` directly, bypassing the input buffer
    pub fn submit_guess(&mut self, candidate: &str) -> Submission {
        let outcome = self.game.submit_guess(candidate);
        self.apply(outcome)
    }

    fn apply(&mut self, outcome: SubmitOutcome) -> Submission {
        if let SubmitOutcome::Rejected(reason) = &outcome {
            tracing::debug!("Guess rejected: {reason}");
            return Submission {
                outcome,
                finished: None,
                save_failed: false,
            };
        }

        if !self.game.is_finished() || self.finish_recorded {
            let saved = self.repository.save_round(&self.game.to_round());
            return Submission {
                outcome,
                finished: None,
                save_failed: !saved,
            };
        }

        self.finish_recorded = true;
        self.game.stamp_finished_at(Utc::now());
        let round_saved = self.repository.save_round(&self.game.to_round());

        let won = self.game.is_won();
        self.stats.record(won);
        let stats_saved = self.repository.save_stats(&self.stats);

        tracing::info!(
            date = %self.game.date(),
            won,
            guesses = self.game.guesses().len(),
            "Round finished"
        );

        Submission {
            outcome,
            finished: Some(FinishReport {
                guesses: self.game.guesses().len(),
                won,
                stats: self.stats,
            }),
            save_failed: !(round_saved && stats_saved),
        }
    }

    #[must_use]
    pub const fn game(&self) -> &Game {
        &self.game
    }

    #[must_use]
    pub const fn word(&self) -> &WordOfTheDay {
        &self.word
    }

    #[must_use]
    pub const fn stats(&self) -> LifetimeStats {
        self.stats
    }

    #[must_use]
    pub const fn date(&self) -> GameDate {
        self.game.date()
    }

    #[must_use]
    pub const fn is_finished(&self) -> bool {
        self.game.is_finished()
    }

    #[must_use]
    pub const fn repository(&self) -> &GameRepository<S> {
        &self.repository
    }

    #[must_use]
    pub fn into_repository(self) -> GameRepository<S> {
        self.repository
    }
}

/// Turn a stored round back into a game, or `None` to start fresh
fn resume(round: &Round, target: &Word, hint: Option<String>) -> Option<Game> {
    if !round.finished && round.word != target.text() {
        tracing::warn!(
            date = %round.date,
            "Discarding in-progress round saved for another word"
        );
        return None;
    }

    match Game::restore(round, hint) {
        Ok(game) => Some(game),
        Err(e) => {
            tracing::warn!(date = %round.date, "Discarding unusable saved round: {e}");
            None
        }
    }
}
