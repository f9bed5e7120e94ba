//! Round and stats persistence over a key-value store
//!
//! Every operation degrades instead of failing: write errors are logged and
//! reported as `false`, read errors and malformed values read as absent.

use super::error::Result;
use super::kv::KeyValueStore;
use crate::core::GameDate;
use crate::game::{LifetimeStats, Round};
use serde::Serialize;
use serde::de::DeserializeOwned;

pub const ROUND_KEY_PREFIX: &str = "crowdle_game_";
pub const STATS_KEY: &str = "crowdle_stats";

/// Storage key for the round played on `date`
#[must_use]
pub fn round_key(date: GameDate) -> String {
    format!("{ROUND_KEY_PREFIX}{}", date.to_xsd())
}

/// Recent results and unplayed dates around `today`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct History {
    /// Stored rounds in the window, most recent first
    pub recent: Vec<Round>,
    /// Past dates in the window with no round, most recent first
    pub missed: Vec<GameDate>,
}

pub struct GameRepository<S> {
    store: S,
}

impl<S: KeyValueStore> GameRepository<S> {
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Upsert the round under its date key
    pub fn save_round(&self, round: &Round) -> bool {
        let key = round_key(round.date);
        match self.write_json(&key, round) {
            Ok(()) => {
                tracing::debug!(
                    "Saved round {} ({} guesses, finished: {})",
                    round.date,
                    round.guesses.len(),
                    round.finished
                );
                true
            }
            Err(e) => {
                tracing::error!("Failed to save round {}: {e}", round.date);
                false
            }
        }
    }

    #[must_use]
    pub fn load_round(&self, date: GameDate) -> Option<Round> {
        let key = round_key(date);
        match self.read_json(&key) {
            Ok(round) => round,
            Err(e) => {
                tracing::warn!("Ignoring unreadable round {date}: {e}");
                None
            }
        }
    }

    /// All stored rounds, most recent first
    #[must_use]
    pub fn list_rounds(&self) -> Vec<Round> {
        let keys = match self.store.keys() {
            Ok(keys) => keys,
            Err(e) => {
                tracing::error!("Failed to list stored rounds: {e}");
                return Vec::new();
            }
        };

        let mut rounds: Vec<Round> = keys
            .iter()
            .filter(|key| key.starts_with(ROUND_KEY_PREFIX))
            .filter_map(|key| match self.read_json::<Round>(key) {
                Ok(round) => round,
                Err(e) => {
                    tracing::warn!("Skipping unreadable entry {key}: {e}");
                    None
                }
            })
            .collect();

        rounds.sort_by(|a, b| b.date.cmp(&a.date));
        rounds
    }

    /// Rounds dated on or after `today - days`
    #[must_use]
    pub fn rounds_in_last_n_days(&self, today: GameDate, days: u64) -> Vec<Round> {
        let cutoff = today.days_before(days);
        self.list_rounds()
            .into_iter()
            .filter(|round| round.date >= cutoff)
            .collect()
    }

    /// No record at all exists for `date`
    #[must_use]
    pub fn is_missed(&self, date: GameDate) -> bool {
        self.load_round(date).is_none()
    }

    /// Unplayed dates among the `days - 1` days before `today`, newest first.
    /// Today itself is still playable and never counts as missed.
    #[must_use]
    pub fn missed_dates(&self, today: GameDate, days: u64) -> Vec<GameDate> {
        (1..days)
            .map(|offset| today.days_before(offset))
            .filter(|date| self.is_missed(*date))
            .collect()
    }

    /// Recent rounds and missed dates over a window of `days` days
    #[must_use]
    pub fn history(&self, today: GameDate, days: u64) -> History {
        History {
            recent: self.rounds_in_last_n_days(today, days),
            missed: self.missed_dates(today, days),
        }
    }

    pub fn save_stats(&self, stats: &LifetimeStats) -> bool {
        match self.write_json(STATS_KEY, stats) {
            Ok(()) => {
                tracing::debug!(
                    "Saved stats: {} played, {} won",
                    stats.games_played,
                    stats.games_won
                );
                true
            }
            Err(e) => {
                tracing::error!("Failed to save stats: {e}");
                false
            }
        }
    }

    /// Stored stats, or zeroed stats when absent or unreadable
    #[must_use]
    pub fn load_stats(&self) -> LifetimeStats {
        match self.read_json(STATS_KEY) {
            Ok(stats) => stats.unwrap_or_default(),
            Err(e) => {
                tracing::warn!("Ignoring unreadable stats: {e}");
                LifetimeStats::default()
            }
        }
    }

    fn read_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        let Some(raw) = self.store.get(key)? else {
            return Ok(None);
        };
        Ok(Some(serde_json::from_str(&raw)?))
    }

    fn write_json<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        let json = serde_json::to_string(value)?;
        self.store.set(key, &json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{FileStore, MemoryStore, StorageError};

    fn date(s: &str) -> GameDate {
        GameDate::parse(s).unwrap()
    }

    fn finished(d: &str, word: &str, won: bool) -> Round {
        let mut round = Round::new(date(d), word);
        round.guesses = vec![word.to_string()];
        round.won = won;
        round.finished = true;
        round
    }

    fn repo() -> GameRepository<MemoryStore> {
        GameRepository::new(MemoryStore::new())
    }

    /// Store where every operation fails
    struct BrokenStore;

    impl KeyValueStore for BrokenStore {
        fn get(&self, _key: &str) -> Result<Option<String>> {
            Err(StorageError::LockPoisoned)
        }

        fn set(&self, _key: &str, _value: &str) -> Result<()> {
            Err(StorageError::Io(std::io::Error::other("disk full")))
        }

        fn keys(&self) -> Result<Vec<String>> {
            Err(StorageError::LockPoisoned)
        }
    }

    #[test]
    fn round_key_format() {
        assert_eq!(round_key(date("2025-03-03")), "crowdle_game_2025-03-03Z");
    }

    #[test]
    fn save_then_load_round() {
        let repo = repo();
        let round = finished("2025-03-03", "appel", true);

        assert!(repo.save_round(&round));
        assert_eq!(repo.load_round(date("2025-03-03")), Some(round));
        assert_eq!(repo.load_round(date("2025-03-04")), None);
    }

    #[test]
    fn finished_at_stored_to_the_millisecond() {
        let repo = repo();
        let mut round = finished("2025-03-03", "appel", true);
        round.finished_at = chrono::DateTime::from_timestamp(1_741_000_000, 123_000_000);

        assert!(repo.save_round(&round));
        assert_eq!(repo.load_round(date("2025-03-03")), Some(round.clone()));

        // Sub-millisecond precision does not survive storage
        round.finished_at = chrono::DateTime::from_timestamp(1_741_000_000, 123_456_789);
        assert!(repo.save_round(&round));
        let loaded = repo.load_round(date("2025-03-03")).unwrap();
        assert_eq!(
            loaded.finished_at,
            chrono::DateTime::from_timestamp(1_741_000_000, 123_000_000)
        );
    }

    #[test]
    fn save_round_is_upsert() {
        let repo = repo();
        let mut round = Round::new(date("2025-03-03"), "appel");
        repo.save_round(&round);

        round.guesses.push("peper".to_string());
        repo.save_round(&round);

        let loaded = repo.load_round(date("2025-03-03")).unwrap();
        assert_eq!(loaded.guesses, vec!["peper"]);
        assert_eq!(repo.list_rounds().len(), 1);
    }

    #[test]
    fn list_rounds_is_date_descending_and_ignores_stats() {
        let repo = repo();
        repo.save_round(&finished("2025-03-01", "kaart", false));
        repo.save_round(&finished("2025-03-03", "appel", true));
        repo.save_round(&finished("2025-03-02", "tafel", true));
        repo.save_stats(&LifetimeStats::default());

        let dates: Vec<String> = repo
            .list_rounds()
            .iter()
            .map(|r| r.date.to_string())
            .collect();
        assert_eq!(dates, vec!["2025-03-03", "2025-03-02", "2025-03-01"]);
    }

    #[test]
    fn malformed_entries_read_as_absent() {
        let repo = repo();
        repo.store()
            .set("crowdle_game_2025-03-03Z", "{not json")
            .unwrap();
        repo.store().set(STATS_KEY, "[]").unwrap();
        repo.save_round(&finished("2025-03-02", "tafel", true));

        assert_eq!(repo.load_round(date("2025-03-03")), None);
        assert_eq!(repo.list_rounds().len(), 1);
        assert_eq!(repo.load_stats(), LifetimeStats::default());
    }

    #[test]
    fn last_n_days_filters_by_calendar_date() {
        let repo = repo();
        repo.save_round(&finished("2025-02-24", "oud", false));
        repo.save_round(&finished("2025-02-25", "rand", true));
        repo.save_round(&finished("2025-03-03", "appel", true));

        let recent = repo.rounds_in_last_n_days(date("2025-03-04"), 7);
        let dates: Vec<String> = recent.iter().map(|r| r.date.to_string()).collect();
        assert_eq!(dates, vec!["2025-03-03", "2025-02-25"]);
    }

    #[test]
    fn missed_means_no_record() {
        let repo = repo();
        let mut unfinished = Round::new(date("2025-03-02"), "tafel");
        unfinished.guesses.push("appel".to_string());
        repo.save_round(&unfinished);
        repo.save_round(&finished("2025-03-03", "appel", false));

        assert!(!repo.is_missed(date("2025-03-02")));
        assert!(!repo.is_missed(date("2025-03-03")));
        assert!(repo.is_missed(date("2025-03-01")));
    }

    #[test]
    fn missed_dates_skip_today() {
        let repo = repo();
        repo.save_round(&finished("2025-03-02", "tafel", true));

        let missed = repo.missed_dates(date("2025-03-04"), 4);
        assert_eq!(missed, vec![date("2025-03-03"), date("2025-03-01")]);
        assert!(!missed.contains(&date("2025-03-04")));
    }

    #[test]
    fn history_combines_recent_and_missed() {
        let repo = repo();
        repo.save_round(&finished("2025-03-03", "appel", true));
        repo.save_round(&finished("2025-03-01", "tafel", false));

        let history = repo.history(date("2025-03-04"), 3);
        assert_eq!(history.recent.len(), 2);
        assert_eq!(history.missed, vec![date("2025-03-02")]);
    }

    #[test]
    fn stats_default_then_round_trip() {
        let repo = repo();
        assert_eq!(repo.load_stats(), LifetimeStats::default());

        let stats = LifetimeStats {
            games_played: 5,
            games_won: 3,
        };
        assert!(repo.save_stats(&stats));
        assert_eq!(repo.load_stats(), stats);
    }

    #[test]
    fn broken_store_degrades_to_defaults() {
        let repo = GameRepository::new(BrokenStore);
        let round = finished("2025-03-03", "appel", true);

        assert!(!repo.save_round(&round));
        assert!(!repo.save_stats(&LifetimeStats::default()));
        assert_eq!(repo.load_round(date("2025-03-03")), None);
        assert!(repo.list_rounds().is_empty());
        assert_eq!(repo.load_stats(), LifetimeStats::default());
    }

    #[test]
    fn file_store_persists_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let round = finished("2025-03-03", "appel", true);

        {
            let repo = GameRepository::new(FileStore::new(dir.path()).unwrap());
            repo.save_round(&round);
            repo.save_stats(&LifetimeStats {
                games_played: 1,
                games_won: 1,
            });
        }

        let repo = GameRepository::new(FileStore::new(dir.path()).unwrap());
        assert_eq!(repo.load_round(date("2025-03-03")), Some(round));
        assert_eq!(repo.load_stats().games_won, 1);
    }
}
