//! Persistable records: one round per date, plus lifetime counters

use crate::core::GameDate;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One calendar date's game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Round {
    pub date: GameDate,
    /// Normalized target word
    pub word: String,
    /// Accepted guesses, in submission order
    pub guesses: Vec<String>,
    pub won: bool,
    pub finished: bool,
    #[serde(default)]
    pub bonus_granted: bool,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "chrono::serde::ts_milliseconds_option"
    )]
    pub finished_at: Option<DateTime<Utc>>,
}

impl Round {
    /// A fresh, unplayed round
    #[must_use]
    pub fn new(date: GameDate, word: impl Into<String>) -> Self {
        Self {
            date,
            word: word.into(),
            guesses: Vec::new(),
            won: false,
            finished: false,
            bonus_granted: false,
            finished_at: None,
        }
    }
}

/// Games played and won across all rounds
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LifetimeStats {
    pub games_played: u32,
    pub games_won: u32,
}

impl LifetimeStats {
    /// Count one finished round
    pub fn record(&mut self, won: bool) {
        self.games_played += 1;
        if won {
            self.games_won += 1;
        }
    }

    /// Rounded win percentage, 0 before the first game
    #[must_use]
    pub fn win_rate(&self) -> u32 {
        if self.games_played == 0 {
            return 0;
        }
        (f64::from(self.games_won) / f64::from(self.games_played) * 100.0).round() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn date(s: &str) -> GameDate {
        GameDate::parse(s).unwrap()
    }

    #[test]
    fn round_json_shape() {
        let mut round = Round::new(date("2025-03-03"), "appel");
        round.guesses = vec!["peper".to_string(), "appel".to_string()];
        round.won = true;
        round.finished = true;
        round.finished_at = Some(Utc.timestamp_millis_opt(1_741_000_000_000).unwrap());

        let json: serde_json::Value = serde_json::to_value(&round).unwrap();
        assert_eq!(json["date"], "2025-03-03Z");
        assert_eq!(json["guesses"][1], "appel");
        assert_eq!(json["bonusGranted"], false);
        assert_eq!(json["finishedAt"], 1_741_000_000_000_i64);
    }

    #[test]
    fn round_without_optional_fields_deserializes() {
        let json = r#"{"date":"2025-03-03Z","word":"appel","guesses":["peper"],"won":false,"finished":false}"#;
        let round: Round = serde_json::from_str(json).unwrap();
        assert_eq!(round.date, date("2025-03-03"));
        assert!(!round.bonus_granted);
        assert_eq!(round.finished_at, None);
    }

    #[test]
    fn unfinished_round_omits_timestamp() {
        let round = Round::new(date("2025-03-03"), "appel");
        let json = serde_json::to_string(&round).unwrap();
        assert!(!json.contains("finishedAt"));
    }

    #[test]
    fn stats_record_and_rate() {
        let mut stats = LifetimeStats::default();
        assert_eq!(stats.win_rate(), 0);

        stats.record(true);
        stats.record(false);
        stats.record(true);
        assert_eq!(stats.games_played, 3);
        assert_eq!(stats.games_won, 2);
        assert_eq!(stats.win_rate(), 67);
    }

    #[test]
    fn stats_json_is_camel_case() {
        let stats = LifetimeStats {
            games_played: 4,
            games_won: 1,
        };
        let json = serde_json::to_string(&stats).unwrap();
        assert_eq!(json, r#"{"gamesPlayed":4,"gamesWon":1}"#);
    }
}
