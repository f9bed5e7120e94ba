//! Calendar date a round belongs to
//!
//! Dates are parsed from `YYYY-MM-DD` with an optional trailing `Z` and are
//! rendered back in the `YYYY-MM-DDZ` form used by storage keys and the feed.

use chrono::{Days, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A calendar date with no time-of-day component
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct GameDate(NaiveDate);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid date '{0}': expected YYYY-MM-DD")]
pub struct DateError(String);

impl GameDate {
    /// Today's date in UTC
    #[must_use]
    pub fn today() -> Self {
        Self(Utc::now().date_naive())
    }

    #[must_use]
    pub const fn from_naive(date: NaiveDate) -> Self {
        Self(date)
    }

    #[must_use]
    pub const fn naive(self) -> NaiveDate {
        self.0
    }

    /// Parse `YYYY-MM-DD` or `YYYY-MM-DDZ`
    ///
    /// # Errors
    /// Returns `DateError` if the input is not a valid calendar date.
    pub fn parse(input: &str) -> Result<Self, DateError> {
        let trimmed = input.trim();
        let trimmed = trimmed.strip_suffix('Z').unwrap_or(trimmed);
        NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
            .map(Self)
            .map_err(|_| DateError(input.to_string()))
    }

    /// `YYYY-MM-DDZ`, as sent to the feed and used in storage keys
    #[must_use]
    pub fn to_xsd(self) -> String {
        format!("{}Z", self.0.format("%Y-%m-%d"))
    }

    /// The date `days` calendar days earlier
    #[must_use]
    pub fn days_before(self, days: u64) -> Self {
        Self(self.0.checked_sub_days(Days::new(days)).unwrap_or(NaiveDate::MIN))
    }

    /// Short human label, e.g. "Mon 3 Mar"
    #[must_use]
    pub fn short_label(self) -> String {
        self.0.format("%a %-d %b").to_string()
    }
}

impl fmt::Display for GameDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl FromStr for GameDate {
    type Err = DateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for GameDate {
    type Error = DateError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<GameDate> for String {
    fn from(date: GameDate) -> Self {
        date.to_xsd()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> GameDate {
        GameDate::parse(s).unwrap()
    }

    #[test]
    fn parse_with_and_without_suffix() {
        assert_eq!(date("2025-03-03"), date("2025-03-03Z"));
        assert_eq!(date(" 2025-03-03Z "), date("2025-03-03"));
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!(GameDate::parse("03-03-2025").is_err());
        assert!(GameDate::parse("2025-02-30").is_err());
        assert!(GameDate::parse("").is_err());
    }

    #[test]
    fn xsd_and_display_forms() {
        let d = date("2025-03-03");
        assert_eq!(d.to_xsd(), "2025-03-03Z");
        assert_eq!(d.to_string(), "2025-03-03");
        assert_eq!(d.short_label(), "Mon 3 Mar");
    }

    #[test]
    fn days_before_crosses_month_boundary() {
        assert_eq!(date("2025-03-01").days_before(1), date("2025-02-28"));
        assert_eq!(date("2025-03-01").days_before(0), date("2025-03-01"));
    }

    #[test]
    fn ordering_is_calendar_order() {
        assert!(date("2024-12-31") < date("2025-01-01"));
    }

    #[test]
    fn serde_uses_xsd_string() {
        let json = serde_json::to_string(&date("2025-03-03")).unwrap();
        assert_eq!(json, "\"2025-03-03Z\"");

        let back: GameDate = serde_json::from_str("\"2025-03-03\"").unwrap();
        assert_eq!(back, date("2025-03-03"));

        assert!(serde_json::from_str::<GameDate>("\"not a date\"").is_err());
    }
}
