//! Log partition addressing.

use std::fmt;

use chrono::NaiveDate;

use crate::domain::foundation::{ValidationError, DATE_FORMAT};

/// One `(room, date)` slice of the log.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LogPartition {
    room: String,
    date: NaiveDate,
}

impl LogPartition {
    pub fn new(room: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            room: room.into(),
            date,
        }
    }

    pub fn room(&self) -> &str {
        &self.room
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Storage key, `fishroom:log:{room}:{YYYY-MM-DD}`.
    pub fn key(&self) -> String {
        format!("fishroom:log:{}:{}", self.room, self.date.format(DATE_FORMAT))
    }
}

impl fmt::Display for LogPartition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.room, self.date.format(DATE_FORMAT))
    }
}

/// Date segment of a history URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestedDate {
    Today,
    On(NaiveDate),
}

impl RequestedDate {
    /// Accepts `today` or `YYYY-MM-DD`.
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        if raw == "today" {
            return Ok(RequestedDate::Today);
        }
        NaiveDate::parse_from_str(raw, DATE_FORMAT)
            .map(RequestedDate::On)
            .map_err(|_| ValidationError::invalid_format("date", "expected YYYY-MM-DD or 'today'"))
    }

    pub fn resolve(&self, today: NaiveDate) -> NaiveDate {
        match self {
            RequestedDate::Today => today,
            RequestedDate::On(date) => *date,
        }
    }

    pub fn is_today(&self) -> bool {
        matches!(self, RequestedDate::Today)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_follows_storage_convention() {
        let partition = LogPartition::new("rust", NaiveDate::from_ymd_opt(2024, 3, 5).unwrap());
        assert_eq!(partition.key(), "fishroom:log:rust:2024-03-05");
        assert_eq!(partition.to_string(), "rust@2024-03-05");
    }

    #[test]
    fn parses_today_keyword() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
        let requested = RequestedDate::parse("today").unwrap();
        assert!(requested.is_today());
        assert_eq!(requested.resolve(today), today);
    }

    #[test]
    fn parses_explicit_date() {
        let requested = RequestedDate::parse("2024-02-29").unwrap();
        assert_eq!(
            requested,
            RequestedDate::On(NaiveDate::from_ymd_opt(2024, 2, 29).unwrap())
        );
    }

    #[test]
    fn rejects_bad_dates() {
        assert!(RequestedDate::parse("2023-02-29").is_err());
        assert!(RequestedDate::parse("yesterday").is_err());
        assert!(RequestedDate::parse("").is_err());
    }
}
