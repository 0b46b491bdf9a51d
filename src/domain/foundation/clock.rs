//! Local wall clock in the chat's fixed time zone.
//!
//! Log partitions are calendar days in one configured zone, so every
//! component that stamps or compares dates goes through a [`Clock`].

use chrono::{DateTime, FixedOffset, NaiveDate, Utc};

/// Date format used for partitions and message stamps.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Time-of-day format used for message stamps.
pub const TIME_FORMAT: &str = "%H:%M:%S";

/// Source of the current local time.
pub trait Clock: Send + Sync {
    /// Current instant in the chat's time zone.
    fn now(&self) -> DateTime<FixedOffset>;

    /// Current local calendar date.
    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }

    /// `(date, time)` strings for stamping a new message.
    fn stamp(&self) -> (String, String) {
        let now = self.now();
        (
            now.format(DATE_FORMAT).to_string(),
            now.format(TIME_FORMAT).to_string(),
        )
    }
}

/// Wall clock pinned to a fixed UTC offset.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    offset: FixedOffset,
}

impl SystemClock {
    pub fn new(offset: FixedOffset) -> Self {
        Self { offset }
    }

    /// Returns `None` when the offset is outside ±23 hours.
    pub fn with_utc_offset_hours(hours: i32) -> Option<Self> {
        FixedOffset::east_opt(hours * 3600).map(Self::new)
    }
}

impl Clock for SystemClock {
    fn now(&self) -> DateTime<FixedOffset> {
        Utc::now().with_timezone(&self.offset)
    }
}

/// Clock frozen at one instant, for tests and replays.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(DateTime<FixedOffset>);

impl FixedClock {
    pub fn new(at: DateTime<FixedOffset>) -> Self {
        Self(at)
    }

    /// Parses an RFC 3339 instant, e.g. `2024-03-10T09:30:00+08:00`.
    pub fn parse(rfc3339: &str) -> Result<Self, chrono::ParseError> {
        DateTime::parse_from_rfc3339(rfc3339).map(Self)
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<FixedOffset> {
        self.0
    }
}
