//! Hard retention cutoff for history reads.

use chrono::{Duration, NaiveDate};

/// Only the most recent `days` days of logs are served.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetentionPolicy {
    days: i64,
}

impl RetentionPolicy {
    pub fn new(days: u32) -> Self {
        Self { days: days as i64 }
    }

    pub fn days(&self) -> i64 {
        self.days
    }

    /// `date` is readable when it is fewer than `days` calendar days before
    /// `today`. Future dates are not restricted here.
    pub fn permits(&self, today: NaiveDate, date: NaiveDate) -> bool {
        (today - date).num_days() < self.days
    }

    /// Navigation dates, newest first: every date `permits` accepts up to
    /// `today`.
    pub fn recent_dates(&self, today: NaiveDate) -> Vec<NaiveDate> {
        (0..self.days).map(|i| today - Duration::days(i)).collect()
    }
}

impl Default for RetentionPolicy {
    fn default() -> Self {
        Self::new(7)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn six_days_back_is_served() {
        let policy = RetentionPolicy::default();
        assert!(policy.permits(day(2024, 3, 10), day(2024, 3, 4)));
    }

    #[test]
    fn seven_days_back_is_refused() {
        let policy = RetentionPolicy::default();
        assert!(!policy.permits(day(2024, 3, 10), day(2024, 3, 3)));
        assert!(!policy.permits(day(2024, 3, 10), day(2024, 3, 2)));
    }

    #[test]
    fn today_and_future_are_served() {
        let policy = RetentionPolicy::default();
        assert!(policy.permits(day(2024, 3, 10), day(2024, 3, 10)));
        assert!(policy.permits(day(2024, 3, 10), day(2024, 3, 11)));
    }

    #[test]
    fn window_crosses_month_boundary() {
        let policy = RetentionPolicy::default();
        assert!(policy.permits(day(2024, 3, 2), day(2024, 2, 25)));
        assert!(!policy.permits(day(2024, 3, 2), day(2024, 2, 24)));
    }

    #[test]
    fn recent_dates_lists_newest_first() {
        let dates = RetentionPolicy::default().recent_dates(day(2024, 3, 10));
        assert_eq!(dates.len(), 7);
        assert_eq!(dates[0], day(2024, 3, 10));
        assert_eq!(dates[6], day(2024, 3, 4));
    }

    #[test]
    fn recent_dates_are_exactly_the_permitted_ones() {
        let policy = RetentionPolicy::default();
        let today = day(2024, 3, 10);
        let dates = policy.recent_dates(today);
        assert!(dates.iter().all(|d| policy.permits(today, *d)));
        let oldest = *dates.last().unwrap();
        assert!(!policy.permits(today, oldest - Duration::days(1)));
    }
}
