//! Trailing-month date range
//!
//! Both reporting use cases look at the full calendar month preceding the
//! current one. The range is recomputed on every call and never stored.

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Inclusive `[start, end]` span of calendar dates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// The calendar month preceding today's month (local time)
    pub fn last_month() -> Self {
        Self::last_month_from(chrono::Local::now().date_naive())
    }

    /// The calendar month preceding the month of `today`
    pub fn last_month_from(today: NaiveDate) -> Self {
        // Day 1 of the current month always exists, and the day before it
        // is the last day of the previous month, whatever its length.
        let first_of_current = today - Duration::days(i64::from(today.day0()));
        let end = first_of_current - Duration::days(1);
        let start = end - Duration::days(i64::from(end.day0()));
        Self { start, end }
    }

    /// Check if a date falls within this range (both ends inclusive)
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} to {}",
            self.start.format("%Y-%m-%d"),
            self.end.format("%Y-%m-%d")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_leap_year_february() {
        let range = DateRange::last_month_from(date(2024, 3, 15));
        assert_eq!(range.start, date(2024, 2, 1));
        assert_eq!(range.end, date(2024, 2, 29));
    }

    #[test]
    fn test_common_year_february() {
        let range = DateRange::last_month_from(date(2025, 3, 15));
        assert_eq!(range.start, date(2025, 2, 1));
        assert_eq!(range.end, date(2025, 2, 28));
    }

    #[test]
    fn test_january_rolls_back_to_december() {
        let range = DateRange::last_month_from(date(2025, 1, 1));
        assert_eq!(range.start, date(2024, 12, 1));
        assert_eq!(range.end, date(2024, 12, 31));
    }

    #[test]
    fn test_end_of_long_month() {
        let range = DateRange::last_month_from(date(2024, 5, 31));
        assert_eq!(range.start, date(2024, 4, 1));
        assert_eq!(range.end, date(2024, 4, 30));
    }

    #[test]
    fn test_contains_is_inclusive() {
        let range = DateRange::last_month_from(date(2024, 3, 15));
        assert!(range.contains(date(2024, 2, 1)));
        assert!(range.contains(date(2024, 2, 29)));
        assert!(!range.contains(date(2024, 1, 31)));
        assert!(!range.contains(date(2024, 3, 1)));
    }

    #[test]
    fn test_last_month_ends_before_today() {
        let today = chrono::Local::now().date_naive();
        let range = DateRange::last_month();
        assert!(range.end < today);
        assert_eq!(range.start.day(), 1);
    }

    #[test]
    fn test_display() {
        let range = DateRange::last_month_from(date(2024, 3, 15));
        assert_eq!(range.to_string(), "2024-02-01 to 2024-02-29");
    }
}
