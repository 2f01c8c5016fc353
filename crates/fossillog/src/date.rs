//! Calendar dates composed from independently chosen year, month and day.
//!
//! The form offers three separate pickers. A date only exists once all three
//! are chosen; until then it composes to `None`, which is not an error.
//! Whenever a change shrinks the legal day range, the chosen day is clamped
//! to the new last day of the month.

use std::ops::RangeInclusive;

use chrono::{Datelike, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::{trace, warn};

/// Gregorian leap year rule.
#[must_use]
pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Number of days in `month` (1-12) of `year`.
///
/// Returns 0 for a month outside 1-12, meaning no day is legal.
#[must_use]
pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 0,
    }
}

/// Compose an ISO `YYYY-MM-DD` string.
///
/// Returns `None` if any part is missing or the parts do not name a real
/// day. A day past the end of the month is never wrapped into the next
/// month; callers clamp first (see [`DateParts`]).
#[must_use]
pub fn compose_date(year: Option<i32>, month: Option<u32>, day: Option<u32>) -> Option<String> {
    let (year, month, day) = (year?, month?, day?);
    if NaiveDate::from_ymd_opt(year, month, day).is_none() {
        warn!(year, month, day, "Date parts do not form a calendar date");
        return None;
    }
    Some(format!("{year:04}-{month:02}-{day:02}"))
}

/// Years offered by the year picker, newest first.
#[must_use]
pub fn year_choices(current: i32, earliest: i32) -> Vec<i32> {
    (earliest..=current).rev().collect()
}

/// Months offered by the month picker.
#[must_use]
pub fn month_choices() -> RangeInclusive<u32> {
    1..=12
}

/// The three date pickers of a draft.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateParts {
    /// Chosen year.
    pub year: Option<i32>,
    /// Chosen month, 1-12.
    pub month: Option<u32>,
    /// Chosen day of month.
    pub day: Option<u32>,
}

impl DateParts {
    /// All three parts taken from a calendar date.
    #[must_use]
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: Some(date.year()),
            month: Some(date.month()),
            day: Some(date.day()),
        }
    }

    /// Today's date in the local time zone.
    #[must_use]
    pub fn today() -> Self {
        Self::from_date(Local::now().date_naive())
    }

    /// The last legal day for the current year/month choice.
    ///
    /// Without a month every day up to 31 is allowed; without a year,
    /// February allows 29.
    #[must_use]
    pub fn max_day(&self) -> u32 {
        match (self.year, self.month) {
            (_, None) => 31,
            (None, Some(month)) => days_in_month(2000, month),
            (Some(year), Some(month)) => days_in_month(year, month),
        }
    }

    /// Days offered by the day picker.
    #[must_use]
    pub fn day_choices(&self) -> RangeInclusive<u32> {
        1..=self.max_day()
    }

    /// Change the year, clamping the day if needed.
    #[must_use]
    pub fn with_year(self, year: Option<i32>) -> Self {
        Self { year, ..self }.clamped()
    }

    /// Change the month, clamping the day if needed.
    ///
    /// A month outside 1-12 clears the month.
    #[must_use]
    pub fn with_month(self, month: Option<u32>) -> Self {
        let month = month.filter(|m| month_choices().contains(m));
        Self { month, ..self }.clamped()
    }

    /// Change the day, clamping it into the legal range.
    ///
    /// Day 0 clears the day.
    #[must_use]
    pub fn with_day(self, day: Option<u32>) -> Self {
        let day = day.filter(|d| *d > 0);
        Self { day, ..self }.clamped()
    }

    /// Check if all three parts are chosen.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.year.is_some() && self.month.is_some() && self.day.is_some()
    }

    /// The ISO date string, or `None` while incomplete.
    #[must_use]
    pub fn compose(&self) -> Option<String> {
        compose_date(self.year, self.month, self.day)
    }

    fn clamped(self) -> Self {
        let max = self.max_day();
        match self.day {
            Some(day) if day > max => {
                trace!(day, max, "Clamping day to end of month");
                Self {
                    day: Some(max).filter(|d| *d > 0),
                    ..self
                }
            }
            _ => self,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parts(year: i32, month: u32, day: u32) -> DateParts {
        DateParts {
            year: Some(year),
            month: Some(month),
            day: Some(day),
        }
    }

    #[test]
    fn test_days_in_month_february() {
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2023, 2), 28);
        assert_eq!(days_in_month(1900, 2), 28);
        assert_eq!(days_in_month(2000, 2), 29);
    }

    #[test]
    fn test_days_in_month_matches_chrono() {
        for year in [1900, 1999, 2000, 2023, 2024, 2100] {
            for month in 1..=12 {
                let first = NaiveDate::from_ymd_opt(year, month, 1).unwrap();
                let next = if month == 12 {
                    NaiveDate::from_ymd_opt(year + 1, 1, 1).unwrap()
                } else {
                    NaiveDate::from_ymd_opt(year, month + 1, 1).unwrap()
                };
                let expected = u32::try_from((next - first).num_days()).unwrap();
                assert_eq!(days_in_month(year, month), expected, "{year}-{month}");
            }
        }
    }

    #[test]
    fn test_days_in_month_invalid_month() {
        assert_eq!(days_in_month(2024, 0), 0);
        assert_eq!(days_in_month(2024, 13), 0);
    }

    #[test]
    fn test_compose_date() {
        assert_eq!(
            compose_date(Some(2025), Some(8), Some(10)).as_deref(),
            Some("2025-08-10")
        );
        assert_eq!(
            compose_date(Some(2024), Some(12), Some(31)).as_deref(),
            Some("2024-12-31")
        );
    }

    #[test]
    fn test_compose_date_missing_part() {
        assert!(compose_date(None, Some(8), Some(10)).is_none());
        assert!(compose_date(Some(2025), None, Some(10)).is_none());
        assert!(compose_date(Some(2025), Some(8), None).is_none());
        assert!(DateParts::default().compose().is_none());
    }

    #[test]
    fn test_compose_date_never_wraps() {
        assert!(compose_date(Some(2023), Some(2), Some(29)).is_none());
        assert!(compose_date(Some(2025), Some(4), Some(31)).is_none());
    }

    #[test]
    fn test_month_change_clamps_day() {
        let date = parts(2025, 1, 31).with_month(Some(2));
        assert_eq!(date.day, Some(28));
        assert_eq!(date.compose().as_deref(), Some("2025-02-28"));

        let date = parts(2025, 3, 31).with_month(Some(4));
        assert_eq!(date.day, Some(30));
    }

    #[test]
    fn test_year_change_clamps_leap_day() {
        let date = parts(2024, 2, 29).with_year(Some(2023));
        assert_eq!(date.day, Some(28));

        let date = parts(2024, 2, 29).with_year(Some(2000));
        assert_eq!(date.day, Some(29));
    }

    #[test]
    fn test_change_within_range_keeps_day() {
        let date = parts(2025, 1, 15).with_month(Some(2));
        assert_eq!(date.day, Some(15));
    }

    #[test]
    fn test_without_year_february_allows_29() {
        let date = DateParts::default()
            .with_month(Some(2))
            .with_day(Some(31));
        assert_eq!(date.day, Some(29));
        assert!(!date.is_complete());

        let date = date.with_year(Some(2023));
        assert_eq!(date.day, Some(28));
        assert!(date.is_complete());
    }

    #[test]
    fn test_day_setter_clamps_and_zero_clears() {
        let date = parts(2025, 6, 1).with_day(Some(31));
        assert_eq!(date.day, Some(30));

        let date = date.with_day(Some(0));
        assert_eq!(date.day, None);
    }

    #[test]
    fn test_invalid_month_clears_month() {
        let date = parts(2025, 6, 10).with_month(Some(13));
        assert_eq!(date.month, None);
        assert_eq!(date.day, Some(10));
        assert!(date.compose().is_none());
    }

    #[test]
    fn test_clearing_month_keeps_day() {
        let date = parts(2025, 2, 28).with_month(None);
        assert_eq!(date.day, Some(28));
        assert_eq!(date.max_day(), 31);
    }

    #[test]
    fn test_day_choices() {
        assert_eq!(parts(2024, 2, 1).day_choices(), 1..=29);
        assert_eq!(parts(2023, 2, 1).day_choices(), 1..=28);
        assert_eq!(DateParts::default().day_choices(), 1..=31);
    }

    #[test]
    fn test_year_choices_newest_first() {
        let years = year_choices(2025, 2020);
        assert_eq!(years, vec![2025, 2024, 2023, 2022, 2021, 2020]);
        assert!(year_choices(2019, 2020).is_empty());
    }

    #[test]
    fn test_today_is_complete() {
        let today = DateParts::today();
        assert!(today.is_complete());
        assert!(today.compose().is_some());
    }
}
