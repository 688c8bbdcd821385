//! Business-day calendars.
//!
//! The US calendar follows the NYSE holiday schedule: fixed holidays falling
//! on a Sunday are observed the following Monday and those falling on a
//! Saturday the preceding Friday, except New Year's Day, which is not moved
//! back into the previous year.

use chrono::{Datelike, Duration, NaiveDate, Weekday};

/// A calendar that can classify dates as business days.
pub trait BusinessCalendar: Send + Sync {
    /// Returns true if `date` is a business day.
    fn is_business_day(&self, date: NaiveDate) -> bool;

    /// Counts business days in the half-open interval `(start, end]`.
    ///
    /// Returns zero when `end <= start`.
    fn business_days_between(&self, start: NaiveDate, end: NaiveDate) -> usize {
        start
            .iter_days()
            .skip(1)
            .take_while(|d| *d <= end)
            .filter(|d| self.is_business_day(*d))
            .count()
    }
}

#[inline]
fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Saturday/Sunday weekends, no holidays.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WeekendsOnly;

impl BusinessCalendar for WeekendsOnly {
    fn is_business_day(&self, date: NaiveDate) -> bool {
        !is_weekend(date)
    }
}

/// United States exchange calendar (NYSE holiday rules).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UnitedStates;

impl BusinessCalendar for UnitedStates {
    fn is_business_day(&self, date: NaiveDate) -> bool {
        !is_weekend(date) && !is_us_holiday(date)
    }
}

fn is_us_holiday(date: NaiveDate) -> bool {
    let y = date.year();
    let hit = |candidate: Option<NaiveDate>| candidate == Some(date);

    hit(observed(y, 1, 1, false))
        || hit(NaiveDate::from_weekday_of_month_opt(y, 1, Weekday::Mon, 3))
        || hit(NaiveDate::from_weekday_of_month_opt(y, 2, Weekday::Mon, 3))
        || hit(easter_sunday(y).map(|e| e - Duration::days(2)))
        || hit(last_weekday_of_month(y, 5, Weekday::Mon))
        || (y >= 2022 && hit(observed(y, 6, 19, true)))
        || hit(observed(y, 7, 4, true))
        || hit(NaiveDate::from_weekday_of_month_opt(y, 9, Weekday::Mon, 1))
        || hit(NaiveDate::from_weekday_of_month_opt(y, 11, Weekday::Thu, 4))
        || hit(observed(y, 12, 25, true))
}

/// Weekend observance for a fixed-date holiday.
fn observed(year: i32, month: u32, day: u32, saturday_to_friday: bool) -> Option<NaiveDate> {
    let actual = NaiveDate::from_ymd_opt(year, month, day)?;
    match actual.weekday() {
        Weekday::Sat if saturday_to_friday => Some(actual - Duration::days(1)),
        Weekday::Sat => None,
        Weekday::Sun => Some(actual + Duration::days(1)),
        _ => Some(actual),
    }
}

fn last_weekday_of_month(year: i32, month: u32, weekday: Weekday) -> Option<NaiveDate> {
    NaiveDate::from_weekday_of_month_opt(year, month, weekday, 5)
        .or_else(|| NaiveDate::from_weekday_of_month_opt(year, month, weekday, 4))
}

/// Gregorian Easter Sunday (Meeus/Jones/Butcher).
fn easter_sunday(year: i32) -> Option<NaiveDate> {
    let a = year % 19;
    let b = year / 100;
    let c = year % 100;
    let d = b / 4;
    let e = b % 4;
    let f = (b + 8) / 25;
    let g = (b - f + 1) / 3;
    let h = (19 * a + b - d - g + 15) % 30;
    let i = c / 4;
    let k = c % 4;
    let l = (32 + 2 * e + 2 * i - h - k) % 7;
    let m = (a + 11 * h + 22 * l) / 451;
    let month = (h + l - 7 * m + 114) / 31;
    let day = ((h + l - 7 * m + 114) % 31) + 1;
    NaiveDate::from_ymd_opt(year, month as u32, day as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_easter_dates() {
        assert_eq!(easter_sunday(2024), Some(d(2024, 3, 31)));
        assert_eq!(easter_sunday(2025), Some(d(2025, 4, 20)));
    }

    #[test]
    fn test_us_2024_holidays() {
        let us = UnitedStates;
        for holiday in [
            d(2024, 1, 1),
            d(2024, 1, 15),
            d(2024, 2, 19),
            d(2024, 3, 29),
            d(2024, 5, 27),
            d(2024, 6, 19),
            d(2024, 7, 4),
            d(2024, 9, 2),
            d(2024, 11, 28),
            d(2024, 12, 25),
        ] {
            assert!(!us.is_business_day(holiday), "{} should be a holiday", holiday);
        }
        assert!(us.is_business_day(d(2024, 7, 5)));
    }

    #[test]
    fn test_us_observance_rules() {
        let us = UnitedStates;
        // New Year 2022 fell on Saturday: no Friday observance
        assert!(us.is_business_day(d(2021, 12, 31)));
        // Juneteenth 2022 fell on Sunday
        assert!(!us.is_business_day(d(2022, 6, 20)));
        // Independence Day 2026 falls on Saturday
        assert!(!us.is_business_day(d(2026, 7, 3)));
        // Juneteenth not observed before 2022
        assert!(us.is_business_day(d(2021, 6, 18)));
    }

    #[test]
    fn test_business_days_in_2024() {
        assert_eq!(
            UnitedStates.business_days_between(d(2023, 12, 31), d(2024, 12, 31)),
            252
        );
        assert_eq!(
            WeekendsOnly.business_days_between(d(2023, 12, 31), d(2024, 12, 31)),
            262
        );
    }

    #[test]
    fn test_interval_is_half_open() {
        // Fri 14 Jun to Fri 21 Jun 2024, Juneteenth on Wednesday
        assert_eq!(
            UnitedStates.business_days_between(d(2024, 6, 14), d(2024, 6, 21)),
            4
        );
        assert_eq!(
            UnitedStates.business_days_between(d(2024, 6, 21), d(2024, 6, 14)),
            0
        );
    }
}
