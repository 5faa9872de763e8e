//! Proleptic calendar helpers shared by DATE and TIMESTAMP
//!
//! Years run from 4712 BC to 9999 AD. BC years are negative and year 0 is
//! accepted, as in the proleptic Gregorian calendar.

use chrono::{Datelike, NaiveDate};

/// Earliest supported year (4712 BC)
pub const MIN_YEAR: i32 = -4712;

/// Latest supported year
pub const MAX_YEAR: i32 = 9999;

const SECONDS_PER_DAY: i64 = 86_400;

/// Check if `year` is within the supported range
pub fn year_in_range(year: i32) -> bool {
    (MIN_YEAR..=MAX_YEAR).contains(&year)
}

/// Check if `year` is a leap year in the proleptic Gregorian calendar
pub fn is_leap_year(year: i32) -> bool {
    NaiveDate::from_ymd_opt(year, 2, 29).is_some()
}

/// Number of days in `month` of `year`, or `None` for an invalid month
pub fn days_in_month(year: i32, month: i32) -> Option<u32> {
    match month {
        2 if is_leap_year(year) => Some(29),
        2 => Some(28),
        4 | 6 | 9 | 11 => Some(30),
        1..=12 => Some(31),
        _ => None,
    }
}

/// Coarse range check of every component, before calendar validation
pub(crate) fn components_in_range(
    month: i32,
    day: i32,
    hour: i32,
    minute: i32,
    second: i32,
) -> bool {
    (1..=12).contains(&month)
        && (1..=31).contains(&day)
        && (0..=23).contains(&hour)
        && (0..=59).contains(&minute)
        && (0..=59).contains(&second)
}

/// Build a calendar date, rejecting days past the end of the month
pub(crate) fn civil_date(year: i32, month: i32, day: i32) -> Option<NaiveDate> {
    let last_day = days_in_month(year, month)?;
    let day = u32::try_from(day).ok().filter(|day| (1..=last_day).contains(day))?;
    NaiveDate::from_ymd_opt(year, u32::try_from(month).ok()?, day)
}

/// Seconds since the start of the common era for the given wall-clock time
///
/// Hours, minutes and seconds are added as offsets without range checks;
/// only the date itself must exist.
pub(crate) fn instant(
    year: i32,
    month: i32,
    day: i32,
    hour: i32,
    minute: i32,
    second: i32,
) -> Option<i64> {
    let date = civil_date(year, month, day)?;
    Some(
        i64::from(date.num_days_from_ce()) * SECONDS_PER_DAY
            + i64::from(hour) * 3_600
            + i64::from(minute) * 60
            + i64::from(second),
    )
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_year_bounds() {
        assert!(year_in_range(MIN_YEAR));
        assert!(year_in_range(MAX_YEAR));
        assert!(year_in_range(0));
        assert!(!year_in_range(MIN_YEAR - 1));
        assert!(!year_in_range(MAX_YEAR + 1));
    }

    #[test]
    fn test_leap_years() {
        assert!(is_leap_year(2024));
        assert!(is_leap_year(2000));
        assert!(!is_leap_year(1900));
        assert!(!is_leap_year(2023));
        // Proleptic: year 0 (1 BC) is a leap year
        assert!(is_leap_year(0));
        assert!(is_leap_year(-4));
    }

    #[test]
    fn test_days_in_month() {
        assert_eq!(days_in_month(2024, 2), Some(29));
        assert_eq!(days_in_month(2023, 2), Some(28));
        assert_eq!(days_in_month(2024, 4), Some(30));
        assert_eq!(days_in_month(2024, 12), Some(31));
        assert_eq!(days_in_month(2024, 13), None);
        assert_eq!(days_in_month(2024, 0), None);
    }

    #[test]
    fn test_components_in_range() {
        assert!(components_in_range(1, 1, 0, 0, 0));
        assert!(components_in_range(12, 31, 23, 59, 59));
        assert!(!components_in_range(0, 1, 0, 0, 0));
        assert!(!components_in_range(1, 32, 0, 0, 0));
        assert!(!components_in_range(1, 1, 24, 0, 0));
        assert!(!components_in_range(1, 1, 0, -1, 0));
        assert!(!components_in_range(1, 1, 0, 0, 60));
    }

    #[test]
    fn test_civil_date_rejects_negative_components() {
        assert!(civil_date(2024, -1, 1).is_none());
        assert!(civil_date(2024, 1, -1).is_none());
        assert!(civil_date(2023, 2, 29).is_none());
        assert!(civil_date(2024, 4, 31).is_none());
        assert!(civil_date(2024, 2, 29).is_some());
        assert!(civil_date(-4712, 1, 1).is_some());
    }

    #[test]
    fn test_instant_ordering() {
        let a = instant(2024, 1, 1, 23, 59, 59).unwrap();
        let b = instant(2024, 1, 2, 0, 0, 0).unwrap();
        assert_eq!(b - a, 1);

        let bc = instant(-4712, 1, 1, 0, 0, 0).unwrap();
        assert!(bc < a);
        assert!(instant(2024, 2, 30, 0, 0, 0).is_none());
    }
}
