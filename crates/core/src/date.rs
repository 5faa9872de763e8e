//! DATE type
//!
//! An engine DATE holds a calendar date and a time of day to the second, with
//! no fractional seconds and no time zone. It always occupies 7 bytes.

use crate::calendar;
use crate::error::{TypeError, TypeResult};
use crate::traits::DataType;
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::cmp::Ordering;

// ============================================================================
// DateParts
// ============================================================================

/// Components of a DATE value, already split into integers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct DateParts {
    pub year: i32,
    pub month: i32,
    pub day: i32,
    #[serde(default)]
    pub hour: i32,
    #[serde(default)]
    pub minute: i32,
    #[serde(default)]
    pub second: i32,
}

impl DateParts {
    /// Create a date at midnight
    pub fn new(year: i32, month: i32, day: i32) -> Self {
        Self {
            year,
            month,
            day,
            ..Self::default()
        }
    }

    /// Set the time of day
    pub fn with_time(self, hour: i32, minute: i32, second: i32) -> Self {
        Self {
            hour,
            minute,
            second,
            ..self
        }
    }

    /// Whether any time-of-day component is set
    pub fn has_time(&self) -> bool {
        self.hour != 0 || self.minute != 0 || self.second != 0
    }

    pub(crate) fn instant(&self) -> Option<i64> {
        calendar::instant(
            self.year,
            self.month,
            self.day,
            self.hour,
            self.minute,
            self.second,
        )
    }
}

// ============================================================================
// DateType
// ============================================================================

/// DATE descriptor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DateType {
    nullable: bool,
}

impl DateType {
    pub const MIN_YEAR: i32 = calendar::MIN_YEAR;
    pub const MAX_YEAR: i32 = calendar::MAX_YEAR;

    /// Bytes the engine uses for a DATE: century, year, month, day, hour,
    /// minute, second
    pub const BYTES_SIZE: usize = 7;

    pub fn new(nullable: bool) -> Self {
        Self { nullable }
    }

    /// Check if `parts` denote an existing date and time of day
    pub fn is_valid_date(&self, parts: &DateParts) -> bool {
        calendar::year_in_range(parts.year)
            && calendar::components_in_range(
                parts.month,
                parts.day,
                parts.hour,
                parts.minute,
                parts.second,
            )
            && calendar::civil_date(parts.year, parts.month, parts.day).is_some()
    }

    /// Render a date in the engine's default format
    ///
    /// Midnight renders as `YY-MM-DD`, any other time as `YY-MM-DD HH:MI:SS`.
    /// The year is the absolute value padded to at least two digits, and BC
    /// dates carry a trailing ` BC`.
    pub fn format_date(&self, parts: &DateParts) -> TypeResult<String> {
        if !self.is_valid_date(parts) {
            tracing::debug!(?parts, "rejected invalid DATE");
            return Err(TypeError::invalid_value(self.name(), "Invalid date"));
        }

        let mut formatted = format!(
            "{:02}-{:02}-{:02}",
            parts.year.unsigned_abs(),
            parts.month,
            parts.day
        );
        if parts.has_time() {
            formatted.push_str(&format!(
                " {:02}:{:02}:{:02}",
                parts.hour, parts.minute, parts.second
            ));
        }
        if parts.year < 0 {
            formatted.push_str(" BC");
        }
        Ok(formatted)
    }

    /// Order two dates by the instant they denote
    ///
    /// A date that does not exist on the calendar makes the two compare
    /// `Equal`; callers wanting an error should check validity first.
    pub fn compare_dates(a: &DateParts, b: &DateParts) -> Ordering {
        match (a.instant(), b.instant()) {
            (Some(lhs), Some(rhs)) => lhs.cmp(&rhs),
            _ => {
                tracing::debug!(?a, ?b, "DATE comparison on a non-existent date");
                Ordering::Equal
            }
        }
    }
}

impl Default for DateType {
    fn default() -> Self {
        Self::new(true)
    }
}

impl DataType for DateType {
    fn name(&self) -> String {
        "DATE".to_string()
    }

    fn storage_size(&self) -> usize {
        Self::BYTES_SIZE
    }

    fn is_nullable(&self) -> bool {
        self.nullable
    }

    fn clone_box(&self) -> Box<dyn DataType> {
        Box::new(*self)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_descriptor() {
        let date = DateType::new(true);
        assert!(date.is_nullable());
        assert_eq!(date.name(), "DATE");
        assert_eq!(date.storage_size(), 7);
        assert!(!DateType::new(false).is_nullable());
    }

    #[test]
    fn test_is_valid_date() {
        let date = DateType::default();
        let cases = [
            (DateParts::new(2024, 1, 1), true, "date without time"),
            (DateParts::new(2024, 2, 29), true, "leap day"),
            (DateParts::new(2023, 2, 29), false, "not a leap year"),
            (DateParts::new(-4712, 1, 1), true, "minimum year"),
            (
                DateParts::new(9999, 12, 31).with_time(23, 59, 59),
                true,
                "maximum date and time",
            ),
            (DateParts::new(10000, 1, 1), false, "year too large"),
            (DateParts::new(-4713, 1, 1), false, "year too small"),
            (DateParts::new(2024, 13, 1), false, "invalid month"),
            (DateParts::new(2024, 4, 31), false, "day past end of April"),
            (DateParts::new(2024, 1, 1).with_time(24, 0, 0), false, "hour"),
            (DateParts::new(2024, 1, 1).with_time(0, 60, 0), false, "minute"),
            (DateParts::new(2024, 1, 1).with_time(0, 0, 60), false, "second"),
            (DateParts::new(2024, 1, 0), false, "day zero"),
            (DateParts::new(0, 2, 29), true, "year zero is a leap year"),
        ];

        for (parts, expected, description) in cases {
            assert_eq!(date.is_valid_date(&parts), expected, "{}", description);
        }
    }

    #[test]
    fn test_format_date() {
        let date = DateType::default();
        let cases = [
            (DateParts::new(2024, 1, 1), "2024-01-01"),
            (
                DateParts::new(2024, 12, 31).with_time(23, 59, 59),
                "2024-12-31 23:59:59",
            ),
            (DateParts::new(-4712, 1, 1), "4712-01-01 BC"),
            (DateParts::new(-1, 1, 1).with_time(12, 0, 0), "01-01-01 12:00:00 BC"),
            (DateParts::new(5, 3, 7), "05-03-07"),
            (DateParts::new(2024, 6, 15).with_time(0, 0, 1), "2024-06-15 00:00:01"),
        ];

        for (parts, expected) in cases {
            assert_eq!(date.format_date(&parts).unwrap(), expected);
        }
    }

    #[test]
    fn test_format_invalid_date_fails() {
        let date = DateType::default();
        let err = date.format_date(&DateParts::new(2023, 2, 29)).unwrap_err();
        assert!(err.is_invalid_value());
        assert_eq!(err.to_string(), "Invalid value for DATE: Invalid date");
    }

    #[test]
    fn test_compare_dates() {
        let cases = [
            (DateParts::new(2024, 1, 1), DateParts::new(2024, 1, 1), Ordering::Equal),
            (DateParts::new(2024, 1, 1), DateParts::new(2024, 1, 2), Ordering::Less),
            (DateParts::new(2024, 1, 2), DateParts::new(2024, 1, 1), Ordering::Greater),
            (
                DateParts::new(2024, 1, 1).with_time(12, 0, 0),
                DateParts::new(2024, 1, 1).with_time(13, 0, 0),
                Ordering::Less,
            ),
            (
                DateParts::new(-4712, 1, 1),
                DateParts::new(9999, 12, 31).with_time(23, 59, 59),
                Ordering::Less,
            ),
        ];

        for (a, b, expected) in cases {
            assert_eq!(DateType::compare_dates(&a, &b), expected, "{:?} vs {:?}", a, b);
        }
    }

    #[test]
    fn test_compare_non_existent_date_is_equal() {
        let valid = DateParts::new(2024, 1, 1);
        let invalid = DateParts::new(2023, 2, 30);
        assert_eq!(DateType::compare_dates(&valid, &invalid), Ordering::Equal);
        assert_eq!(DateType::compare_dates(&invalid, &valid), Ordering::Equal);
    }

    #[test]
    fn test_date_parts_deserialize_defaults_time() {
        let parts: DateParts =
            serde_json::from_str(r#"{"year": 2024, "month": 2, "day": 29}"#).unwrap();
        assert_eq!(parts, DateParts::new(2024, 2, 29));
        assert!(!parts.has_time());
    }
}
