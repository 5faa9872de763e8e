//! TIMESTAMP and TIMESTAMP WITH TIME ZONE types
//!
//! A timestamp extends DATE with a fractional second of 0 to 9 digits and,
//! optionally, a time-zone offset in minutes. Precision outside `0..=9` is
//! clamped at construction rather than rejected.

use crate::calendar;
use crate::date::DateParts;
use crate::error::{TypeError, TypeResult};
use crate::traits::DataType;
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::cmp::Ordering;

/// Largest accepted time-zone offset magnitude, in minutes (14 hours)
pub const MAX_TZ_OFFSET_MINUTES: i32 = 14 * 60;

// ============================================================================
// TimestampParts
// ============================================================================

/// Components of a TIMESTAMP value, already split into integers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct TimestampParts {
    pub year: i32,
    pub month: i32,
    pub day: i32,
    pub hour: i32,
    pub minute: i32,
    pub second: i32,
    /// Fractional second as an integer of up to `precision` digits
    #[serde(default)]
    pub fraction: i64,
    /// Offset from UTC in minutes
    #[serde(default)]
    pub tz_offset: Option<i32>,
}

impl TimestampParts {
    pub fn new(year: i32, month: i32, day: i32, hour: i32, minute: i32, second: i32) -> Self {
        Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
            fraction: 0,
            tz_offset: None,
        }
    }

    pub fn with_fraction(self, fraction: i64) -> Self {
        Self { fraction, ..self }
    }

    pub fn with_offset(self, minutes: i32) -> Self {
        Self {
            tz_offset: Some(minutes),
            ..self
        }
    }

    /// The date and time of day, without fraction or offset
    pub fn date_parts(&self) -> DateParts {
        DateParts::new(self.year, self.month, self.day).with_time(self.hour, self.minute, self.second)
    }

    /// Wall-clock time shifted to UTC
    ///
    /// Only the hour and minute move; the hour wraps within the same day, so
    /// an offset that crosses midnight leaves the date untouched.
    fn normalized(&self) -> Self {
        let Some(offset) = self.tz_offset else {
            return *self;
        };
        // Components are unvalidated here; i64 cannot overflow
        let minutes = i64::from(self.minute) - i64::from(offset);
        let hour = (i64::from(self.hour) + minutes.div_euclid(60)).rem_euclid(24);
        Self {
            hour: hour as i32,
            minute: minutes.rem_euclid(60) as i32,
            ..*self
        }
    }
}

impl From<DateParts> for TimestampParts {
    fn from(parts: DateParts) -> Self {
        Self::new(
            parts.year,
            parts.month,
            parts.day,
            parts.hour,
            parts.minute,
            parts.second,
        )
    }
}

// ============================================================================
// TimestampType
// ============================================================================

/// TIMESTAMP descriptor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimestampType {
    precision: u32,
    with_time_zone: bool,
    nullable: bool,
}

impl TimestampType {
    pub const MIN_YEAR: i32 = calendar::MIN_YEAR;
    pub const MAX_YEAR: i32 = calendar::MAX_YEAR;

    /// Nanosecond precision
    pub const MAX_PRECISION: u32 = 9;

    /// Bytes used by the date and time of day
    pub const BASE_SIZE: usize = 7;

    /// Maximum extra bytes used by the fractional second
    pub const MAX_FRACTION_SIZE: usize = 3;

    /// Extra bytes used by the time-zone offset
    pub const TIME_ZONE_SIZE: usize = 2;

    /// Default fractional-second precision
    pub const DEFAULT_PRECISION: u32 = 6;

    /// Create a TIMESTAMP descriptor, clamping `precision` into `0..=9`
    pub fn new(precision: i32, with_time_zone: bool, nullable: bool) -> Self {
        let precision = precision.clamp(0, Self::MAX_PRECISION as i32) as u32;
        tracing::trace!(precision, with_time_zone, nullable, "created TIMESTAMP descriptor");
        Self {
            precision,
            with_time_zone,
            nullable,
        }
    }

    pub fn precision(&self) -> u32 {
        self.precision
    }

    pub fn has_time_zone(&self) -> bool {
        self.with_time_zone
    }

    /// Largest fraction representable with this precision
    pub fn max_fraction(&self) -> i64 {
        10i64.pow(self.precision) - 1
    }

    /// Check if `parts` denote a storable timestamp for this descriptor
    ///
    /// Besides the calendar checks, the fraction must fit the precision, the
    /// offset must lie within ±14 hours, and an offset must be present
    /// exactly when the type carries a time zone.
    pub fn is_valid_timestamp(&self, parts: &TimestampParts) -> bool {
        if !calendar::year_in_range(parts.year)
            || !calendar::components_in_range(
                parts.month,
                parts.day,
                parts.hour,
                parts.minute,
                parts.second,
            )
        {
            return false;
        }

        if parts.fraction < 0 || parts.fraction > self.max_fraction() {
            return false;
        }

        if let Some(offset) = parts.tz_offset {
            if !(-MAX_TZ_OFFSET_MINUTES..=MAX_TZ_OFFSET_MINUTES).contains(&offset) {
                return false;
            }
        }

        if self.with_time_zone != parts.tz_offset.is_some() {
            return false;
        }

        calendar::civil_date(parts.year, parts.month, parts.day).is_some()
    }

    /// Render a timestamp in the engine's default format
    ///
    /// `YYYY-MM-DD HH:MI:SS[.FFF] [BC] [±HH:MM]`: the fraction appears only
    /// when both precision and fraction are non-zero, zero-padded to the
    /// precision; the offset appears for time-zone types.
    pub fn format_timestamp(&self, parts: &TimestampParts) -> TypeResult<String> {
        if !self.is_valid_timestamp(parts) {
            tracing::debug!(?parts, type_name = %self.name(), "rejected invalid TIMESTAMP");
            return Err(TypeError::invalid_value(self.name(), "Invalid timestamp"));
        }

        let mut formatted = format!(
            "{:04}-{:02}-{:02} {:02}:{:02}:{:02}",
            parts.year.unsigned_abs(),
            parts.month,
            parts.day,
            parts.hour,
            parts.minute,
            parts.second
        );

        if self.precision > 0 && parts.fraction > 0 {
            let width = self.precision as usize;
            let mut digits = format!("{:0width$}", parts.fraction, width = width);
            digits.truncate(width);
            formatted.push('.');
            formatted.push_str(&digits);
        }

        if parts.year < 0 {
            formatted.push_str(" BC");
        }

        if let (true, Some(offset)) = (self.with_time_zone, parts.tz_offset) {
            let sign = if offset < 0 { '-' } else { '+' };
            let magnitude = offset.unsigned_abs();
            formatted.push_str(&format!(
                " {}{:02}:{:02}",
                sign,
                magnitude / 60,
                magnitude % 60
            ));
        }

        Ok(formatted)
    }

    /// Order two timestamps by the instant they denote
    ///
    /// Each side carrying an offset is first shifted to UTC (see
    /// [`TimestampParts`] for the same-day wrap); equal instants are then
    /// ordered by fraction. A date that does not exist on the calendar makes
    /// the two compare `Equal`.
    pub fn compare_timestamps(a: &TimestampParts, b: &TimestampParts) -> Ordering {
        let lhs = a.normalized();
        let rhs = b.normalized();

        match (lhs.date_parts().instant(), rhs.date_parts().instant()) {
            (Some(left), Some(right)) => left.cmp(&right).then(lhs.fraction.cmp(&rhs.fraction)),
            _ => {
                tracing::debug!(?a, ?b, "TIMESTAMP comparison on a non-existent date");
                Ordering::Equal
            }
        }
    }
}

impl Default for TimestampType {
    fn default() -> Self {
        Self::new(Self::DEFAULT_PRECISION as i32, false, true)
    }
}

impl DataType for TimestampType {
    fn name(&self) -> String {
        if self.with_time_zone {
            "TIMESTAMP WITH TIME ZONE".to_string()
        } else {
            "TIMESTAMP".to_string()
        }
    }

    fn storage_size(&self) -> usize {
        let mut size = Self::BASE_SIZE;
        if self.precision > 0 {
            let fraction_bytes = (self.precision as usize + 2) / 3;
            size += fraction_bytes.min(Self::MAX_FRACTION_SIZE);
        }
        if self.with_time_zone {
            size += Self::TIME_ZONE_SIZE;
        }
        size
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
