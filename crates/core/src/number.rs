//! Fixed-point NUMBER type
//!
//! `NUMBER(p,s)` stores up to `p` significant decimal digits, `s` of them
//! after the decimal point. The descriptor validates declarations and answers
//! whether a floating-point value is storable; it does no decimal arithmetic.

use crate::error::{TypeError, TypeResult};
use crate::traits::DataType;
use std::any::Any;

/// Fixed-point decimal number descriptor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NumberType {
    nullable: bool,
    precision: u32,
    scale: u32,
}

impl NumberType {
    /// Maximum number of significant digits
    pub const MAX_PRECISION: u32 = 38;

    /// Maximum number of digits after the decimal point
    pub const MAX_SCALE: u32 = 127;

    /// Create a NUMBER descriptor
    ///
    /// Fails when `precision > 38`, `scale > 127` or `scale > precision`.
    pub fn new(precision: u32, scale: u32, nullable: bool) -> TypeResult<Self> {
        if precision > Self::MAX_PRECISION {
            return Err(TypeError::invalid_parameter(
                "NUMBER",
                format!("Precision cannot exceed {}", Self::MAX_PRECISION),
            ));
        }
        if scale > Self::MAX_SCALE {
            return Err(TypeError::invalid_parameter(
                "NUMBER",
                format!("Scale cannot exceed {}", Self::MAX_SCALE),
            ));
        }
        if scale > precision {
            return Err(TypeError::invalid_parameter(
                "NUMBER",
                "Scale cannot be greater than precision",
            ));
        }

        tracing::trace!(precision, scale, nullable, "created NUMBER descriptor");
        Ok(Self {
            nullable,
            precision,
            scale,
        })
    }

    pub fn precision(&self) -> u32 {
        self.precision
    }

    pub fn scale(&self) -> u32 {
        self.scale
    }

    /// Whether the type holds whole numbers only
    pub fn is_integer(&self) -> bool {
        self.scale == 0
    }

    /// Largest storable magnitude: `10^(p-s) - 10^(-s)`
    pub fn max_value(&self) -> f64 {
        let integer_part = 10f64.powf(f64::from(self.precision - self.scale));
        let smallest_fraction = 10f64.powf(-f64::from(self.scale));
        integer_part - smallest_fraction
    }

    /// Check if `value` is storable once rounded to the declared scale
    ///
    /// The value is rounded half away from zero to `scale` digits before the
    /// inclusive comparison against `[-max_value, max_value]`.
    pub fn is_in_range(&self, value: f64) -> bool {
        let max_value = self.max_value();
        let factor = 10f64.powf(f64::from(self.scale));
        let scaled = (value * factor).round() / factor;
        scaled >= -max_value && scaled <= max_value
    }
}

impl Default for NumberType {
    fn default() -> Self {
        Self {
            nullable: true,
            precision: Self::MAX_PRECISION,
            scale: 0,
        }
    }
}

impl DataType for NumberType {
    fn name(&self) -> String {
        if self.scale == 0 {
            format!("NUMBER({})", self.precision)
        } else {
            format!("NUMBER({},{})", self.precision, self.scale)
        }
    }

    fn storage_size(&self) -> usize {
        1 + self.precision.div_ceil(2) as usize
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
