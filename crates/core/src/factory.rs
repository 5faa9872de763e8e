//! Construction helpers
//!
//! Boxed descriptors with the engine's default parameters. These do no
//! validation of their own; errors come from the descriptor constructors.

use crate::character::{CharType, NCharType, NVarchar2Type, Varchar2Type};
use crate::date::DateType;
use crate::error::TypeResult;
use crate::number::NumberType;
use crate::timestamp::TimestampType;
use crate::traits::DataType;

// ============================================================================
// Numeric
// ============================================================================

/// `NUMBER(38)`
pub fn number(nullable: bool) -> TypeResult<Box<dyn DataType>> {
    decimal(NumberType::MAX_PRECISION, 0, nullable)
}

/// Whole numbers with the maximum precision
pub fn integer(nullable: bool) -> TypeResult<Box<dyn DataType>> {
    decimal(NumberType::MAX_PRECISION, 0, nullable)
}

/// `NUMBER(precision,scale)`
pub fn decimal(precision: u32, scale: u32, nullable: bool) -> TypeResult<Box<dyn DataType>> {
    Ok(Box::new(NumberType::new(precision, scale, nullable)?))
}

// ============================================================================
// Date/Time
// ============================================================================

pub fn date(nullable: bool) -> Box<dyn DataType> {
    Box::new(DateType::new(nullable))
}

pub fn timestamp(precision: i32, with_time_zone: bool, nullable: bool) -> Box<dyn DataType> {
    Box::new(TimestampType::new(precision, with_time_zone, nullable))
}

/// `TIMESTAMP WITH TIME ZONE`
pub fn timestamp_tz(precision: i32, nullable: bool) -> Box<dyn DataType> {
    timestamp(precision, true, nullable)
}

// ============================================================================
// Character
// ============================================================================

pub fn char_type(length: usize, nullable: bool) -> TypeResult<Box<dyn DataType>> {
    Ok(Box::new(CharType::new(length, nullable)?))
}

/// `CHAR(1)`
pub fn default_char(nullable: bool) -> TypeResult<Box<dyn DataType>> {
    char_type(CharType::DEFAULT_LENGTH, nullable)
}

pub fn nchar(length: usize, nullable: bool) -> TypeResult<Box<dyn DataType>> {
    Ok(Box::new(NCharType::new(length, nullable)?))
}

/// `NCHAR(1)`
pub fn default_nchar(nullable: bool) -> TypeResult<Box<dyn DataType>> {
    nchar(NCharType::DEFAULT_LENGTH, nullable)
}

pub fn varchar2(max_length: usize, nullable: bool) -> TypeResult<Box<dyn DataType>> {
    Ok(Box::new(Varchar2Type::new(max_length, nullable)?))
}

/// `VARCHAR2(4000)`
pub fn default_varchar2(nullable: bool) -> TypeResult<Box<dyn DataType>> {
    varchar2(Varchar2Type::MAX_LENGTH, nullable)
}

pub fn nvarchar2(max_length: usize, nullable: bool) -> TypeResult<Box<dyn DataType>> {
    Ok(Box::new(NVarchar2Type::new(max_length, nullable)?))
}

/// `NVARCHAR2(4000)`
pub fn default_nvarchar2(nullable: bool) -> TypeResult<Box<dyn DataType>> {
    nvarchar2(NVarchar2Type::MAX_LENGTH, nullable)
}

// ============================================================================
// Tests
// ============================================================================
