//! Type declarations
//!
//! [`TypeDecl`] is the serializable, parseable form of a column type. It
//! carries the declared parameters only; [`TypeDecl::build`] hands them to the
//! descriptor constructors, which own all bound validation.

use crate::character::{CharType, NCharType, NVarchar2Type, Varchar2Type};
use crate::date::DateType;
use crate::error::{TypeError, TypeResult};
use crate::number::NumberType;
use crate::timestamp::TimestampType;
use crate::traits::DataType;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

// ============================================================================
// TypeDecl
// ============================================================================

/// Declaration of a catalog type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "params")]
pub enum TypeDecl {
    /// `NUMBER(p,s)`
    Number { precision: u32, scale: u32 },
    /// `DATE`
    Date,
    /// `TIMESTAMP(p) [WITH TIME ZONE]`
    Timestamp { precision: u32, with_time_zone: bool },
    /// `CHAR(n)`
    Char { length: usize },
    /// `NCHAR(n)`
    NChar { length: usize },
    /// `VARCHAR2(n)`
    Varchar2 { max_length: usize },
    /// `NVARCHAR2(n)`
    NVarchar2 { max_length: usize },
}

impl TypeDecl {
    /// Construct the descriptor this declaration names
    pub fn build(&self, nullable: bool) -> TypeResult<Box<dyn DataType>> {
        Ok(match *self {
            TypeDecl::Number { precision, scale } => {
                Box::new(NumberType::new(precision, scale, nullable)?)
            }
            TypeDecl::Date => Box::new(DateType::new(nullable)),
            TypeDecl::Timestamp {
                precision,
                with_time_zone,
            } => Box::new(TimestampType::new(
                i32::try_from(precision).unwrap_or(i32::MAX),
                with_time_zone,
                nullable,
            )),
            TypeDecl::Char { length } => Box::new(CharType::new(length, nullable)?),
            TypeDecl::NChar { length } => Box::new(NCharType::new(length, nullable)?),
            TypeDecl::Varchar2 { max_length } => Box::new(Varchar2Type::new(max_length, nullable)?),
            TypeDecl::NVarchar2 { max_length } => {
                Box::new(NVarchar2Type::new(max_length, nullable)?)
            }
        })
    }

    /// The bare type keyword, e.g. `VARCHAR2`
    pub fn keyword(&self) -> &'static str {
        match self {
            TypeDecl::Number { .. } => "NUMBER",
            TypeDecl::Date => "DATE",
            TypeDecl::Timestamp { .. } => "TIMESTAMP",
            TypeDecl::Char { .. } => "CHAR",
            TypeDecl::NChar { .. } => "NCHAR",
            TypeDecl::Varchar2 { .. } => "VARCHAR2",
            TypeDecl::NVarchar2 { .. } => "NVARCHAR2",
        }
    }

    /// Check if this is one of the character types
    pub fn is_character(&self) -> bool {
        matches!(
            self,
            TypeDecl::Char { .. }
                | TypeDecl::NChar { .. }
                | TypeDecl::Varchar2 { .. }
                | TypeDecl::NVarchar2 { .. }
        )
    }

    /// Check if this is DATE or TIMESTAMP
    pub fn is_temporal(&self) -> bool {
        matches!(self, TypeDecl::Date | TypeDecl::Timestamp { .. })
    }

    /// One declaration per catalog type, with default parameters
    pub fn all_defaults() -> Vec<TypeDecl> {
        vec![
            Self::default_for("NUMBER"),
            Self::default_for("DATE"),
            Self::default_for("TIMESTAMP"),
            Self::default_for("CHAR"),
            Self::default_for("NCHAR"),
            Self::default_for("VARCHAR2"),
            Self::default_for("NVARCHAR2"),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    fn default_for(keyword: &str) -> Option<TypeDecl> {
        Some(match keyword {
            "NUMBER" => TypeDecl::Number {
                precision: NumberType::MAX_PRECISION,
                scale: 0,
            },
            "DATE" => TypeDecl::Date,
            "TIMESTAMP" => TypeDecl::Timestamp {
                precision: TimestampType::DEFAULT_PRECISION,
                with_time_zone: false,
            },
            "CHAR" => TypeDecl::Char {
                length: CharType::DEFAULT_LENGTH,
            },
            "NCHAR" => TypeDecl::NChar {
                length: NCharType::DEFAULT_LENGTH,
            },
            "VARCHAR2" => TypeDecl::Varchar2 {
                max_length: Varchar2Type::MAX_LENGTH,
            },
            "NVARCHAR2" => TypeDecl::NVarchar2 {
                max_length: NVarchar2Type::MAX_LENGTH,
            },
            _ => return None,
        })
    }
}

impl Default for TypeDecl {
    fn default() -> Self {
        TypeDecl::Number {
            precision: NumberType::MAX_PRECISION,
            scale: 0,
        }
    }
}

impl std::fmt::Display for TypeDecl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.keyword())?;
        match self {
            TypeDecl::Number { precision, scale } if *scale == 0 => write!(f, "({})", precision),
            TypeDecl::Number { precision, scale } => write!(f, "({},{})", precision, scale),
            TypeDecl::Date => Ok(()),
            TypeDecl::Timestamp {
                precision,
                with_time_zone,
            } => {
                if *precision != TimestampType::DEFAULT_PRECISION {
                    write!(f, "({})", precision)?;
                }
                if *with_time_zone {
                    write!(f, "{}", WITH_TIME_ZONE)?;
                }
                Ok(())
            }
            TypeDecl::Char { length } | TypeDecl::NChar { length } => write!(f, "({})", length),
            TypeDecl::Varchar2 { max_length } | TypeDecl::NVarchar2 { max_length } => {
                write!(f, "({})", max_length)
            }
        }
    }
}

// ============================================================================
// Signature Parsing
// ============================================================================

const WITH_TIME_ZONE: &str = " WITH TIME ZONE";

impl FromStr for TypeDecl {
    type Err = TypeError;

    /// Parse a signature such as `NUMBER(10,2)` or
    /// `TIMESTAMP(3) WITH TIME ZONE`, case-insensitively
    fn from_str(signature: &str) -> TypeResult<Self> {
        let normalized = signature
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
            .to_ascii_uppercase();
        let invalid = || TypeError::InvalidSignature(signature.trim().to_string());

        let (head, with_time_zone) = match normalized.strip_suffix(WITH_TIME_ZONE) {
            Some(head) => (head.trim_end(), true),
            None => (normalized.as_str(), false),
        };

        let (keyword, params) = match head.find('(') {
            Some(open) => {
                let inner = head[open + 1..].strip_suffix(')').ok_or_else(invalid)?;
                let params = inner
                    .split(',')
                    .map(|p| p.trim().parse::<u32>())
                    .collect::<Result<Vec<_>, _>>()
                    .map_err(|_| invalid())?;
                (head[..open].trim_end(), params)
            }
            None => (head, Vec::new()),
        };

        let mut decl = Self::default_for(keyword)
            .ok_or_else(|| TypeError::UnknownType(keyword.to_string()))?;

        if with_time_zone && !matches!(decl, TypeDecl::Timestamp { .. }) {
            return Err(invalid());
        }

        match (&mut decl, params.as_slice()) {
            (_, []) => {}
            (TypeDecl::Number { precision, .. }, [p]) => *precision = *p,
            (TypeDecl::Number { precision, scale }, [p, s]) => {
                *precision = *p;
                *scale = *s;
            }
            (TypeDecl::Timestamp { precision, .. }, [p]) => *precision = *p,
            (TypeDecl::Char { length } | TypeDecl::NChar { length }, [n])
            | (
                TypeDecl::Varchar2 { max_length: length } | TypeDecl::NVarchar2 { max_length: length },
                [n],
            ) => *length = *n as usize,
            _ => return Err(invalid()),
        }

        if let TypeDecl::Timestamp {
            with_time_zone: tz, ..
        } = &mut decl
        {
            *tz = with_time_zone;
        }

        Ok(decl)
    }
}

// ============================================================================
// Tests
// ============================================================================
