//! Core traits for type descriptors
//!
//! [`DataType`] is the contract every descriptor implements; a registry or
//! any other polymorphic consumer only ever needs this capability set.
//! [`CharacterType`] layers the shared length, padding and equality rules of
//! the character family on top of it.

use crate::character::{PADDING_CHAR, trim_padding};
use crate::error::{TypeError, TypeResult};
use std::any::Any;
use std::fmt;

// ============================================================================
// DataType Trait
// ============================================================================

/// Common capability set of every type descriptor
///
/// All methods are pure functions of the descriptor's own configuration.
///
/// # Example
///
/// ```rust
/// use oratype_core::{DataType, NumberType};
///
/// let ty: Box<dyn DataType> = Box::new(NumberType::new(10, 2, true).unwrap());
/// assert_eq!(ty.name(), "NUMBER(10,2)");
/// assert_eq!(ty.storage_size(), 6);
///
/// let copy = ty.clone();
/// assert_eq!(copy.name(), ty.name());
/// ```
pub trait DataType: fmt::Debug + Send + Sync + Any {
    /// Canonical textual type signature, e.g. `NUMBER(10,2)`
    fn name(&self) -> String;

    /// On-disk size in bytes, following the engine's formula for this type
    fn storage_size(&self) -> usize;

    /// Whether the column accepts NULL
    fn is_nullable(&self) -> bool;

    /// Independent copy with identical configuration
    fn clone_box(&self) -> Box<dyn DataType>;

    /// Access to the concrete descriptor for downcasting
    fn as_any(&self) -> &dyn Any;
}

impl Clone for Box<dyn DataType> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

impl fmt::Display for dyn DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

// ============================================================================
// CharacterType Trait
// ============================================================================

/// Shared rules of the fixed and variable length character types
///
/// Implementors only say how a value is measured and whether it is
/// blank-padded; validation, formatting and equality follow from that.
pub trait CharacterType: DataType {
    /// Declared length, in the units returned by [`measure`](Self::measure)
    fn declared_length(&self) -> usize;

    /// Length of `value` in this type's units (bytes or codepoints)
    fn measure(&self, value: &[u8]) -> usize;

    /// Whether values are right-padded with spaces to the declared length
    fn is_blank_padded(&self) -> bool;

    /// Check if `value` fits the declared length
    fn fits(&self, value: &[u8]) -> bool {
        self.measure(value) <= self.declared_length()
    }

    /// Render `value` the way the engine stores it
    ///
    /// Blank-padded types are padded with spaces up to the declared length;
    /// the others return the value unchanged.
    fn format_text(&self, value: &str) -> TypeResult<String> {
        let length = self.measure(value.as_bytes());
        let max = self.declared_length();
        if length > max {
            tracing::debug!(type_name = %self.name(), length, max, "value exceeds declared length");
            return Err(TypeError::too_long(self.name(), length, max));
        }

        if !self.is_blank_padded() {
            return Ok(value.to_string());
        }

        let mut formatted = String::with_capacity(value.len() + (max - length));
        formatted.push_str(value);
        formatted.extend(std::iter::repeat_n(PADDING_CHAR, max - length));
        Ok(formatted)
    }

    /// Compare two values with this type's equality semantics
    ///
    /// Blank-padded types ignore trailing spaces; the others compare exactly.
    fn values_equal(&self, a: &[u8], b: &[u8]) -> bool {
        if self.is_blank_padded() {
            trim_padding(a) == trim_padding(b)
        } else {
            a == b
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CharType, DateType, NVarchar2Type, NumberType, TimestampType, Varchar2Type};

    fn catalog() -> Vec<Box<dyn DataType>> {
        vec![
            Box::new(NumberType::new(10, 2, true).unwrap()),
            Box::new(DateType::new(false)),
            Box::new(TimestampType::new(6, true, true)),
            Box::new(CharType::new(10, false).unwrap()),
            Box::new(NVarchar2Type::new(100, true).unwrap()),
        ]
    }

    #[test]
    fn test_boxed_clone_preserves_configuration() {
        for ty in catalog() {
            let copy = ty.clone();
            assert_eq!(copy.name(), ty.name());
            assert_eq!(copy.storage_size(), ty.storage_size());
            assert_eq!(copy.is_nullable(), ty.is_nullable());
        }
    }

    #[test]
    fn test_downcast_clone() {
        let original = NumberType::new(10, 2, true).unwrap();
        let cloned = original.clone_box();

        let number = cloned
            .as_any()
            .downcast_ref::<NumberType>()
            .expect("clone should be a NumberType");
        assert_eq!(number.precision(), original.precision());
        assert_eq!(number.scale(), original.scale());
        assert_eq!(number.is_nullable(), original.is_nullable());
        assert!(cloned.as_any().downcast_ref::<DateType>().is_none());
    }

    #[test]
    fn test_display_uses_name() {
        let ty: Box<dyn DataType> = Box::new(TimestampType::new(6, true, true));
        assert_eq!(ty.to_string(), "TIMESTAMP WITH TIME ZONE");
    }

    #[test]
    fn test_character_trait_objects() {
        let fixed: Box<dyn CharacterType> = Box::new(CharType::new(5, true).unwrap());
        let variable: Box<dyn CharacterType> = Box::new(Varchar2Type::new(5, true).unwrap());

        assert_eq!(fixed.format_text("ab").unwrap(), "ab   ");
        assert_eq!(variable.format_text("ab").unwrap(), "ab");

        assert!(fixed.values_equal(b"ab", b"ab   "));
        assert!(!variable.values_equal(b"ab", b"ab   "));

        assert!(fixed.format_text("abcdef").unwrap_err().is_invalid_value());
        assert!(!variable.fits(b"abcdef"));
    }
}
