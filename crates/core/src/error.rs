//! Error types for the type catalog
//!
//! Construction of a descriptor fails with [`TypeError::InvalidTypeParameter`]
//! when a declared length, precision or scale is outside the engine's static
//! bounds. Formatting operations fail with [`TypeError::InvalidValue`] or
//! [`TypeError::ValueTooLong`] when handed a value the descriptor rejects.
//! Validity predicates and comparisons never produce errors.

use thiserror::Error;

/// The main error type for type descriptors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypeError {
    // ========================================================================
    // Construction Errors
    // ========================================================================
    /// A declared parameter violates the type's static bounds
    #[error("Invalid parameter for {type_name}: {message}")]
    InvalidTypeParameter { type_name: String, message: String },

    // ========================================================================
    // Value Errors
    // ========================================================================
    /// A value failed the type's runtime validity check
    #[error("Invalid value for {type_name}: {message}")]
    InvalidValue { type_name: String, message: String },

    /// A character value is longer than the declared length
    #[error("Value too long for {type_name}: length {length} exceeds maximum {max}")]
    ValueTooLong {
        type_name: String,
        length: usize,
        max: usize,
    },

    // ========================================================================
    // Declaration Errors
    // ========================================================================
    /// The type keyword of a signature is not part of the catalog
    #[error("Unknown type: '{0}'")]
    UnknownType(String),

    /// A signature names a known type but its parameter list is malformed
    #[error("Invalid type signature: '{0}'")]
    InvalidSignature(String),
}

/// Coarse classification handed to error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidTypeParameter,
    InvalidValue,
    InvalidDeclaration,
}

impl TypeError {
    /// Create an invalid type parameter error
    pub fn invalid_parameter(type_name: impl Into<String>, msg: impl Into<String>) -> Self {
        TypeError::InvalidTypeParameter {
            type_name: type_name.into(),
            message: msg.into(),
        }
    }

    /// Create an invalid value error
    pub fn invalid_value(type_name: impl Into<String>, msg: impl Into<String>) -> Self {
        TypeError::InvalidValue {
            type_name: type_name.into(),
            message: msg.into(),
        }
    }

    /// Create a value-too-long error
    pub fn too_long(type_name: impl Into<String>, length: usize, max: usize) -> Self {
        TypeError::ValueTooLong {
            type_name: type_name.into(),
            length,
            max,
        }
    }

    /// The coarse kind of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            TypeError::InvalidTypeParameter { .. } => ErrorKind::InvalidTypeParameter,
            TypeError::InvalidValue { .. } | TypeError::ValueTooLong { .. } => {
                ErrorKind::InvalidValue
            }
            TypeError::UnknownType(_) | TypeError::InvalidSignature(_) => {
                ErrorKind::InvalidDeclaration
            }
        }
    }

    /// Check if this error was raised while constructing a descriptor
    pub fn is_invalid_parameter(&self) -> bool {
        self.kind() == ErrorKind::InvalidTypeParameter
    }

    /// Check if this error was raised while formatting a value
    pub fn is_invalid_value(&self) -> bool {
        self.kind() == ErrorKind::InvalidValue
    }
}

/// Result type alias using TypeError
pub type TypeResult<T> = Result<T, TypeError>;

// ============================================================================
// Tests
// ============================================================================
