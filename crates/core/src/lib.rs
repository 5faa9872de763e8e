//! # Oratype Core
//!
//! Scalar type descriptors compatible with a legacy relational engine's type
//! system. Each descriptor is an immutable description of a column type: it
//! knows the engine's storage-size formula, how values of its kind are
//! validated and rendered, and how two values compare. Values themselves are
//! never materialized here; they are passed in as components or byte buffers.
//!
//! - **Numbers**: [`NumberType`] precision/scale bounds and range checks
//! - **Calendar**: [`DateType`] and [`TimestampType`] validation, formatting
//!   and time-zone aware comparison
//! - **Characters**: [`CharType`], [`NCharType`], [`Varchar2Type`] and
//!   [`NVarchar2Type`] length rules, padding and equality
//! - **Declarations**: [`TypeDecl`] parses and builds any of the above from a
//!   signature such as `NUMBER(10,2)`
//!

pub mod calendar;
pub mod character;
pub mod date;
pub mod error;
pub mod factory;
pub mod number;
pub mod timestamp;
pub mod traits;
pub mod types;

// Re-export commonly used items at crate root
pub use character::{CharType, NCharType, NVarchar2Type, Varchar2Type, unicode_length};
pub use date::{DateParts, DateType};
pub use error::{ErrorKind, TypeError, TypeResult};
pub use number::NumberType;
pub use timestamp::{TimestampParts, TimestampType};
pub use traits::{CharacterType, DataType};
pub use types::TypeDecl;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
