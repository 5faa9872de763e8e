//! Character types: CHAR, NCHAR, VARCHAR2 and NVARCHAR2
//!
//! `CHAR` and `VARCHAR2` measure values in bytes; `NCHAR` and `NVARCHAR2`
//! measure in Unicode codepoints and are stored two bytes per character.
//! The fixed-length types are blank-padded and compare ignoring trailing
//! spaces; the variable-length types store and compare values as given.

use crate::error::{TypeError, TypeResult};
use crate::traits::{CharacterType, DataType};
use std::any::Any;

/// Character used to pad fixed-length values
pub const PADDING_CHAR: char = ' ';

/// Number of codepoints in `value`
///
/// Input that is not valid UTF-8 falls back to its byte length.
pub fn unicode_length(value: impl AsRef<[u8]>) -> usize {
    let bytes = value.as_ref();
    match std::str::from_utf8(bytes) {
        Ok(text) => text.chars().count(),
        Err(_) => bytes.len(),
    }
}

/// `value` without its trailing padding
pub(crate) fn trim_padding(value: &[u8]) -> &[u8] {
    let end = value
        .iter()
        .rposition(|&b| b != PADDING_CHAR as u8)
        .map_or(0, |idx| idx + 1);
    &value[..end]
}

fn check_length(type_name: &str, length: usize, max: usize) -> TypeResult<()> {
    if length == 0 {
        return Err(TypeError::invalid_parameter(
            type_name,
            "Length must be greater than 0",
        ));
    }
    if length > max {
        return Err(TypeError::invalid_parameter(
            type_name,
            format!("Length cannot exceed {}", max),
        ));
    }
    Ok(())
}

/// Implements the descriptor contract and the value operations shared by
/// every member of the family.
macro_rules! character_type {
    ($ty:ident, $keyword:literal, $field:ident, bytes_per_char = $bytes:literal) => {
        impl $ty {
            /// Check if `value` fits the declared length
            pub fn is_valid_value(&self, value: impl AsRef<[u8]>) -> bool {
                self.fits(value.as_ref())
            }

            /// Render `value` the way the engine stores it
            pub fn format_value(&self, value: &str) -> TypeResult<String> {
                self.format_text(value)
            }
        }

        impl DataType for $ty {
            fn name(&self) -> String {
                format!(concat!($keyword, "({})"), self.$field)
            }

            fn storage_size(&self) -> usize {
                self.$field * $bytes
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
    };
}

// ============================================================================
// CHAR
// ============================================================================

/// Fixed-length, blank-padded character type measured in bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CharType {
    nullable: bool,
    length: usize,
}

impl CharType {
    pub const MAX_LENGTH: usize = 2000;
    pub const DEFAULT_LENGTH: usize = 1;

    /// Create a `CHAR(length)` descriptor, `length` in `1..=2000`
    pub fn new(length: usize, nullable: bool) -> TypeResult<Self> {
        check_length("CHAR", length, Self::MAX_LENGTH)?;
        Ok(Self { nullable, length })
    }

    pub fn length(&self) -> usize {
        self.length
    }

    /// Equality ignoring trailing spaces on both sides
    pub fn compare_values(a: impl AsRef<[u8]>, b: impl AsRef<[u8]>) -> bool {
        trim_padding(a.as_ref()) == trim_padding(b.as_ref())
    }
}

impl Default for CharType {
    fn default() -> Self {
        Self {
            nullable: true,
            length: Self::DEFAULT_LENGTH,
        }
    }
}

impl CharacterType for CharType {
    fn declared_length(&self) -> usize {
        self.length
    }

    fn measure(&self, value: &[u8]) -> usize {
        value.len()
    }

    fn is_blank_padded(&self) -> bool {
        true
    }
}

character_type!(CharType, "CHAR", length, bytes_per_char = 1);

// ============================================================================
// NCHAR
// ============================================================================

/// Fixed-length, blank-padded Unicode character type measured in codepoints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NCharType {
    nullable: bool,
    length: usize,
}

impl NCharType {
    pub const MAX_LENGTH: usize = 1000;
    pub const DEFAULT_LENGTH: usize = 1;

    /// Create an `NCHAR(length)` descriptor, `length` in `1..=1000`
    pub fn new(length: usize, nullable: bool) -> TypeResult<Self> {
        check_length("NCHAR", length, Self::MAX_LENGTH)?;
        Ok(Self { nullable, length })
    }

    pub fn length(&self) -> usize {
        self.length
    }

    /// Equality ignoring trailing spaces on both sides
    pub fn compare_values(a: impl AsRef<[u8]>, b: impl AsRef<[u8]>) -> bool {
        trim_padding(a.as_ref()) == trim_padding(b.as_ref())
    }
}

impl Default for NCharType {
    fn default() -> Self {
        Self {
            nullable: true,
            length: Self::DEFAULT_LENGTH,
        }
    }
}

impl CharacterType for NCharType {
    fn declared_length(&self) -> usize {
        self.length
    }

    fn measure(&self, value: &[u8]) -> usize {
        unicode_length(value)
    }

    fn is_blank_padded(&self) -> bool {
        true
    }
}

character_type!(NCharType, "NCHAR", length, bytes_per_char = 2);

// ============================================================================
// VARCHAR2
// ============================================================================

/// Variable-length character type measured in bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Varchar2Type {
    nullable: bool,
    max_length: usize,
}

impl Varchar2Type {
    pub const MAX_LENGTH: usize = 4000;

    /// Create a `VARCHAR2(max_length)` descriptor, `max_length` in `1..=4000`
    pub fn new(max_length: usize, nullable: bool) -> TypeResult<Self> {
        check_length("VARCHAR2", max_length, Self::MAX_LENGTH)?;
        Ok(Self {
            nullable,
            max_length,
        })
    }

    pub fn max_length(&self) -> usize {
        self.max_length
    }

    /// Exact equality; trailing spaces are significant
    pub fn compare_values(a: impl AsRef<[u8]>, b: impl AsRef<[u8]>) -> bool {
        a.as_ref() == b.as_ref()
    }
}

impl Default for Varchar2Type {
    fn default() -> Self {
        Self {
            nullable: true,
            max_length: Self::MAX_LENGTH,
        }
    }
}

impl CharacterType for Varchar2Type {
    fn declared_length(&self) -> usize {
        self.max_length
    }

    fn measure(&self, value: &[u8]) -> usize {
        value.len()
    }

    fn is_blank_padded(&self) -> bool {
        false
    }
}

character_type!(Varchar2Type, "VARCHAR2", max_length, bytes_per_char = 1);

// ============================================================================
// NVARCHAR2
// ============================================================================

/// Variable-length Unicode character type measured in codepoints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NVarchar2Type {
    nullable: bool,
    max_length: usize,
}

impl NVarchar2Type {
    pub const MAX_LENGTH: usize = 4000;

    /// Create an `NVARCHAR2(max_length)` descriptor, `max_length` in `1..=4000`
    pub fn new(max_length: usize, nullable: bool) -> TypeResult<Self> {
        check_length("NVARCHAR2", max_length, Self::MAX_LENGTH)?;
        Ok(Self {
            nullable,
            max_length,
        })
    }

    pub fn max_length(&self) -> usize {
        self.max_length
    }

    /// Exact equality; trailing spaces are significant
    pub fn compare_values(a: impl AsRef<[u8]>, b: impl AsRef<[u8]>) -> bool {
        a.as_ref() == b.as_ref()
    }
}

impl Default for NVarchar2Type {
    fn default() -> Self {
        Self {
            nullable: true,
            max_length: Self::MAX_LENGTH,
        }
    }
}

impl CharacterType for NVarchar2Type {
    fn declared_length(&self) -> usize {
        self.max_length
    }

    fn measure(&self, value: &[u8]) -> usize {
        unicode_length(value)
    }

    fn is_blank_padded(&self) -> bool {
        false
    }
}

character_type!(NVarchar2Type, "NVARCHAR2", max_length, bytes_per_char = 2);

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_unicode_length() {
        let cases = [
            ("Hello", 5),
            ("こんにちは", 5),
            ("αβγδε", 5),
            ("Hello こんにちは", 11),
            ("🌟⭐✨", 3),
            ("", 0),
        ];
        for (value, expected) in cases {
            assert_eq!(unicode_length(value), expected, "{}", value);
        }
    }

    #[test]
    fn test_unicode_length_falls_back_on_malformed_input() {
        assert_eq!(unicode_length(b"ab\xffcd"), 5);
        // Truncated three-byte sequence
        assert_eq!(unicode_length(b"\xe3\x81"), 2);
    }

    #[test]
    fn test_trim_padding() {
        assert_eq!(trim_padding(b"ab  "), b"ab");
        assert_eq!(trim_padding(b"   "), b"");
        assert_eq!(trim_padding(b" ab"), b" ab");
        assert_eq!(trim_padding(b""), b"");
    }

    // CHAR

    #[test]
    fn test_char_descriptor() {
        let char_type = CharType::new(10, true).unwrap();
        assert_eq!(char_type.length(), 10);
        assert!(char_type.is_nullable());
        assert_eq!(char_type.name(), "CHAR(10)");
        assert_eq!(char_type.storage_size(), 10);
        assert_eq!(CharType::default().name(), "CHAR(1)");
    }

    #[test]
    fn test_char_invalid_length() {
        for length in [0, CharType::MAX_LENGTH + 1] {
            let err = CharType::new(length, true).unwrap_err();
            assert!(err.is_invalid_parameter(), "length={}", length);
        }
        assert!(CharType::new(CharType::MAX_LENGTH, true).is_ok());
    }

    #[test]
    fn test_char_format_pads() {
        let char_type = CharType::new(5, true).unwrap();
        let cases = [("", "     "), ("ab", "ab   "), ("abcde", "abcde")];
        for (input, expected) in cases {
            assert_eq!(char_type.format_value(input).unwrap(), expected);
        }
    }

    #[test]
    fn test_char_format_is_idempotent() {
        let char_type = CharType::new(8, true).unwrap();
        let once = char_type.format_value("abc").unwrap();
        let twice = char_type.format_value(&once).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_char_format_length_for_all_declared_lengths() {
        for length in [1, 2, 7, 100, 2000] {
            let char_type = CharType::new(length, true).unwrap();
            assert_eq!(char_type.format_value("x").unwrap().len(), length);
            let too_long = "y".repeat(length + 1);
            assert!(char_type.format_value(&too_long).is_err());
        }
    }

    #[test]
    fn test_char_format_too_long() {
        let char_type = CharType::new(3, true).unwrap();
        let err = char_type.format_value("abcd").unwrap_err();
        assert_eq!(err, TypeError::too_long("CHAR(3)", 4, 3));
    }

    #[test]
    fn test_char_measures_bytes() {
        let char_type = CharType::new(5, true).unwrap();
        assert!(char_type.is_valid_value("abcde"));
        assert!(!char_type.is_valid_value("abcdef"));
        // Two codepoints, six bytes
        assert!(!char_type.is_valid_value("日本"));
    }

    #[test]
    fn test_char_compare_values() {
        let cases = [
            ("abc", "abc   ", true),
            ("abc  ", "abc", true),
            ("abc", "abd", false),
            (" abc", "abc", false),
            ("", "    ", true),
        ];
        for (a, b, expected) in cases {
            assert_eq!(CharType::compare_values(a, b), expected, "{:?} vs {:?}", a, b);
        }
    }

    #[test]
    fn test_char_compare_round_trip() {
        let char_type = CharType::new(10, true).unwrap();
        for value in ["", "a", "abc  ", "abcdefghij"] {
            let formatted = char_type.format_value(value).unwrap();
            assert!(CharType::compare_values(value, &formatted));
        }
    }

    // NCHAR

    #[test]
    fn test_nchar_descriptor() {
        let nchar = NCharType::new(10, true).unwrap();
        assert_eq!(nchar.length(), 10);
        assert_eq!(nchar.name(), "NCHAR(10)");
        assert_eq!(nchar.storage_size(), 20);
        assert!(NCharType::new(0, true).is_err());
        assert!(NCharType::new(NCharType::MAX_LENGTH + 1, true).is_err());
    }

    #[test]
    fn test_nchar_format_pads_codepoints() {
        let nchar = NCharType::new(5, true).unwrap();
        for input in ["", "あ", "あいう", "あいうえお"] {
            let formatted = nchar.format_value(input).unwrap();
            assert_eq!(unicode_length(&formatted), 5, "{}", input);
            assert!(formatted.starts_with(input));
        }
        assert_eq!(nchar.format_value("あい").unwrap(), "あい   ");
    }

    #[test]
    fn test_nchar_is_valid_value() {
        let nchar = NCharType::new(5, true).unwrap();
        let cases = [
            ("Hello", true),
            ("こんに", true),
            ("こんにちは", true),
            ("Hello World", false),
            ("こんにちはあ", false),
            ("Hello世界", false),
        ];
        for (value, expected) in cases {
            assert_eq!(nchar.is_valid_value(value), expected, "{}", value);
        }
        // Malformed input is measured in bytes
        assert!(nchar.is_valid_value(b"\xff\xff\xff\xff\xff"));
        assert!(!nchar.is_valid_value(b"\xff\xff\xff\xff\xff\xff"));
    }

    #[test]
    fn test_nchar_compare_values() {
        let cases = [
            ("こんに  ", "こんに", true),
            ("Hello", "Hello  ", true),
            ("あいうえお", "あいうえお", true),
            ("こんに", "さよな", false),
        ];
        for (a, b, expected) in cases {
            assert_eq!(NCharType::compare_values(a, b), expected);
        }
    }

    #[test]
    fn test_nchar_format_is_idempotent() {
        let nchar = NCharType::new(6, true).unwrap();
        for value in ["", "あい", "aあb", "あいうえおか"] {
            let once = nchar.format_value(value).unwrap();
            let twice = nchar.format_value(&once).unwrap();
            assert_eq!(once, twice, "{}", value);
        }
    }

    #[test]
    fn test_nchar_compare_round_trip() {
        let nchar = NCharType::new(6, true).unwrap();
        for value in ["", "あい", "あい  ", "Hello世"] {
            let formatted = nchar.format_value(value).unwrap();
            assert!(NCharType::compare_values(value, &formatted), "{}", value);
        }
    }

    // VARCHAR2

    #[test]
    fn test_varchar2_descriptor() {
        let varchar = Varchar2Type::new(200, true).unwrap();
        assert_eq!(varchar.max_length(), 200);
        assert_eq!(varchar.name(), "VARCHAR2(200)");
        assert_eq!(Varchar2Type::default().name(), "VARCHAR2(4000)");
        for size in [10, 100, 1000, 4000] {
            assert_eq!(Varchar2Type::new(size, true).unwrap().storage_size(), size);
        }
    }

    #[test]
    fn test_varchar2_invalid_length() {
        assert!(Varchar2Type::new(0, true).unwrap_err().is_invalid_parameter());
        assert!(
            Varchar2Type::new(Varchar2Type::MAX_LENGTH + 1, true)
                .unwrap_err()
                .is_invalid_parameter()
        );
    }

    #[test]
    fn test_varchar2_is_valid_value() {
        let varchar = Varchar2Type::new(5, true).unwrap();
        let cases = [
            ("", true),
            ("abc", true),
            ("12345", true),
            ("123456", false),
            ("こんにちは", false),
        ];
        for (value, expected) in cases {
            assert_eq!(varchar.is_valid_value(value), expected, "{}", value);
        }
    }

    #[test]
    fn test_varchar2_format_and_compare() {
        let varchar = Varchar2Type::new(5, true).unwrap();
        assert_eq!(varchar.format_value("ab ").unwrap(), "ab ");
        assert!(varchar.format_value("abcdef").is_err());
        assert!(Varchar2Type::compare_values("ab", "ab"));
        assert!(!Varchar2Type::compare_values("ab", "ab "));
    }

    // NVARCHAR2

    #[test]
    fn test_nvarchar2_descriptor() {
        let nvarchar = NVarchar2Type::new(100, false).unwrap();
        assert_eq!(nvarchar.max_length(), 100);
        assert!(!nvarchar.is_nullable());
        assert_eq!(nvarchar.name(), "NVARCHAR2(100)");
        assert_eq!(nvarchar.storage_size(), 200);
        assert_eq!(NVarchar2Type::default().max_length(), 4000);
        assert!(NVarchar2Type::new(0, true).is_err());
        assert!(NVarchar2Type::new(4001, true).is_err());
    }

    #[test]
    fn test_nvarchar2_does_not_pad() {
        let nvarchar = NVarchar2Type::new(5, true).unwrap();
        assert_eq!(nvarchar.format_value("こんに").unwrap(), "こんに");
        assert!(nvarchar.is_valid_value("こんにちは"));
        assert!(!nvarchar.is_valid_value("こんにちはあ"));

        let err = nvarchar.format_value("こんにちはあ").unwrap_err();
        assert!(err.is_invalid_value());
    }

    #[test]
    fn test_nvarchar2_compare_is_exact() {
        assert!(NVarchar2Type::compare_values("こんに", "こんに"));
        assert!(!NVarchar2Type::compare_values("こんに ", "こんに"));
        assert!(!NVarchar2Type::compare_values("a", "b"));
    }
}
