//! Field value types for captured row snapshots
//!
//! This module defines:
//! - FieldValue: closed union of the cell values a snapshot can carry
//!
//! ## Value Model
//!
//! A captured cell is one of seven variants: Null, Bool, Int, Float,
//! String, Bytes, Timestamp. The set is closed so that the comparator and
//! every codec backend can match exhaustively; adding a variant is a
//! wire-format change.
//!
//! ### Equality Rules
//!
//! - Different variants are NEVER equal: `Int(1) != Float(1.0)`
//! - `Bytes` are not `String`
//! - Float uses IEEE-754 equality: `NaN != NaN`, `-0.0 == 0.0`
//! - Timestamps compare by absolute instant
//!
//! Integers are a single canonical 64-bit width, so equal numbers captured
//! from columns of different integer widths still compare equal.

use crate::timestamp::Timestamp;
use serde::{Deserialize, Serialize};

/// Value of a single captured field
///
/// ## Type Equality
///
/// Different variants are never equal, even when they render the same:
/// - `Int(1) != Float(1.0)`
/// - `Bytes(b"a") != String("a")`
///
/// Float equality follows IEEE-754 semantics:
/// - `NaN != NaN`
/// - `-0.0 == 0.0`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum FieldValue {
    /// SQL NULL
    Null,
    /// Boolean value (BIT/BOOLEAN columns)
    Bool(bool),
    /// 64-bit signed integer
    Int(i64),
    /// 64-bit floating point (IEEE-754)
    Float(f64),
    /// UTF-8 string
    String(String),
    /// Raw bytes (BINARY/BLOB columns)
    Bytes(Vec<u8>),
    /// Nanosecond-precision instant (TIMESTAMP columns)
    Timestamp(Timestamp),
}

// Custom PartialEq implementation for IEEE-754 float semantics
impl PartialEq for FieldValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (FieldValue::Null, FieldValue::Null) => true,
            (FieldValue::Bool(a), FieldValue::Bool(b)) => a == b,
            (FieldValue::Int(a), FieldValue::Int(b)) => a == b,
            // IEEE-754: NaN != NaN, -0.0 == 0.0
            (FieldValue::Float(a), FieldValue::Float(b)) => a == b,
            (FieldValue::String(a), FieldValue::String(b)) => a == b,
            (FieldValue::Bytes(a), FieldValue::Bytes(b)) => a == b,
            (FieldValue::Timestamp(a), FieldValue::Timestamp(b)) => a == b,
            // Different variants are never equal
            _ => false,
        }
    }
}

impl FieldValue {
    /// Get the variant name as a string
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldValue::Null => "Null",
            FieldValue::Bool(_) => "Bool",
            FieldValue::Int(_) => "Int",
            FieldValue::Float(_) => "Float",
            FieldValue::String(_) => "String",
            FieldValue::Bytes(_) => "Bytes",
            FieldValue::Timestamp(_) => "Timestamp",
        }
    }

    /// Check if this is SQL NULL
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    /// Get as bool if this is a Bool value
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FieldValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Get as i64 if this is an Int value
    pub fn as_int(&self) -> Option<i64> {
        match self {
            FieldValue::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Get as f64 if this is a Float value
    pub fn as_float(&self) -> Option<f64> {
        match self {
            FieldValue::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Get as &str if this is a String value
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get as &[u8] if this is a Bytes value
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            FieldValue::Bytes(b) => Some(b),
            _ => None,
        }
    }

    /// Get as Timestamp if this is a Timestamp value
    pub fn as_timestamp(&self) -> Option<Timestamp> {
        match self {
            FieldValue::Timestamp(ts) => Some(*ts),
            _ => None,
        }
    }
}

impl std::fmt::Display for FieldValue {
    /// Renders the value the way lock keys and diagnostics spell it.
    ///
    /// Bytes render as lowercase hex with an `0x` prefix so binary primary
    /// keys produce stable, separator-free key parts.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldValue::Null => write!(f, "null"),
            FieldValue::Bool(b) => write!(f, "{}", b),
            FieldValue::Int(i) => write!(f, "{}", i),
            FieldValue::Float(x) => write!(f, "{}", x),
            FieldValue::String(s) => write!(f, "{}", s),
            FieldValue::Bytes(bytes) => {
                write!(f, "0x")?;
                for b in bytes {
                    write!(f, "{:02x}", b)?;
                }
                Ok(())
            }
            FieldValue::Timestamp(ts) => write!(f, "{}", ts),
        }
    }
}

// ============================================================================
// From implementations for ergonomic construction
// ============================================================================

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::String(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::String(s)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Bool(b)
    }
}

impl From<i64> for FieldValue {
    fn from(i: i64) -> Self {
        FieldValue::Int(i)
    }
}

impl From<i32> for FieldValue {
    fn from(i: i32) -> Self {
        FieldValue::Int(i as i64)
    }
}

impl From<f64> for FieldValue {
    fn from(f: f64) -> Self {
        FieldValue::Float(f)
    }
}

impl From<f32> for FieldValue {
    fn from(f: f32) -> Self {
        FieldValue::Float(f as f64)
    }
}

impl From<Vec<u8>> for FieldValue {
    fn from(b: Vec<u8>) -> Self {
        FieldValue::Bytes(b)
    }
}

impl From<&[u8]> for FieldValue {
    fn from(b: &[u8]) -> Self {
        FieldValue::Bytes(b.to_vec())
    }
}

impl From<Timestamp> for FieldValue {
    fn from(ts: Timestamp) -> Self {
        FieldValue::Timestamp(ts)
    }
}

impl From<()> for FieldValue {
    fn from(_: ()) -> Self {
        FieldValue::Null
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    /// `None` maps to SQL NULL
    fn from(opt: Option<T>) -> Self {
        match opt {
            Some(v) => v.into(),
            None => FieldValue::Null,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_value_null() {
        let value = FieldValue::Null;
        assert!(value.is_null());
        assert_eq!(value.type_name(), "Null");
    }

    #[test]
    fn test_field_value_accessors() {
        assert_eq!(FieldValue::Bool(true).as_bool(), Some(true));
        assert_eq!(FieldValue::Int(42).as_int(), Some(42));
        assert_eq!(FieldValue::Float(2.5).as_float(), Some(2.5));
        assert_eq!(
            FieldValue::String("hello".to_string()).as_str(),
            Some("hello")
        );
        assert_eq!(
            FieldValue::Bytes(vec![1, 2, 3]).as_bytes(),
            Some([1u8, 2, 3].as_slice())
        );
        assert_eq!(
            FieldValue::Timestamp(Timestamp::from_secs(5)).as_timestamp(),
            Some(Timestamp::from_secs(5))
        );
    }

    #[test]
    fn test_as_wrong_type_returns_none() {
        let v = FieldValue::Int(42);
        assert!(v.as_bool().is_none());
        assert!(v.as_float().is_none());
        assert!(v.as_str().is_none());
        assert!(v.as_bytes().is_none());
        assert!(v.as_timestamp().is_none());
    }

    // Different variants are NEVER equal

    #[test]
    fn test_int_not_equal_float() {
        assert_ne!(FieldValue::Int(1), FieldValue::Float(1.0));
    }

    #[test]
    fn test_bytes_not_equal_string() {
        assert_ne!(
            FieldValue::Bytes(b"hello".to_vec()),
            FieldValue::String("hello".to_string())
        );
    }

    #[test]
    fn test_null_not_equal_to_other_variants() {
        assert_ne!(FieldValue::Null, FieldValue::Bool(false));
        assert_ne!(FieldValue::Null, FieldValue::Int(0));
        assert_ne!(FieldValue::Null, FieldValue::Float(0.0));
        assert_ne!(FieldValue::Null, FieldValue::String(String::new()));
        assert_ne!(FieldValue::Null, FieldValue::Bytes(vec![]));
    }

    // IEEE-754 float equality

    #[test]
    fn test_nan_not_equal_nan() {
        assert_ne!(FieldValue::Float(f64::NAN), FieldValue::Float(f64::NAN));
    }

    #[test]
    fn test_negative_zero_equals_zero() {
        assert_eq!(FieldValue::Float(-0.0), FieldValue::Float(0.0));
    }

    #[test]
    fn test_float_infinity() {
        let pos_inf = FieldValue::Float(f64::INFINITY);
        let neg_inf = FieldValue::Float(f64::NEG_INFINITY);
        assert_eq!(pos_inf, FieldValue::Float(f64::INFINITY));
        assert_ne!(pos_inf, neg_inf);
    }

    #[test]
    fn test_timestamp_equality_by_instant() {
        let a = FieldValue::Timestamp(Timestamp::from_millis(1_500));
        let b = FieldValue::Timestamp(Timestamp::from_parts(1, 500_000_000));
        assert_eq!(a, b);
    }

    #[test]
    fn test_type_name() {
        assert_eq!(FieldValue::Null.type_name(), "Null");
        assert_eq!(FieldValue::Bool(true).type_name(), "Bool");
        assert_eq!(FieldValue::Int(1).type_name(), "Int");
        assert_eq!(FieldValue::Float(1.0).type_name(), "Float");
        assert_eq!(FieldValue::String(String::new()).type_name(), "String");
        assert_eq!(FieldValue::Bytes(vec![]).type_name(), "Bytes");
        assert_eq!(
            FieldValue::Timestamp(Timestamp::EPOCH).type_name(),
            "Timestamp"
        );
    }

    // ====================================================================
    // Display rendering (lock key parts)
    // ====================================================================

    #[test]
    fn test_display_rendering() {
        assert_eq!(FieldValue::Null.to_string(), "null");
        assert_eq!(FieldValue::Bool(true).to_string(), "true");
        assert_eq!(FieldValue::Int(-7).to_string(), "-7");
        assert_eq!(FieldValue::String("id-9".to_string()).to_string(), "id-9");
        assert_eq!(FieldValue::Bytes(vec![0xde, 0xad]).to_string(), "0xdead");
    }

    // ====================================================================
    // From conversions
    // ====================================================================

    #[test]
    fn test_from_conversions() {
        assert_eq!(FieldValue::from(42i64), FieldValue::Int(42));
        assert_eq!(FieldValue::from(42i32), FieldValue::Int(42));
        assert_eq!(FieldValue::from(true), FieldValue::Bool(true));
        assert_eq!(
            FieldValue::from("abc"),
            FieldValue::String("abc".to_string())
        );
        assert_eq!(
            FieldValue::from(String::from("abc")),
            FieldValue::String("abc".to_string())
        );
        assert_eq!(
            FieldValue::from(vec![1u8, 2]),
            FieldValue::Bytes(vec![1, 2])
        );
        assert_eq!(FieldValue::from(()), FieldValue::Null);
        assert_eq!(
            FieldValue::from(Timestamp::from_secs(3)),
            FieldValue::Timestamp(Timestamp::from_secs(3))
        );
    }

    #[test]
    fn test_from_f32_preserves_value() {
        let v: FieldValue = 2.5f32.into();
        assert_eq!(v.as_float().unwrap(), 2.5);
    }

    #[test]
    fn test_from_option() {
        let some: FieldValue = Some(5i64).into();
        assert_eq!(some, FieldValue::Int(5));

        let none: FieldValue = Option::<i64>::None.into();
        assert_eq!(none, FieldValue::Null);
    }

    // ====================================================================
    // Serialization
    // ====================================================================

    #[test]
    fn test_serialization_all_variants() {
        let values = vec![
            FieldValue::Null,
            FieldValue::Bool(true),
            FieldValue::Int(42),
            FieldValue::Float(3.5),
            FieldValue::String("test".to_string()),
            FieldValue::Bytes(vec![1, 2, 3]),
            FieldValue::Timestamp(Timestamp::from_parts(2_147_483, 999_999)),
        ];

        for value in values {
            let bytes = bincode::serialize(&value).unwrap();
            let restored: FieldValue = bincode::deserialize(&bytes).unwrap();
            assert_eq!(value, restored);

            let json = serde_json::to_string(&value).unwrap();
            let restored: FieldValue = serde_json::from_str(&json).unwrap();
            assert_eq!(value, restored);
        }
    }

    #[test]
    fn test_empty_containers() {
        let s = FieldValue::String(String::new());
        assert_eq!(s.as_str(), Some(""));

        let b = FieldValue::Bytes(vec![]);
        assert_eq!(b.as_bytes(), Some([].as_slice()));
        assert_eq!(b.to_string(), "0x");
    }
}
