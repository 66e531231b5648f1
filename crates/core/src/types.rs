//! Declared SQL type codes and statement/field classification tags
//!
//! This module defines:
//! - SqlType: vendor-standard integer type codes for declared column types
//! - KeyType: primary-key role tag carried by captured fields
//! - SqlKind: statement kind driving undo capture and lock routing
//!
//! ## Type Codes
//!
//! `SqlType` uses the standard vendor type numbers (BIT = -7, VARCHAR = 12,
//! TIMESTAMP = 93, ...) so that snapshots taken against one driver decode
//! identically everywhere. Unknown codes are preserved verbatim through
//! `SqlType::Other`, which makes the i32 conversion total in both
//! directions: decoding can never fail on a type code.

use serde::{Deserialize, Serialize};

/// Declared SQL column type.
///
/// Serialized as the raw i32 vendor code. The `Other` variant carries any
/// unrecognized code unchanged, so round-trips never lose or reject a code.
///
/// Note: `Other(c)` where `c` is a known code normalizes to the named
/// variant when it comes back through `from(i32)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "i32", from = "i32")]
pub enum SqlType {
    /// BIT (-7)
    Bit,
    /// TINYINT (-6)
    TinyInt,
    /// SMALLINT (5)
    SmallInt,
    /// INTEGER (4)
    Integer,
    /// BIGINT (-5)
    BigInt,
    /// FLOAT (6)
    Float,
    /// REAL (7)
    Real,
    /// DOUBLE (8)
    Double,
    /// NUMERIC (2)
    Numeric,
    /// DECIMAL (3)
    Decimal,
    /// CHAR (1)
    Char,
    /// VARCHAR (12)
    Varchar,
    /// LONGVARCHAR (-1)
    LongVarchar,
    /// DATE (91)
    Date,
    /// TIME (92)
    Time,
    /// TIMESTAMP (93)
    Timestamp,
    /// BINARY (-2)
    Binary,
    /// VARBINARY (-3)
    Varbinary,
    /// LONGVARBINARY (-4)
    LongVarbinary,
    /// NULL (0)
    Null,
    /// BOOLEAN (16)
    Boolean,
    /// BLOB (2004)
    Blob,
    /// CLOB (2005)
    Clob,
    /// Any code not named above, preserved verbatim
    Other(i32),
}

impl SqlType {
    /// The vendor-standard integer code for this type.
    pub const fn code(&self) -> i32 {
        match self {
            SqlType::Bit => -7,
            SqlType::TinyInt => -6,
            SqlType::SmallInt => 5,
            SqlType::Integer => 4,
            SqlType::BigInt => -5,
            SqlType::Float => 6,
            SqlType::Real => 7,
            SqlType::Double => 8,
            SqlType::Numeric => 2,
            SqlType::Decimal => 3,
            SqlType::Char => 1,
            SqlType::Varchar => 12,
            SqlType::LongVarchar => -1,
            SqlType::Date => 91,
            SqlType::Time => 92,
            SqlType::Timestamp => 93,
            SqlType::Binary => -2,
            SqlType::Varbinary => -3,
            SqlType::LongVarbinary => -4,
            SqlType::Null => 0,
            SqlType::Boolean => 16,
            SqlType::Blob => 2004,
            SqlType::Clob => 2005,
            SqlType::Other(code) => *code,
        }
    }

    /// Whether this is a temporal type (DATE, TIME, TIMESTAMP).
    pub const fn is_temporal(&self) -> bool {
        matches!(self, SqlType::Date | SqlType::Time | SqlType::Timestamp)
    }
}

impl From<i32> for SqlType {
    fn from(code: i32) -> Self {
        match code {
            -7 => SqlType::Bit,
            -6 => SqlType::TinyInt,
            5 => SqlType::SmallInt,
            4 => SqlType::Integer,
            -5 => SqlType::BigInt,
            6 => SqlType::Float,
            7 => SqlType::Real,
            8 => SqlType::Double,
            2 => SqlType::Numeric,
            3 => SqlType::Decimal,
            1 => SqlType::Char,
            12 => SqlType::Varchar,
            -1 => SqlType::LongVarchar,
            91 => SqlType::Date,
            92 => SqlType::Time,
            93 => SqlType::Timestamp,
            -2 => SqlType::Binary,
            -3 => SqlType::Varbinary,
            -4 => SqlType::LongVarbinary,
            0 => SqlType::Null,
            16 => SqlType::Boolean,
            2004 => SqlType::Blob,
            2005 => SqlType::Clob,
            other => SqlType::Other(other),
        }
    }
}

impl From<SqlType> for i32 {
    fn from(t: SqlType) -> Self {
        t.code()
    }
}

/// Role of a captured field within its row.
///
/// Assigned at capture time from table metadata and immutable afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum KeyType {
    /// Part of the row's primary key
    PrimaryKey,
    /// Any non-key column
    #[default]
    Normal,
}

/// Kind of SQL statement as reported by the recognizer.
///
/// Undo records carry only the three mutating kinds; `SelectForUpdate` is
/// the row-locking read that the executor routes through the global lock
/// protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SqlKind {
    /// INSERT statement (no before-image)
    Insert,
    /// UPDATE statement (before- and after-image)
    Update,
    /// DELETE statement (no after-image)
    Delete,
    /// SELECT ... FOR UPDATE (row-locking read, no undo record)
    SelectForUpdate,
}

impl SqlKind {
    /// Whether this kind mutates rows and therefore produces an undo record.
    pub const fn is_mutation(&self) -> bool {
        matches!(self, SqlKind::Insert | SqlKind::Update | SqlKind::Delete)
    }

    /// Whether this kind takes row locks ahead of the write path.
    pub const fn is_locking_read(&self) -> bool {
        matches!(self, SqlKind::SelectForUpdate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sql_type_codes_match_vendor_numbers() {
        assert_eq!(SqlType::Bit.code(), -7);
        assert_eq!(SqlType::TinyInt.code(), -6);
        assert_eq!(SqlType::SmallInt.code(), 5);
        assert_eq!(SqlType::Integer.code(), 4);
        assert_eq!(SqlType::BigInt.code(), -5);
        assert_eq!(SqlType::Float.code(), 6);
        assert_eq!(SqlType::Real.code(), 7);
        assert_eq!(SqlType::Double.code(), 8);
        assert_eq!(SqlType::Numeric.code(), 2);
        assert_eq!(SqlType::Decimal.code(), 3);
        assert_eq!(SqlType::Char.code(), 1);
        assert_eq!(SqlType::Varchar.code(), 12);
        assert_eq!(SqlType::LongVarchar.code(), -1);
        assert_eq!(SqlType::Date.code(), 91);
        assert_eq!(SqlType::Time.code(), 92);
        assert_eq!(SqlType::Timestamp.code(), 93);
        assert_eq!(SqlType::Binary.code(), -2);
        assert_eq!(SqlType::Varbinary.code(), -3);
        assert_eq!(SqlType::LongVarbinary.code(), -4);
        assert_eq!(SqlType::Null.code(), 0);
        assert_eq!(SqlType::Boolean.code(), 16);
        assert_eq!(SqlType::Blob.code(), 2004);
        assert_eq!(SqlType::Clob.code(), 2005);
    }

    #[test]
    fn test_sql_type_from_code_roundtrip() {
        let known = [
            SqlType::Bit,
            SqlType::TinyInt,
            SqlType::SmallInt,
            SqlType::Integer,
            SqlType::BigInt,
            SqlType::Float,
            SqlType::Real,
            SqlType::Double,
            SqlType::Numeric,
            SqlType::Decimal,
            SqlType::Char,
            SqlType::Varchar,
            SqlType::LongVarchar,
            SqlType::Date,
            SqlType::Time,
            SqlType::Timestamp,
            SqlType::Binary,
            SqlType::Varbinary,
            SqlType::LongVarbinary,
            SqlType::Null,
            SqlType::Boolean,
            SqlType::Blob,
            SqlType::Clob,
        ];
        for t in known {
            assert_eq!(SqlType::from(t.code()), t);
        }
    }

    #[test]
    fn test_sql_type_unknown_code_preserved() {
        let t = SqlType::from(9999);
        assert_eq!(t, SqlType::Other(9999));
        assert_eq!(t.code(), 9999);

        let t = SqlType::from(-9999);
        assert_eq!(t, SqlType::Other(-9999));
        assert_eq!(t.code(), -9999);
    }

    #[test]
    fn test_sql_type_other_with_known_code_normalizes() {
        // Other(93) encodes to 93 and comes back as the named variant
        let code: i32 = SqlType::Other(93).into();
        assert_eq!(SqlType::from(code), SqlType::Timestamp);
    }

    #[test]
    fn test_sql_type_serializes_as_integer() {
        let json = serde_json::to_string(&SqlType::Timestamp).unwrap();
        assert_eq!(json, "93");

        let t: SqlType = serde_json::from_str("-7").unwrap();
        assert_eq!(t, SqlType::Bit);

        // Unknown code decodes without error
        let t: SqlType = serde_json::from_str("424242").unwrap();
        assert_eq!(t, SqlType::Other(424242));
    }

    #[test]
    fn test_sql_type_is_temporal() {
        assert!(SqlType::Date.is_temporal());
        assert!(SqlType::Time.is_temporal());
        assert!(SqlType::Timestamp.is_temporal());
        assert!(!SqlType::Varchar.is_temporal());
        assert!(!SqlType::Other(93).is_temporal());
    }

    #[test]
    fn test_key_type_default_is_normal() {
        assert_eq!(KeyType::default(), KeyType::Normal);
    }

    #[test]
    fn test_sql_kind_classification() {
        assert!(SqlKind::Insert.is_mutation());
        assert!(SqlKind::Update.is_mutation());
        assert!(SqlKind::Delete.is_mutation());
        assert!(!SqlKind::SelectForUpdate.is_mutation());

        assert!(SqlKind::SelectForUpdate.is_locking_read());
        assert!(!SqlKind::Update.is_locking_read());
    }

    #[test]
    fn test_sql_kind_serialization_roundtrip() {
        for kind in [
            SqlKind::Insert,
            SqlKind::Update,
            SqlKind::Delete,
            SqlKind::SelectForUpdate,
        ] {
            let bytes = bincode::serialize(&kind).unwrap();
            let back: SqlKind = bincode::deserialize(&bytes).unwrap();
            assert_eq!(kind, back);
        }
    }
}
