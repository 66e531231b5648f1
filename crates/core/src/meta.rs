//! Table metadata attached to captured images
//!
//! Column and index definitions are owned by a metadata cache outside this
//! crate and shared into images by `Arc`. Metadata is advisory at runtime
//! and never serialized: the payload carries per-field role tags instead,
//! so a decoded image is self-describing without it.

use crate::types::SqlType;
use serde::{Deserialize, Serialize};

/// Classification of an index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IndexType {
    /// The table's primary key
    Primary,
    /// A unique secondary index
    Unique,
    /// Any other index
    Normal,
}

/// One column definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnMeta {
    /// Column name as reported by the driver
    pub column_name: String,
    /// Declared SQL type
    pub data_type: SqlType,
}

/// One index definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexMeta {
    /// Index name
    pub name: String,
    /// Covered columns, in index order
    pub columns: Vec<String>,
    /// Index classification
    pub index_type: IndexType,
}

/// Column and index definitions for one table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableMeta {
    /// Table name
    pub table_name: String,
    /// All columns, in catalog order
    pub columns: Vec<ColumnMeta>,
    /// All indexes
    pub indexes: Vec<IndexMeta>,
}

impl TableMeta {
    /// Create metadata for a table with no known columns yet.
    pub fn new(table_name: impl Into<String>) -> Self {
        TableMeta {
            table_name: table_name.into(),
            columns: Vec::new(),
            indexes: Vec::new(),
        }
    }

    /// Look up a column by name (ASCII-case-insensitive).
    pub fn column(&self, name: &str) -> Option<&ColumnMeta> {
        self.columns
            .iter()
            .find(|c| c.column_name.eq_ignore_ascii_case(name))
    }

    /// The primary-key index, if the table has one.
    pub fn primary_key_index(&self) -> Option<&IndexMeta> {
        self.indexes
            .iter()
            .find(|i| i.index_type == IndexType::Primary)
    }

    /// Names of the primary-key columns, in index order.
    pub fn primary_key_columns(&self) -> Vec<&str> {
        self.primary_key_index()
            .map(|i| i.columns.iter().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// Whether `name` is one of the primary-key columns.
    pub fn is_primary_key_column(&self, name: &str) -> bool {
        self.primary_key_columns()
            .iter()
            .any(|c| c.eq_ignore_ascii_case(name))
    }
}
