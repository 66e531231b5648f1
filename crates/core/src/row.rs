//! Captured fields and rows
//!
//! A `Field` is one cell of a captured row: column name, declared SQL type,
//! primary-key role, and the captured value. A `Row` is the ordered list of
//! fields captured for one table row.
//!
//! Name and role are fixed at construction. The value can still be
//! reassigned while the row is being assembled; once rows are sealed into a
//! row image no mutating access remains.

use crate::types::{KeyType, SqlType};
use crate::value::FieldValue;
use serde::{Deserialize, Serialize};

/// One captured cell: column name, declared type, key role, value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    name: String,
    value_type: SqlType,
    key_type: KeyType,
    value: FieldValue,
}

impl Field {
    /// Create a field with an explicit key role.
    pub fn new(
        name: impl Into<String>,
        value_type: SqlType,
        key_type: KeyType,
        value: FieldValue,
    ) -> Self {
        Field {
            name: name.into(),
            value_type,
            key_type,
            value,
        }
    }

    /// Create a non-key field.
    pub fn normal(name: impl Into<String>, value_type: SqlType, value: FieldValue) -> Self {
        Field::new(name, value_type, KeyType::Normal, value)
    }

    /// Create a primary-key field.
    pub fn primary_key(name: impl Into<String>, value_type: SqlType, value: FieldValue) -> Self {
        Field::new(name, value_type, KeyType::PrimaryKey, value)
    }

    /// Column name as captured.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared SQL type of the column.
    pub fn value_type(&self) -> SqlType {
        self.value_type
    }

    /// Key role of this field.
    pub fn key_type(&self) -> KeyType {
        self.key_type
    }

    /// Whether this field is part of the row's primary key.
    pub fn is_primary_key(&self) -> bool {
        self.key_type == KeyType::PrimaryKey
    }

    /// The captured value.
    pub fn value(&self) -> &FieldValue {
        &self.value
    }

    /// Reassign the captured value.
    ///
    /// Only reachable while the owning row is still being assembled; sealed
    /// images expose no `&mut Field`.
    pub fn set_value(&mut self, value: FieldValue) {
        self.value = value;
    }
}

/// One captured table row: fields in capture order.
///
/// A row with zero fields is valid; it stands for a row that vanished
/// between capture points.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Row {
    fields: Vec<Field>,
}

impl Row {
    /// Create an empty row.
    pub fn new() -> Self {
        Row { fields: Vec::new() }
    }

    /// Create a row from already-captured fields.
    pub fn with_fields(fields: Vec<Field>) -> Self {
        Row { fields }
    }

    /// Append a captured field.
    pub fn add(&mut self, field: Field) {
        self.fields.push(field);
    }

    /// All fields in capture order.
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Look up a field by column name.
    ///
    /// Lookup is ASCII-case-insensitive, matching SQL identifier semantics.
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields
            .iter()
            .find(|f| f.name.eq_ignore_ascii_case(name))
    }

    /// Mutable lookup by column name, for value reassignment during capture.
    pub fn field_mut(&mut self, name: &str) -> Option<&mut Field> {
        self.fields
            .iter_mut()
            .find(|f| f.name.eq_ignore_ascii_case(name))
    }

    /// The primary-key fields, in capture order.
    pub fn primary_key_fields(&self) -> Vec<&Field> {
        self.fields.iter().filter(|f| f.is_primary_key()).collect()
    }

    /// Rendered primary-key value tuple, parts joined by `_`.
    ///
    /// This is the per-row building block of coordinator lock keys. Returns
    /// `None` when the row carries no primary-key fields.
    pub fn pk_signature(&self) -> Option<String> {
        let pks = self.primary_key_fields();
        if pks.is_empty() {
            return None;
        }
        let parts: Vec<String> = pks.iter().map(|f| f.value().to_string()).collect();
        Some(parts.join("_"))
    }

    /// Number of fields in this row.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether this row has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
