//! Row images: sealed snapshots of table rows
//!
//! A `RowImage` is the snapshot a mutating statement captures before or
//! after it runs. Images are produced once and never mutated afterwards;
//! the consistency of rollback compensation depends on that.
//!
//! An image may hold zero rows (the statement matched nothing). An empty
//! image is distinct from an absent one: the undo record keeps absent
//! sides as `Option::None`.
//!
//! Table metadata rides along as a shared `Arc` for capture-side callers
//! and is dropped on serialization. The per-field key-role tags stay in
//! the payload, so a decoded image can still render lock keys.

use crate::meta::TableMeta;
use crate::row::{Field, Row};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Sealed snapshot of zero or more rows of one table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RowImage {
    table_name: String,
    #[serde(skip)]
    table_meta: Option<Arc<TableMeta>>,
    rows: Vec<Row>,
}

impl RowImage {
    /// Seal captured rows into an image.
    pub fn new(table_name: impl Into<String>, rows: Vec<Row>) -> Self {
        RowImage {
            table_name: table_name.into(),
            table_meta: None,
            rows,
        }
    }

    /// An image with no rows for the table described by `meta`.
    ///
    /// This is the canonical "statement matched nothing" snapshot.
    pub fn empty(meta: Arc<TableMeta>) -> Self {
        RowImage {
            table_name: meta.table_name.clone(),
            table_meta: Some(meta),
            rows: Vec::new(),
        }
    }

    /// Attach shared table metadata.
    pub fn with_meta(mut self, meta: Arc<TableMeta>) -> Self {
        self.table_meta = Some(meta);
        self
    }

    /// Name of the captured table.
    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    /// Shared metadata, when the image still carries it.
    ///
    /// Always `None` after a decode; metadata never crosses the wire.
    pub fn table_meta(&self) -> Option<&Arc<TableMeta>> {
        self.table_meta.as_ref()
    }

    /// Captured rows in capture order.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Number of captured rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Whether the image holds no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Primary-key fields per row, in capture order.
    pub fn pk_fields_per_row(&self) -> Vec<Vec<&Field>> {
        self.rows.iter().map(|r| r.primary_key_fields()).collect()
    }

    /// Render the coordinator lock key for the captured rows.
    ///
    /// Format: `table:pk1[_pk2],pkA[_pkB]` with key columns of one row
    /// joined by `_` and rows joined by `,`. Rows without primary-key
    /// fields contribute nothing; returns `None` when no row does.
    pub fn lock_key(&self) -> Option<String> {
        let signatures: Vec<String> = self.rows.iter().filter_map(|r| r.pk_signature()).collect();
        if signatures.is_empty() {
            return None;
        }
        Some(format!("{}:{}", self.table_name, signatures.join(",")))
    }
}
