//! Branch undo log model
//!
//! One branch of a global transaction accumulates an undo record per
//! mutating statement. The whole collection travels as a single
//! `BranchUndoLog` payload: one atomic encode when the branch reports,
//! one atomic decode when the coordinator orders a rollback.
//!
//! Compensation replays records in reverse capture order, so a statement
//! that observed the effects of an earlier one is undone first.

use ramus_core::{RowImage, SqlKind, TableMeta};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Undo record for one mutating statement.
///
/// The before-image is absent for INSERT and the after-image is absent for
/// DELETE. For UPDATE both sides cover the same primary-key row set in the
/// same relative order; capture guarantees that and the comparator relies
/// on it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SqlUndoRecord {
    sql_kind: SqlKind,
    table_name: String,
    #[serde(skip)]
    table_meta: Option<Arc<TableMeta>>,
    before_image: Option<RowImage>,
    after_image: Option<RowImage>,
}

impl SqlUndoRecord {
    /// Create a record with explicit image sides.
    pub fn new(
        sql_kind: SqlKind,
        table_name: impl Into<String>,
        before_image: Option<RowImage>,
        after_image: Option<RowImage>,
    ) -> Self {
        SqlUndoRecord {
            sql_kind,
            table_name: table_name.into(),
            table_meta: None,
            before_image,
            after_image,
        }
    }

    /// Record for an INSERT: only the after-image exists.
    pub fn for_insert(table_name: impl Into<String>, after_image: RowImage) -> Self {
        SqlUndoRecord::new(SqlKind::Insert, table_name, None, Some(after_image))
    }

    /// Record for an UPDATE: both images exist.
    pub fn for_update(
        table_name: impl Into<String>,
        before_image: RowImage,
        after_image: RowImage,
    ) -> Self {
        SqlUndoRecord::new(
            SqlKind::Update,
            table_name,
            Some(before_image),
            Some(after_image),
        )
    }

    /// Record for a DELETE: only the before-image exists.
    pub fn for_delete(table_name: impl Into<String>, before_image: RowImage) -> Self {
        SqlUndoRecord::new(SqlKind::Delete, table_name, Some(before_image), None)
    }

    /// Attach shared table metadata for capture-side callers.
    pub fn with_meta(mut self, meta: Arc<TableMeta>) -> Self {
        self.table_meta = Some(meta);
        self
    }

    /// Statement kind that produced this record.
    pub fn sql_kind(&self) -> SqlKind {
        self.sql_kind
    }

    /// Table the statement mutated.
    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    /// Shared metadata, when still attached. Never survives a decode.
    pub fn table_meta(&self) -> Option<&Arc<TableMeta>> {
        self.table_meta.as_ref()
    }

    /// Snapshot taken before the statement ran, if the kind has one.
    pub fn before_image(&self) -> Option<&RowImage> {
        self.before_image.as_ref()
    }

    /// Snapshot taken after the statement ran, if the kind has one.
    pub fn after_image(&self) -> Option<&RowImage> {
        self.after_image.as_ref()
    }
}

/// The undo log of one branch.
///
/// `Default` yields the empty sentinel: no xid, branch id 0, no records.
/// That is exactly what `UndoLogCodec::default_content` encodes and what
/// decoding it yields back.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BranchUndoLog {
    xid: Option<String>,
    branch_id: i64,
    records: Option<Vec<SqlUndoRecord>>,
}

impl BranchUndoLog {
    /// Create a log for a registered branch.
    pub fn new(xid: impl Into<String>, branch_id: i64) -> Self {
        BranchUndoLog {
            xid: Some(xid.into()),
            branch_id,
            records: None,
        }
    }

    /// Create a log with records already captured.
    pub fn with_records(
        xid: impl Into<String>,
        branch_id: i64,
        records: Vec<SqlUndoRecord>,
    ) -> Self {
        BranchUndoLog {
            xid: Some(xid.into()),
            branch_id,
            records: Some(records),
        }
    }

    /// Global transaction id this branch belongs to, if bound.
    pub fn xid(&self) -> Option<&str> {
        self.xid.as_deref()
    }

    /// Coordinator-assigned branch id, 0 for the empty sentinel.
    pub fn branch_id(&self) -> i64 {
        self.branch_id
    }

    /// Captured records in capture order, if any.
    pub fn records(&self) -> Option<&[SqlUndoRecord]> {
        self.records.as_deref()
    }

    /// Append a record in capture order.
    pub fn push_record(&mut self, record: SqlUndoRecord) {
        self.records.get_or_insert_with(Vec::new).push(record);
    }

    /// Records in the order compensation must replay them: newest first.
    pub fn rollback_order(&self) -> impl Iterator<Item = &SqlUndoRecord> {
        self.records.as_deref().unwrap_or(&[]).iter().rev()
    }

    /// Whether this log is the empty sentinel.
    pub fn is_empty(&self) -> bool {
        self.xid.is_none() && self.branch_id == 0 && self.records.is_none()
    }
}
