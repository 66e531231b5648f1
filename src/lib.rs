//! Ramus - Branch transaction client core for AT-mode distributed transactions
//!
//! Ramus carries the resource-manager side of an AT-mode transaction:
//! it models the before and after row images a mutation produces, keeps
//! them as branch undo logs for compensation, and drives locking reads
//! through the coordinator's global row locks with budgeted retries.
//!
//! # Quick Start
//!
//! ```ignore
//! use ramus::{execute_statement, with_global_lock, LockPolicy};
//!
//! // Protect a local transaction that races with AT branches over the
//! // same rows: statements inside the scope check global row locks and
//! // retry conflicts up to 3 times, 100ms apart.
//! let rows = with_global_lock(LockPolicy::new(100, 3), || {
//!     execute_statement(recognizer, statement, &args)
//! })?;
//! ```
//!
//! # Architecture
//!
//! Three layers make up the crate:
//!
//! - `ramus-core`: row images, field values, table metadata, timestamps
//! - `ramus-undo`: branch undo logs, image comparison, wire codecs
//! - `ramus-lock`: transaction context, retry policy, the row-locking executor
//!
//! Everything public is re-exported here; integrations depend on this
//! crate alone.

pub use ramus_core::*;
pub use ramus_lock::*;
pub use ramus_undo::*;
