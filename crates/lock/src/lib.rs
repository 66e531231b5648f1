//! Global lock client layer for Ramus
//!
//! This crate carries the client side of the global row lock protocol:
//!
//! - Thread-bound transaction context (xid binding, global-lock flag)
//! - Global-lock scopes with per-scope retry policies
//! - Live-reloadable process-wide retry configuration
//! - Per-statement retry budgeting
//! - The row-locking statement executor and routing entry point
//!
//! Everything here is database-agnostic: concrete statements plug in
//! through the [`LocalStatement`] and [`SqlRecognizer`] seams.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config; // Configuration change events and listener trait
pub mod context; // Thread-bound xid and global-lock flag
pub mod error; // Execution error taxonomy
pub mod executor; // Row-locking executor and statement routing
pub mod policy; // Per-scope retry policy and its holder
pub mod retry; // Global retry policy and per-statement controller
pub mod scope; // Global-lock scope guard

// === Re-exports ===

// Context and scopes
pub use context::TxContext;
pub use policy::{LockPolicy, LockPolicyHolder};
pub use scope::{with_global_lock, GlobalLockScope};

// Retry configuration
pub use config::{
    ConfigChangeEvent, ConfigChangeListener, CLIENT_LOCK_RETRY_INTERVAL, CLIENT_LOCK_RETRY_TIMES,
};
pub use retry::{GlobalRetryPolicy, LockRetryController};

// Execution
pub use error::ExecError;
pub use executor::{
    execute_statement, LocalStatement, RecognizedStatement, RowLockExecutor, SqlRecognizer,
};
