//! Row-locking statement execution.
//!
//! [`RowLockExecutor`] wraps one locking-read statement (a
//! `SELECT ... FOR UPDATE` equivalent) and drives it through the global
//! lock protocol: attempt locally, and on a global lock conflict pause
//! through a [`LockRetryController`] and attempt again until the
//! statement succeeds or the budget runs out. [`execute_statement`] is
//! the routing entry point that decides whether a statement needs this
//! treatment at all.
//!
//! The executor is deliberately ignorant of any concrete database. The
//! statement side of the seam is [`LocalStatement`]; the parsed shape
//! of the SQL arrives through [`SqlRecognizer`].

use tracing::debug;

use ramus_core::{FieldValue, SqlKind};

use crate::context::TxContext;
use crate::error::ExecError;
use crate::retry::LockRetryController;

// ============================================================================
// Seams
// ============================================================================

/// Parsed shape of one SQL statement.
///
/// Implementations come from whatever SQL front end the integration
/// uses; the executor only needs the statement kind and target table.
pub trait SqlRecognizer {
    /// The statement kind.
    fn kind(&self) -> SqlKind;

    /// The table the statement touches.
    fn table_name(&self) -> &str;
}

/// A pre-recognized statement, for integrations that already know the
/// kind and table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecognizedStatement {
    kind: SqlKind,
    table_name: String,
}

impl RecognizedStatement {
    /// Builds a recognizer from an already-known kind and table.
    pub fn new(kind: SqlKind, table_name: impl Into<String>) -> Self {
        RecognizedStatement {
            kind,
            table_name: table_name.into(),
        }
    }
}

impl SqlRecognizer for RecognizedStatement {
    fn kind(&self) -> SqlKind {
        self.kind
    }

    fn table_name(&self) -> &str {
        &self.table_name
    }
}

/// One locally executable statement.
///
/// `execute_local` makes a single attempt: run the statement against
/// local state, take local row locks, and check the global lock for the
/// touched rows. The returned bool reports whether the required row
/// locks were acquired without conflict; integrations that surface
/// conflicts as errors may return [`ExecError::LockConflict`] instead.
/// The executor treats both channels identically. A conflicted attempt
/// must leave local state as it was before the call, because the
/// executor will retry it.
pub trait LocalStatement {
    /// Result produced by a successful attempt.
    type Output;

    /// Makes one attempt with the given statement arguments.
    fn execute_local(
        &mut self,
        args: &[FieldValue],
    ) -> Result<(Self::Output, bool), ExecError>;
}

// ============================================================================
// Row Lock Executor
// ============================================================================

/// Drives one locking-read statement through the global lock protocol.
pub struct RowLockExecutor<S, R> {
    statement: S,
    recognizer: R,
}

impl<S, R> RowLockExecutor<S, R>
where
    S: LocalStatement,
    R: SqlRecognizer,
{
    /// Pairs a statement with its recognized shape.
    pub fn new(statement: S, recognizer: R) -> Self {
        RowLockExecutor {
            statement,
            recognizer,
        }
    }

    /// Executes the statement, retrying global lock conflicts within
    /// the calling thread's retry budget.
    ///
    /// The calling thread must be inside a global transaction or a
    /// global-lock scope; otherwise [`ExecError::UnboundContext`] is
    /// returned without touching the statement. Each top-level call
    /// gets a fresh budget.
    pub fn execute(&mut self, args: &[FieldValue]) -> Result<S::Output, ExecError> {
        if !TxContext::in_global_transaction() && !TxContext::requires_global_lock() {
            return Err(ExecError::UnboundContext);
        }

        let mut retry = LockRetryController::new();
        loop {
            let conflict = match self.statement.execute_local(args) {
                Ok((output, true)) => return Ok(output),
                // Lock not obtainable, reported in-band. The executor
                // only knows the table at this point, so the synthetic
                // conflict is keyed by it.
                Ok((_, false)) => ExecError::lock_conflict(self.recognizer.table_name()),
                Err(err) if err.is_lock_conflict() => err,
                Err(other) => return Err(other),
            };

            debug!(
                table = self.recognizer.table_name(),
                "global lock conflict on locking read"
            );
            // Terminal once the budget is gone; the caller sees
            // LockWaitTimeout, never the raw conflict.
            retry.sleep(conflict)?;
        }
    }

    /// The recognized shape of the wrapped statement.
    pub fn recognizer(&self) -> &R {
        &self.recognizer
    }

    /// Releases the wrapped statement.
    pub fn into_statement(self) -> S {
        self.statement
    }
}

// ============================================================================
// Routing
// ============================================================================

/// Executes a statement, routing it by context and recognized kind.
///
/// Outside any global transaction or global-lock scope the statement
/// runs as plain local work, whatever its kind. Inside one, locking
/// reads go through a [`RowLockExecutor`]; all other kinds run plainly,
/// with their errors propagated untouched.
pub fn execute_statement<S, R>(
    recognizer: R,
    mut statement: S,
    args: &[FieldValue],
) -> Result<S::Output, ExecError>
where
    S: LocalStatement,
    R: SqlRecognizer,
{
    if !TxContext::in_global_transaction() && !TxContext::requires_global_lock() {
        return statement.execute_local(args).map(|(output, _)| output);
    }

    if recognizer.kind().is_locking_read() {
        return RowLockExecutor::new(statement, recognizer).execute(args);
    }

    statement.execute_local(args).map(|(output, _)| output)
}
