//! Error types for the locking layer.

/// Errors surfaced by statement execution under the global lock protocol.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExecError {
    /// The retry budget ran out while waiting for the global lock.
    ///
    /// Terminal: the retry loop never absorbs it. Carries the conflict
    /// that exhausted the budget as its source.
    #[error("global lock wait timed out after {attempts} attempts")]
    LockWaitTimeout {
        /// Attempts made before giving up
        attempts: u32,
        /// The conflict that exhausted the budget
        #[source]
        cause: Box<ExecError>,
    },

    /// Row-locking execution started with neither a global transaction
    /// nor a global-lock scope bound. A programming-contract violation,
    /// not a lock failure; surfaced immediately, never retried.
    #[error("no global transaction or global-lock scope bound to this call chain")]
    UnboundContext,

    /// The coordinator holds a conflicting lock on these rows.
    ///
    /// The one error kind the retry loop absorbs. `fail_fast` marks
    /// conflicts the coordinator wants resolved by backing off now
    /// rather than retrying.
    #[error("global lock conflict on {lock_key}")]
    LockConflict {
        /// Coordinator lock key of the contended rows
        lock_key: String,
        /// Whether the coordinator asked for an immediate give-up
        fail_fast: bool,
    },

    /// Any other local statement failure. Passes through the retry loop
    /// unchanged.
    #[error("statement failed: {0}")]
    Sql(String),

    /// Cancelled while paused between lock attempts.
    #[error("interrupted while waiting to retry the global lock")]
    Interrupted,
}

impl ExecError {
    /// A retryable lock conflict.
    pub fn lock_conflict(lock_key: impl Into<String>) -> Self {
        ExecError::LockConflict {
            lock_key: lock_key.into(),
            fail_fast: false,
        }
    }

    /// A conflict the coordinator wants abandoned without retrying.
    pub fn fail_fast_conflict(lock_key: impl Into<String>) -> Self {
        ExecError::LockConflict {
            lock_key: lock_key.into(),
            fail_fast: true,
        }
    }

    /// Whether this is a lock conflict the retry loop may absorb.
    pub fn is_lock_conflict(&self) -> bool {
        matches!(self, ExecError::LockConflict { .. })
    }

    /// Whether this is a fail-fast lock conflict.
    pub fn is_fail_fast(&self) -> bool {
        matches!(
            self,
            ExecError::LockConflict {
                fail_fast: true,
                ..
            }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_conflict_constructors() {
        let plain = ExecError::lock_conflict("users:1");
        assert!(plain.is_lock_conflict());
        assert!(!plain.is_fail_fast());

        let fast = ExecError::fail_fast_conflict("users:1");
        assert!(fast.is_lock_conflict());
        assert!(fast.is_fail_fast());
    }

    #[test]
    fn test_non_conflicts_are_not_retryable() {
        assert!(!ExecError::UnboundContext.is_lock_conflict());
        assert!(!ExecError::Sql("boom".to_string()).is_lock_conflict());
        assert!(!ExecError::Interrupted.is_lock_conflict());
    }

    #[test]
    fn test_timeout_preserves_cause_as_source() {
        let timeout = ExecError::LockWaitTimeout {
            attempts: 4,
            cause: Box::new(ExecError::lock_conflict("orders:7_2")),
        };

        let msg = timeout.to_string();
        assert!(msg.contains("4 attempts"));

        let source = timeout.source().expect("timeout carries its cause");
        assert!(source.to_string().contains("orders:7_2"));
    }

    #[test]
    fn test_display_messages() {
        assert!(ExecError::UnboundContext.to_string().contains("bound"));
        assert!(ExecError::lock_conflict("t:1")
            .to_string()
            .contains("t:1"));
        assert!(ExecError::Sql("syntax".to_string())
            .to_string()
            .contains("syntax"));
        assert!(ExecError::Interrupted.to_string().contains("interrupted"));
    }
}
