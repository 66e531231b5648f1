//! Per-scope lock retry policy.
//!
//! A [`LockPolicy`] overrides the process-wide retry parameters for the
//! statements running inside one global-lock scope. Each field is
//! independent: a field left at `None` inherits the live global value at
//! the moment a retry controller is built, not at scope entry.

use std::cell::Cell;

/// Retry parameters bound to one global-lock scope.
///
/// `None` fields inherit from [`GlobalRetryPolicy`](crate::GlobalRetryPolicy)
/// when a controller resolves them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LockPolicy {
    /// Pause between lock attempts, in milliseconds. A bound value of 0
    /// also inherits; only positive intervals override.
    pub retry_interval_ms: Option<u32>,
    /// How many conflicts to absorb before giving up. A bound 0 is
    /// honored and fails the statement on its first conflict.
    pub retry_times: Option<u32>,
}

impl LockPolicy {
    /// A policy overriding both parameters.
    pub const fn new(retry_interval_ms: u32, retry_times: u32) -> Self {
        LockPolicy {
            retry_interval_ms: Some(retry_interval_ms),
            retry_times: Some(retry_times),
        }
    }

    /// A policy inheriting both parameters from the global policy.
    pub const fn inherit() -> Self {
        LockPolicy {
            retry_interval_ms: None,
            retry_times: None,
        }
    }

    /// Returns this policy with the retry interval overridden.
    pub const fn with_retry_interval_ms(mut self, ms: u32) -> Self {
        self.retry_interval_ms = Some(ms);
        self
    }

    /// Returns this policy with the retry budget overridden.
    pub const fn with_retry_times(mut self, times: u32) -> Self {
        self.retry_times = Some(times);
        self
    }
}

thread_local! {
    static CURRENT_POLICY: Cell<Option<LockPolicy>> = Cell::new(None);
}

/// Thread-local holder for the policy of the innermost active scope.
///
/// Scopes stack by saving the previous value on entry and restoring it
/// on exit; see [`GlobalLockScope`](crate::GlobalLockScope).
pub struct LockPolicyHolder;

impl LockPolicyHolder {
    /// Installs `policy` for the calling thread and returns the policy
    /// it displaced, if any.
    pub fn set_and_return_previous(policy: LockPolicy) -> Option<LockPolicy> {
        CURRENT_POLICY.with(|slot| slot.replace(Some(policy)))
    }

    /// The policy of the innermost active scope, if any.
    pub fn current() -> Option<LockPolicy> {
        CURRENT_POLICY.with(|slot| slot.get())
    }

    /// Removes the bound policy and returns it.
    pub fn remove() -> Option<LockPolicy> {
        CURRENT_POLICY.with(|slot| slot.take())
    }
}
