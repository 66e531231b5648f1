//! Global-lock scopes.
//!
//! A scope marks a region of one thread's call stack in which plain
//! local statements must still respect global row locks, typically a
//! local transaction that races with AT-mode branches over the same
//! rows. Entering a scope raises the thread's global-lock flag and
//! installs the scope's [`LockPolicy`]; leaving it restores both to
//! exactly their prior state, so scopes nest freely.
//!
//! ## Example
//!
//! ```
//! use ramus_lock::{with_global_lock, LockPolicy, TxContext};
//!
//! let answer = with_global_lock(LockPolicy::new(100, 3), || {
//!     assert!(TxContext::requires_global_lock());
//!     41 + 1
//! });
//! assert_eq!(answer, 42);
//! assert!(!TxContext::requires_global_lock());
//! ```

use crate::context::TxContext;
use crate::policy::{LockPolicy, LockPolicyHolder};

/// RAII guard for one global-lock scope.
///
/// Restoration happens in [`Drop`], so the scope unwinds correctly when
/// the body panics.
#[derive(Debug)]
pub struct GlobalLockScope {
    flag_was_raised: bool,
    previous_policy: Option<LockPolicy>,
}

impl GlobalLockScope {
    /// Enters a scope on the calling thread, raising the global-lock
    /// flag and installing `policy`.
    pub fn enter(policy: LockPolicy) -> Self {
        let flag_was_raised = TxContext::requires_global_lock();
        let previous_policy = LockPolicyHolder::set_and_return_previous(policy);
        TxContext::bind_global_lock_flag();
        GlobalLockScope {
            flag_was_raised,
            previous_policy,
        }
    }
}

impl Drop for GlobalLockScope {
    fn drop(&mut self) {
        // The flag is lowered only by the frame that raised it, so an
        // inner scope cannot strip an outer scope's protection.
        if !self.flag_was_raised {
            TxContext::unbind_global_lock_flag();
        }
        match self.previous_policy.take() {
            Some(previous) => {
                LockPolicyHolder::set_and_return_previous(previous);
            }
            None => {
                LockPolicyHolder::remove();
            }
        }
    }
}

/// Runs `body` inside a global-lock scope with `policy` bound.
///
/// Statements executed by `body` on this thread go through global lock
/// checking even without a bound xid, retrying per `policy`.
pub fn with_global_lock<R>(policy: LockPolicy, body: impl FnOnce() -> R) -> R {
    let _scope = GlobalLockScope::enter(policy);
    body()
}
