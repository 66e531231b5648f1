//! Thread-bound transaction context.
//!
//! Each thread carries at most one global transaction identity (xid) and
//! one global-lock flag. Both live in thread-local storage so that a
//! statement executing deep inside a call chain can discover the ambient
//! transaction without it being threaded through every signature.
//!
//! ## Example
//!
//! ```
//! use ramus_lock::TxContext;
//!
//! TxContext::bind("192.168.0.1:8091:2001");
//! assert!(TxContext::in_global_transaction());
//! let xid = TxContext::unbind();
//! assert_eq!(xid.as_deref(), Some("192.168.0.1:8091:2001"));
//! ```

use std::cell::{Cell, RefCell};

use tracing::debug;

thread_local! {
    static BOUND_XID: RefCell<Option<String>> = RefCell::new(None);
    static GLOBAL_LOCK_FLAG: Cell<bool> = Cell::new(false);
}

/// Accessor for the calling thread's transaction context.
///
/// All operations touch only the current thread's slots; nothing here is
/// visible to other threads.
pub struct TxContext;

impl TxContext {
    /// Binds `xid` as the current global transaction, replacing any
    /// previous binding.
    pub fn bind(xid: impl Into<String>) {
        let xid = xid.into();
        debug!(xid = %xid, "binding global transaction");
        BOUND_XID.with(|slot| *slot.borrow_mut() = Some(xid));
    }

    /// Clears the bound xid and returns it, or `None` if the thread was
    /// not in a global transaction.
    pub fn unbind() -> Option<String> {
        let xid = BOUND_XID.with(|slot| slot.borrow_mut().take());
        if let Some(ref xid) = xid {
            debug!(xid = %xid, "unbinding global transaction");
        }
        xid
    }

    /// The currently bound xid, if any.
    pub fn xid() -> Option<String> {
        BOUND_XID.with(|slot| slot.borrow().clone())
    }

    /// Whether the calling thread is inside a global transaction.
    pub fn in_global_transaction() -> bool {
        BOUND_XID.with(|slot| slot.borrow().is_some())
    }

    /// Raises the global-lock flag for the calling thread.
    ///
    /// Idempotent: raising an already raised flag is a no-op.
    pub fn bind_global_lock_flag() {
        GLOBAL_LOCK_FLAG.with(|flag| flag.set(true));
    }

    /// Lowers the global-lock flag for the calling thread.
    pub fn unbind_global_lock_flag() {
        GLOBAL_LOCK_FLAG.with(|flag| flag.set(false));
    }

    /// Whether statements on this thread must check global row locks
    /// even outside a global transaction.
    pub fn requires_global_lock() -> bool {
        GLOBAL_LOCK_FLAG.with(|flag| flag.get())
    }

    /// Resets both slots. Test hygiene only.
    #[cfg(test)]
    pub fn clear() {
        BOUND_XID.with(|slot| *slot.borrow_mut() = None);
        GLOBAL_LOCK_FLAG.with(|flag| flag.set(false));
    }
}
