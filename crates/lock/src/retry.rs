//! Lock retry budgeting.
//!
//! Two layers cooperate here. [`GlobalRetryPolicy`] is the process-wide
//! retry configuration: it starts from compiled defaults and tracks
//! configuration pushes at runtime. [`LockRetryController`] is the
//! per-statement budget: built once per top-level execution, it resolves
//! its parameters field by field from the innermost scope policy with
//! the global policy filling the gaps, then meters the conflict-pause
//! cycle until the statement succeeds or the budget runs out.

use std::sync::atomic::{AtomicBool, Ordering as AtomicOrdering};
use std::sync::Arc;
use std::time::Duration;

use once_cell::sync::Lazy;
use parking_lot::RwLock;
use tracing::{debug, warn};

use ramus_core::defaults::{
    DEFAULT_CLIENT_LOCK_RETRY_INTERVAL_MS, DEFAULT_CLIENT_LOCK_RETRY_TIMES,
};

use crate::config::{
    ConfigChangeEvent, ConfigChangeListener, CLIENT_LOCK_RETRY_INTERVAL, CLIENT_LOCK_RETRY_TIMES,
};
use crate::error::ExecError;
use crate::policy::{LockPolicy, LockPolicyHolder};

// ============================================================================
// Global Retry Policy
// ============================================================================

#[derive(Debug, Clone, Copy)]
struct PolicyValues {
    interval_ms: u32,
    times: u32,
}

impl PolicyValues {
    const fn compiled() -> Self {
        PolicyValues {
            interval_ms: DEFAULT_CLIENT_LOCK_RETRY_INTERVAL_MS,
            times: DEFAULT_CLIENT_LOCK_RETRY_TIMES,
        }
    }
}

/// Process-wide retry parameters, live-reloadable via configuration
/// events.
///
/// Reads take a brief shared lock; controllers snapshot the values they
/// need at construction and never look back, so a reload mid-statement
/// affects only statements that start afterwards.
#[derive(Debug)]
pub struct GlobalRetryPolicy {
    values: RwLock<PolicyValues>,
}

impl GlobalRetryPolicy {
    /// A policy at the compiled defaults.
    pub fn new() -> Self {
        GlobalRetryPolicy {
            values: RwLock::new(PolicyValues::compiled()),
        }
    }

    /// The shared process-wide instance.
    ///
    /// Register this with the configuration source to make the retry
    /// parameters of every unscoped statement live-reloadable.
    pub fn shared() -> &'static GlobalRetryPolicy {
        static SHARED: Lazy<GlobalRetryPolicy> = Lazy::new(GlobalRetryPolicy::new);
        &SHARED
    }

    /// Current pause between lock attempts, in milliseconds.
    pub fn retry_interval_ms(&self) -> u32 {
        self.values.read().interval_ms
    }

    /// Current number of conflicts absorbed before giving up.
    pub fn retry_times(&self) -> u32 {
        self.values.read().times
    }

    /// Restores the compiled defaults. Test hygiene only.
    #[cfg(test)]
    pub fn reset(&self) {
        *self.values.write() = PolicyValues::compiled();
    }
}

impl Default for GlobalRetryPolicy {
    fn default() -> Self {
        GlobalRetryPolicy::new()
    }
}

impl ConfigChangeListener for GlobalRetryPolicy {
    fn on_change_event(&self, event: &ConfigChangeEvent) {
        match event.key.as_str() {
            CLIENT_LOCK_RETRY_INTERVAL => {
                let interval_ms =
                    parse_or_default(event, DEFAULT_CLIENT_LOCK_RETRY_INTERVAL_MS);
                self.values.write().interval_ms = interval_ms;
                debug!(interval_ms, "updated global lock retry interval");
            }
            CLIENT_LOCK_RETRY_TIMES => {
                let times = parse_or_default(event, DEFAULT_CLIENT_LOCK_RETRY_TIMES);
                self.values.write().times = times;
                debug!(times, "updated global lock retry times");
            }
            _ => {}
        }
    }
}

/// Parses a pushed value as a non-negative integer. A malformed value
/// falls back to the compiled default, never to the previous live value.
fn parse_or_default(event: &ConfigChangeEvent, compiled_default: u32) -> u32 {
    match event.new_value.trim().parse::<u32>() {
        Ok(value) => value,
        Err(parse_err) => {
            warn!(
                key = %event.key,
                value = %event.new_value,
                error = %parse_err,
                "malformed retry configuration value, using compiled default"
            );
            compiled_default
        }
    }
}

// ============================================================================
// Lock Retry Controller
// ============================================================================

/// Per-statement retry budget.
///
/// Created once per top-level execution so that nested statements never
/// multiply the wait. [`sleep`](Self::sleep) is called with each lock
/// conflict: it either pauses and returns `Ok(())`, inviting another
/// attempt, or converts the conflict into a terminal error.
#[derive(Debug)]
pub struct LockRetryController {
    retry_interval: Duration,
    retry_times: u32,
    attempts: u32,
    cancel_flag: Option<Arc<AtomicBool>>,
}

impl LockRetryController {
    /// Builds a controller for the calling thread, resolving parameters
    /// from the innermost scope policy with the shared global policy
    /// filling unbound fields.
    pub fn new() -> Self {
        Self::with_policy_source(LockPolicyHolder::current(), GlobalRetryPolicy::shared())
    }

    /// Builds a controller from an explicit policy and fallback.
    /// Resolution is per parameter: an unbound (or zero) interval and an
    /// unbound budget each inherit from `fallback` independently.
    pub fn with_policy_source(
        policy: Option<LockPolicy>,
        fallback: &GlobalRetryPolicy,
    ) -> Self {
        let interval_ms = policy
            .and_then(|p| p.retry_interval_ms)
            .filter(|ms| *ms > 0)
            .unwrap_or_else(|| fallback.retry_interval_ms());
        let retry_times = policy
            .and_then(|p| p.retry_times)
            .unwrap_or_else(|| fallback.retry_times());

        LockRetryController {
            retry_interval: Duration::from_millis(u64::from(interval_ms)),
            retry_times,
            attempts: 0,
            cancel_flag: None,
        }
    }

    /// Attaches a cancellation flag checked around each pause.
    pub fn with_cancel_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel_flag = Some(flag);
        self
    }

    /// Resolved pause between attempts.
    pub fn retry_interval(&self) -> Duration {
        self.retry_interval
    }

    /// Resolved conflict budget.
    pub fn retry_times(&self) -> u32 {
        self.retry_times
    }

    /// Conflicts absorbed so far.
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    /// Accounts for one lock conflict and pauses before the next
    /// attempt.
    ///
    /// Returns `Ok(())` after sleeping for the retry interval. Returns
    /// [`ExecError::LockWaitTimeout`] wrapping `cause` when the budget
    /// is exhausted or `cause` is fail-fast, and
    /// [`ExecError::Interrupted`] when the cancellation flag is raised
    /// before or during the pause.
    pub fn sleep(&mut self, cause: ExecError) -> Result<(), ExecError> {
        self.attempts += 1;
        if cause.is_fail_fast() || self.attempts > self.retry_times {
            return Err(ExecError::LockWaitTimeout {
                attempts: self.attempts,
                cause: Box::new(cause),
            });
        }

        debug!(
            attempt = self.attempts,
            budget = self.retry_times,
            "lock conflict, pausing before retry"
        );

        if self.cancelled() {
            return Err(ExecError::Interrupted);
        }
        std::thread::sleep(self.retry_interval);
        if self.cancelled() {
            return Err(ExecError::Interrupted);
        }
        Ok(())
    }

    fn cancelled(&self) -> bool {
        self.cancel_flag
            .as_ref()
            .is_some_and(|flag| flag.load(AtomicOrdering::SeqCst))
    }
}

impl Default for LockRetryController {
    fn default() -> Self {
        LockRetryController::new()
    }
}
