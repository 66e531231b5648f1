//! Compiled-in client defaults
//!
//! These values are the fallback of last resort: they apply when no
//! configuration is bound and whenever a configuration update is
//! malformed. They mirror the defaults shipped by deployed coordinators,
//! so do not change them casually; a participant that retries on a
//! different schedule than the rest of the fleet behaves visibly
//! differently under lock contention.

/// Pause between lock acquisition attempts, in milliseconds.
pub const DEFAULT_CLIENT_LOCK_RETRY_INTERVAL_MS: u32 = 10;

/// Number of retries granted after the initial lock attempt.
pub const DEFAULT_CLIENT_LOCK_RETRY_TIMES: u32 = 30;
