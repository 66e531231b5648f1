//! Nanosecond-precision timestamp type
//!
//! Captured row snapshots must survive serialization bit-for-bit, and
//! TIMESTAMP columns carry sub-millisecond digits that drivers surface as a
//! separate nanosecond component. A plain millisecond counter cannot hold
//! them, so timestamps here are a (seconds, nanoseconds) pair.
//!
//! ## Representation
//!
//! - `secs`: whole seconds since Unix epoch (1970-01-01 00:00:00 UTC),
//!   signed so pre-epoch instants are representable
//! - `nanos`: sub-second component, always in `0..1_000_000_000`
//!
//! Instants before the epoch are floor-normalized: -0.5s is stored as
//! `secs = -1, nanos = 500_000_000`. This keeps derived ordering correct
//! and makes millisecond conversions exact in both directions.
//!
//! ## Usage
//!
//! Never assemble the pair by hand. Use explicit constructors:
//!
//! ```
//! use ramus_core::Timestamp;
//!
//! let now = Timestamp::now();
//! let from_millis = Timestamp::from_millis(1_000);
//! let precise = Timestamp::from_millis(1_000).with_nanos(999_999);
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

const NANOS_PER_SEC: u32 = 1_000_000_000;
const NANOS_PER_MILLI: u32 = 1_000_000;
const MILLIS_PER_SEC: i64 = 1_000;

/// Nanosecond-precision timestamp
///
/// Represents a point in time as whole seconds since Unix epoch plus a
/// sub-second nanosecond component.
///
/// ## Invariants
///
/// - `nanos` is always strictly below 1,000,000,000
/// - The pair is floor-normalized, so derived `Ord` compares instants
/// - The zero timestamp is the Unix epoch
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Timestamp {
    secs: i64,
    nanos: u32,
}

impl Timestamp {
    /// Unix epoch (1970-01-01 00:00:00 UTC)
    pub const EPOCH: Timestamp = Timestamp { secs: 0, nanos: 0 };

    // =========================================================================
    // Constructors
    // =========================================================================

    /// Create a timestamp for the current moment
    pub fn now() -> Self {
        let now = Utc::now();
        // chrono folds leap seconds into the nanos field; carry normalizes them
        Timestamp::from_parts(now.timestamp(), now.timestamp_subsec_nanos())
    }

    /// Create a timestamp from whole seconds and a nanosecond component
    ///
    /// `nanos` of one second or more carries into `secs`.
    #[inline]
    pub const fn from_parts(secs: i64, nanos: u32) -> Self {
        let carry = (nanos / NANOS_PER_SEC) as i64;
        Timestamp {
            secs: secs.saturating_add(carry),
            nanos: nanos % NANOS_PER_SEC,
        }
    }

    /// Create a timestamp from milliseconds since epoch
    ///
    /// Negative inputs floor toward the previous second, so
    /// `from_millis(-1)` is `secs = -1, nanos = 999_000_000`.
    #[inline]
    pub const fn from_millis(millis: i64) -> Self {
        let secs = millis.div_euclid(MILLIS_PER_SEC);
        let sub_millis = millis.rem_euclid(MILLIS_PER_SEC) as u32;
        Timestamp {
            secs,
            nanos: sub_millis * NANOS_PER_MILLI,
        }
    }

    /// Create a timestamp from seconds since epoch
    #[inline]
    pub const fn from_secs(secs: i64) -> Self {
        Timestamp { secs, nanos: 0 }
    }

    /// Replace the sub-second component, keeping the whole seconds
    ///
    /// This is how drivers attach the nanosecond digits of a TIMESTAMP
    /// column to a millisecond-precision base value. A component of one
    /// second or more carries into the seconds.
    #[inline]
    pub const fn with_nanos(self, nanos: u32) -> Self {
        Timestamp::from_parts(self.secs, nanos)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Whole seconds since Unix epoch
    #[inline]
    pub const fn secs(&self) -> i64 {
        self.secs
    }

    /// Sub-second nanosecond component, in `0..1_000_000_000`
    #[inline]
    pub const fn subsec_nanos(&self) -> u32 {
        self.nanos
    }

    /// Milliseconds since Unix epoch (truncates sub-millisecond digits)
    #[inline]
    pub const fn as_millis(&self) -> i64 {
        self.secs
            .saturating_mul(MILLIS_PER_SEC)
            .saturating_add((self.nanos / NANOS_PER_MILLI) as i64)
    }

    /// Convert to a UTC datetime
    ///
    /// Returns `None` if the instant is outside chrono's representable range.
    pub fn to_datetime(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.secs, self.nanos)
    }

    /// Check if this timestamp is before another
    #[inline]
    pub fn is_before(&self, other: Timestamp) -> bool {
        *self < other
    }

    /// Check if this timestamp is after another
    #[inline]
    pub fn is_after(&self, other: Timestamp) -> bool {
        *self > other
    }
}

impl Default for Timestamp {
    fn default() -> Self {
        Timestamp::EPOCH
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Renders the stored pair as "seconds.nanoseconds"
        write!(f, "{}.{:09}", self.secs, self.nanos)
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(dt: DateTime<Utc>) -> Self {
        Timestamp::from_parts(dt.timestamp(), dt.timestamp_subsec_nanos())
    }
}

// ============================================================================
// Tests
// ============================================================================
