//! Configuration change plumbing.
//!
//! Retry parameters are live-reloadable: an external configuration
//! source pushes string key/value updates as [`ConfigChangeEvent`]s to
//! registered [`ConfigChangeListener`]s. Values arrive untyped; each
//! listener owns the parsing and the fallback story for its keys.

/// Configuration key for the pause between lock attempts, in
/// milliseconds.
pub const CLIENT_LOCK_RETRY_INTERVAL: &str = "client.rm.lock.retryInterval";

/// Configuration key for the number of conflicts absorbed before a
/// statement gives up.
pub const CLIENT_LOCK_RETRY_TIMES: &str = "client.rm.lock.retryTimes";

/// One key/value update pushed by the configuration source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigChangeEvent {
    /// Dotted configuration key, e.g. `client.rm.lock.retryTimes`.
    pub key: String,
    /// New value as the source delivered it, unparsed.
    pub new_value: String,
}

impl ConfigChangeEvent {
    /// Builds an event for `key` carrying `new_value`.
    pub fn new(key: impl Into<String>, new_value: impl Into<String>) -> Self {
        ConfigChangeEvent {
            key: key.into(),
            new_value: new_value.into(),
        }
    }
}

/// Receiver of configuration updates.
///
/// Implementations must tolerate events for keys they do not own and
/// must never fail on malformed values; a bad value is logged and
/// replaced by the implementation's compiled default.
pub trait ConfigChangeListener: Send + Sync {
    /// Applies one configuration update.
    fn on_change_event(&self, event: &ConfigChangeEvent);
}
