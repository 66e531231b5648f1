//! Undo log codec family.
//!
//! Three interchangeable backends encode the same `BranchUndoLog` model:
//!
//! - `bincode`: compact binary, the default
//! - `msgpack`: binary, inspectable with standard msgpack tooling
//! - `json`: human-readable, with documented float caveats
//!
//! The payloads of different backends are not cross-compatible. Deployments
//! persist the codec name next to the payload and resolve it through
//! [`get_codec`] before decoding.
//!
//! # Usage
//!
//! ```
//! use ramus_undo::branch::BranchUndoLog;
//! use ramus_undo::codec::get_codec;
//!
//! let codec = get_codec("msgpack").unwrap();
//! let log = BranchUndoLog::new("10.0.0.1:8091:42", 43);
//!
//! let bytes = codec.encode(&log).unwrap();
//! let decoded = codec.decode(&bytes).unwrap();
//! assert_eq!(decoded.branch_id(), 43);
//! ```

mod binary;
mod json;
mod msgpack;
mod traits;

pub use binary::BincodeCodec;
pub use json::JsonCodec;
pub use msgpack::MsgPackCodec;
pub use traits::{CodecError, UndoLogCodec};

/// Name of the codec used when none is configured.
pub const DEFAULT_CODEC: &str = "bincode";

/// Every codec name [`get_codec`] recognizes.
pub const CODEC_NAMES: &[&str] = &["bincode", "msgpack", "json"];

/// Get a codec by its persisted name.
///
/// Returns the codec if recognized, or an error for unknown names.
/// Deployments resolve the configured name once at startup and reuse the
/// codec for the process lifetime.
pub fn get_codec(name: &str) -> Result<Box<dyn UndoLogCodec>, CodecError> {
    match name {
        "bincode" => Ok(Box::new(BincodeCodec)),
        "msgpack" => Ok(Box::new(MsgPackCodec)),
        "json" => Ok(Box::new(JsonCodec)),
        _ => Err(CodecError::UnknownCodec(name.to_string())),
    }
}

/// The codec used when none is configured.
pub fn default_codec() -> Box<dyn UndoLogCodec> {
    Box::new(BincodeCodec)
}
