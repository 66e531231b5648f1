//! Undo log codec trait definitions.

use crate::branch::BranchUndoLog;

/// Undo log codec trait.
///
/// Every undo log crossing the storage boundary goes through a codec.
/// Backends are interchangeable in behavior but not in wire bytes: a log
/// must be decoded by the codec that encoded it, which is why the codec
/// name is persisted alongside the payload.
///
/// # Thread Safety
///
/// Codecs must be `Send + Sync`; they hold no state and are shared freely
/// across threads.
pub trait UndoLogCodec: Send + Sync {
    /// Unique codec name, persisted next to every payload.
    fn name(&self) -> &'static str;

    /// Encode a branch undo log to bytes.
    ///
    /// Never fails for logs assembled through this crate's constructors.
    fn encode(&self, log: &BranchUndoLog) -> Result<Vec<u8>, CodecError>;

    /// Decode a branch undo log from bytes.
    ///
    /// Malformed input yields `CodecError::Decode`; there is no partial
    /// decode.
    fn decode(&self, data: &[u8]) -> Result<BranchUndoLog, CodecError>;

    /// Canonical encoding of the empty undo log.
    ///
    /// Stored when a slot must exist before real content does (the
    /// global-lock placeholder row). Decoding it yields the `Default`
    /// log: no xid, branch id 0, no records.
    fn default_content(&self) -> Vec<u8> {
        // The empty log carries no user data; every backend encodes it
        self.encode(&BranchUndoLog::default())
            .expect("empty undo log always encodes")
    }
}

/// Codec errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CodecError {
    /// Decoding failed (truncated, corrupt, or wrong-codec input).
    ///
    /// Carries the codec name and data length so callers can distinguish
    /// a wrong-codec error from data corruption.
    #[error("decode error (codec={codec}, data_len={data_len}): {detail}")]
    Decode {
        /// Human-readable error description
        detail: String,
        /// Codec that attempted the decode
        codec: String,
        /// Length of the data that failed to decode
        data_len: usize,
    },

    /// Encoding failed (backend rejected the in-memory value).
    #[error("encode error (codec={codec}): {detail}")]
    Encode {
        /// Human-readable error description
        detail: String,
        /// Codec that attempted the encode
        codec: String,
    },

    /// Unknown codec name.
    #[error("unknown codec: {0}")]
    UnknownCodec(String),
}

impl CodecError {
    /// Create a decode error with full diagnostic context.
    pub fn decode(detail: impl Into<String>, codec: impl Into<String>, data_len: usize) -> Self {
        CodecError::Decode {
            detail: detail.into(),
            codec: codec.into(),
            data_len,
        }
    }

    /// Create an encode error.
    pub fn encode(detail: impl Into<String>, codec: impl Into<String>) -> Self {
        CodecError::Encode {
            detail: detail.into(),
            codec: codec.into(),
        }
    }
}
