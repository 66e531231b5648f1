//! JSON codec.
//!
//! Human-readable payloads for operators who inspect undo logs directly
//! in the database. The trade-off is float fidelity: JSON has no NaN or
//! infinity, so serde_json writes non-finite floats as `null`, and such a
//! payload no longer decodes as a float. Snapshots that can carry
//! non-finite floats belong on the binary backends.

use crate::branch::BranchUndoLog;
use crate::codec::traits::{CodecError, UndoLogCodec};

/// JSON-backed undo log codec.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl UndoLogCodec for JsonCodec {
    fn name(&self) -> &'static str {
        "json"
    }

    fn encode(&self, log: &BranchUndoLog) -> Result<Vec<u8>, CodecError> {
        serde_json::to_vec(log).map_err(|e| CodecError::encode(e.to_string(), self.name()))
    }

    fn decode(&self, data: &[u8]) -> Result<BranchUndoLog, CodecError> {
        serde_json::from_slice(data)
            .map_err(|e| CodecError::decode(e.to_string(), self.name(), data.len()))
    }
}
