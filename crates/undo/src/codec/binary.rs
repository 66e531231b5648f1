//! Bincode codec: the default backend.
//!
//! Compact, deterministic, and the fastest of the family. Field values
//! including non-finite floats round-trip bit-exactly.

use crate::branch::BranchUndoLog;
use crate::codec::traits::{CodecError, UndoLogCodec};

/// Bincode-backed undo log codec.
#[derive(Debug, Clone, Copy, Default)]
pub struct BincodeCodec;

impl UndoLogCodec for BincodeCodec {
    fn name(&self) -> &'static str {
        "bincode"
    }

    fn encode(&self, log: &BranchUndoLog) -> Result<Vec<u8>, CodecError> {
        bincode::serialize(log).map_err(|e| CodecError::encode(e.to_string(), self.name()))
    }

    fn decode(&self, data: &[u8]) -> Result<BranchUndoLog, CodecError> {
        bincode::deserialize(data)
            .map_err(|e| CodecError::decode(e.to_string(), self.name(), data.len()))
    }
}
