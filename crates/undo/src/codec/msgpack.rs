//! MessagePack codec.
//!
//! Self-describing enough to inspect with standard msgpack tooling while
//! staying close to bincode in size. Non-finite floats round-trip
//! bit-exactly, the same as the binary backend.

use crate::branch::BranchUndoLog;
use crate::codec::traits::{CodecError, UndoLogCodec};

/// MessagePack-backed undo log codec.
#[derive(Debug, Clone, Copy, Default)]
pub struct MsgPackCodec;

impl UndoLogCodec for MsgPackCodec {
    fn name(&self) -> &'static str {
        "msgpack"
    }

    fn encode(&self, log: &BranchUndoLog) -> Result<Vec<u8>, CodecError> {
        rmp_serde::to_vec(log).map_err(|e| CodecError::encode(e.to_string(), self.name()))
    }

    fn decode(&self, data: &[u8]) -> Result<BranchUndoLog, CodecError> {
        rmp_serde::from_slice(data)
            .map_err(|e| CodecError::decode(e.to_string(), self.name(), data.len()))
    }
}
