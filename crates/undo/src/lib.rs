//! Branch undo log: model, comparison, serialization
//!
//! This crate carries everything a branch needs to make its local changes
//! reversible under a global transaction:
//! - branch: SqlUndoRecord and BranchUndoLog, the rollback payload model
//! - compare: row-image comparison for dirty-write detection
//! - codec: pluggable payload serialization (bincode, msgpack, json)

#![warn(missing_docs)]
#![warn(clippy::all)]

// Module declarations
pub mod branch;
pub mod codec;
pub mod compare;

// Re-export commonly used types
pub use branch::{BranchUndoLog, SqlUndoRecord};
pub use codec::{
    default_codec, get_codec, BincodeCodec, CodecError, JsonCodec, MsgPackCodec, UndoLogCodec,
    CODEC_NAMES, DEFAULT_CODEC,
};
pub use compare::{compare_images, ImageCompare};
