//! Core data model for the branch transaction client
//!
//! This crate defines the foundational types used throughout the system:
//! - FieldValue: closed union of capturable cell values
//! - Timestamp: nanosecond-precision instant for temporal columns
//! - Field / Row: captured cells and rows
//! - RowImage: sealed before/after snapshot of table rows
//! - TableMeta / ColumnMeta / IndexMeta: externally-owned table metadata
//! - SqlType / KeyType / SqlKind: type codes and classification tags
//! - defaults: compiled-in retry defaults shared with deployed coordinators

#![warn(missing_docs)]
#![warn(clippy::all)]

// Module declarations
pub mod defaults;
pub mod image;
pub mod meta;
pub mod row;
pub mod timestamp;
pub mod types;
pub mod value;

// Re-export commonly used types
pub use image::RowImage;
pub use meta::{ColumnMeta, IndexMeta, IndexType, TableMeta};
pub use row::{Field, Row};
pub use timestamp::Timestamp;
pub use types::{KeyType, SqlKind, SqlType};
pub use value::FieldValue;
