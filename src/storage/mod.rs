//! Storage module
//!
//! This module contains the in-memory storage components:
//! - Record codec (host row layout)
//! - Append-only tables
//! - Scan cursor

pub mod cursor;
pub mod record;
pub mod table;

pub use cursor::{ActiveTable, ScanCursor};
pub use record::{pack_row, unpack_row, FieldValue, RecordCodec};
pub use table::{Table, TableId};
