//! Scan cursor for MEMEM
//!
//! Tracks which table a handler is scanning and the next row position.
//! The table is remembered by name and id so that a drop or re-create
//! between two reads is noticed rather than read through.

use super::table::TableId;

/// The table a cursor is bound to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveTable {
    pub name: String,
    pub id: TableId,
}

/// Sequential scan position over one table
#[derive(Debug, Default)]
pub struct ScanCursor {
    active: Option<ActiveTable>,
    position: usize,
}

impl ScanCursor {
    /// Create a cursor bound to no table
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind to `table` and rewind to the first row
    pub fn reset(&mut self, table: ActiveTable) {
        self.active = Some(table);
        self.position = 0;
    }

    /// Drop the table binding; the next read must re-resolve
    pub fn detach(&mut self) {
        self.active = None;
    }

    /// The bound table, if a scan is in progress
    pub fn active(&self) -> Option<&ActiveTable> {
        self.active.as_ref()
    }

    /// Index of the next row to read
    pub fn position(&self) -> usize {
        self.position
    }

    /// Move past the row just read
    pub fn advance(&mut self) {
        self.position += 1;
    }
}
