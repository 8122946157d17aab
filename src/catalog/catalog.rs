//! Table catalog for MEMEM
//!
//! The catalog owns every table. One mutex guards the whole registry and
//! every row sequence in it, so create, drop, append and each scan step are
//! serialized against each other.

use bytes::Bytes;
use indexmap::IndexMap;
use std::sync::{Mutex, MutexGuard};
use tracing::debug;

use super::schema::Schema;
use crate::error::{Error, Result};
use crate::storage::{Table, TableId};

/// Snapshot of a table's metadata
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableInfo {
    pub id: TableId,
    pub name: String,
    pub field_count: usize,
    pub row_count: usize,
}

impl TableInfo {
    fn of(table: &Table) -> Self {
        Self {
            id: table.id(),
            name: table.name().to_string(),
            field_count: table.schema().field_count(),
            row_count: table.row_count(),
        }
    }
}

#[derive(Debug)]
struct CatalogState {
    /// Tables by name, in creation order
    tables: IndexMap<String, Table>,
    /// Next table ID
    next_table_id: TableId,
}

/// Registry of all tables known to the engine
#[derive(Debug)]
pub struct Catalog {
    state: Mutex<CatalogState>,
    row_capacity: usize,
}

impl Catalog {
    /// Create a new empty catalog
    pub fn new() -> Self {
        Self::with_capacity(0, 0)
    }

    /// Create a catalog pre-sized for `tables` tables of `rows` rows each
    pub fn with_capacity(tables: usize, rows: usize) -> Self {
        Self {
            state: Mutex::new(CatalogState {
                tables: IndexMap::with_capacity(tables),
                next_table_id: 1,
            }),
            row_capacity: rows,
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, CatalogState>> {
        self.state.lock().map_err(|_| Error::LockPoisoned)
    }

    /// Create a new empty table, replacing any table of the same name.
    ///
    /// The schema is validated before the catalog is touched.
    pub fn create_table(&self, name: &str, schema: Schema) -> Result<TableId> {
        schema.validate()?;

        let mut state = self.lock()?;
        if state.tables.shift_remove(name).is_some() {
            debug!(table = name, "replacing existing table");
        }

        let id = state.next_table_id;
        state.next_table_id += 1;
        let table = Table::new(id, name, schema, self.row_capacity);
        state.tables.insert(name.to_string(), table);

        debug!(table = name, id, "created table");
        Ok(id)
    }

    /// Drop a table and its rows. Dropping an absent table is a no-op.
    pub fn drop_table(&self, name: &str) -> Result<()> {
        let mut state = self.lock()?;
        match state.tables.shift_remove(name) {
            Some(table) => debug!(table = name, rows = table.row_count(), "dropped table"),
            None => debug!(table = name, "table already dropped"),
        }
        Ok(())
    }

    /// Look up a table by exact name
    pub fn find_table(&self, name: &str) -> Result<Option<TableInfo>> {
        let state = self.lock()?;
        Ok(state.tables.get(name).map(TableInfo::of))
    }

    /// Check if a table exists
    pub fn table_exists(&self, name: &str) -> Result<bool> {
        Ok(self.lock()?.tables.contains_key(name))
    }

    /// Append a host row buffer to the named table
    pub fn append_row(&self, name: &str, buf: &[u8]) -> Result<()> {
        let mut state = self.lock()?;
        let table = state
            .tables
            .get_mut(name)
            .ok_or_else(|| Error::TableNotFound(name.to_string()))?;
        table.append(buf)
    }

    /// Read the row at `position` of the table `name`, which must still be
    /// the table with identity `id`.
    ///
    /// `Ok(None)` means the position is exactly the row count.
    pub fn read_row(&self, name: &str, id: TableId, position: usize) -> Result<Option<Bytes>> {
        let state = self.lock()?;
        let table = match state.tables.get(name) {
            Some(table) if table.id() == id => table,
            Some(table) => {
                return Err(Error::InvariantViolation(format!(
                    "table '{}' was re-created during a scan (id {} became {})",
                    name,
                    id,
                    table.id()
                )))
            }
            None => {
                return Err(Error::InvariantViolation(format!(
                    "table '{}' was dropped during a scan",
                    name
                )))
            }
        };

        if position > table.row_count() {
            return Err(Error::InvariantViolation(format!(
                "scan position {} is past the {} rows of '{}'",
                position,
                table.row_count(),
                name
            )));
        }
        table.read_row(position)
    }

    /// List all table names in creation order
    pub fn list_tables(&self) -> Result<Vec<String>> {
        Ok(self.lock()?.tables.keys().cloned().collect())
    }

    /// Get number of tables
    pub fn table_count(&self) -> Result<usize> {
        Ok(self.lock()?.tables.len())
    }

    /// Metadata for every table in creation order
    pub fn stats(&self) -> Result<Vec<TableInfo>> {
        Ok(self.lock()?.tables.values().map(TableInfo::of).collect())
    }

    /// Drop every table, returning how many there were
    pub fn clear(&self) -> Result<usize> {
        let mut state = self.lock()?;
        let count = state.tables.len();
        state.tables.clear();
        Ok(count)
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}
