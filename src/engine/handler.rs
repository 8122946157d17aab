//! Table handler for MEMEM
//!
//! A [`Handler`] is what the host holds for one opened table. Opening only
//! records the table path; the catalog entry is resolved when a write or a
//! scan actually needs it.

use bytes::Bytes;
use std::sync::Arc;
use tracing::{debug, error};

use crate::catalog::{Catalog, Schema};
use crate::error::{Error, Result};
use crate::storage::{ActiveTable, ScanCursor};

/// Per-handle access to the catalog
#[derive(Debug)]
pub struct Handler {
    catalog: Arc<Catalog>,
    panic_on_invariant_violation: bool,
    /// Qualified name given to `open`
    table: Option<String>,
    cursor: ScanCursor,
}

impl Handler {
    /// Create a handler over `catalog`
    pub fn new(catalog: Arc<Catalog>, panic_on_invariant_violation: bool) -> Self {
        Self {
            catalog,
            panic_on_invariant_violation,
            table: None,
            cursor: ScanCursor::new(),
        }
    }

    /// Remember which table this handle refers to. The table does not have
    /// to exist yet.
    pub fn open(&mut self, name: &str) -> Result<()> {
        self.table = Some(name.to_string());
        self.cursor.detach();
        Ok(())
    }

    /// Forget the opened table and any scan in progress
    pub fn close(&mut self) -> Result<()> {
        self.table = None;
        self.cursor.detach();
        Ok(())
    }

    /// Qualified name of the opened table
    pub fn table_name(&self) -> Option<&str> {
        self.table.as_deref()
    }

    /// Create a table, replacing an existing one of the same name
    pub fn create_table(&self, name: &str, schema: &Schema) -> Result<()> {
        self.catalog.create_table(name, schema.clone()).map(|_| ())
    }

    /// Drop a table; absent tables are ignored
    pub fn drop_table(&self, name: &str) -> Result<()> {
        self.catalog.drop_table(name)
    }

    /// Append one host row buffer to the opened table
    pub fn write_row(&mut self, buf: &[u8]) -> Result<()> {
        let name = self.table.as_deref().ok_or(Error::NoTableOpen)?;
        self.catalog.append_row(name, buf)
    }

    /// Resolve the opened table and rewind to its first row
    pub fn scan_start(&mut self) -> Result<()> {
        let name = self.table.as_deref().ok_or(Error::NoTableOpen)?;
        let info = self
            .catalog
            .find_table(name)?
            .ok_or_else(|| Error::TableNotFound(name.to_string()))?;

        debug!(table = name, id = info.id, "resetting scan");
        self.cursor.reset(ActiveTable {
            name: info.name,
            id: info.id,
        });
        Ok(())
    }

    /// Next row in host layout, or `None` at end of table.
    ///
    /// Reaching the end unbinds the cursor, so another read without a new
    /// `scan_start` is an invariant violation.
    pub fn scan_next(&mut self) -> Result<Option<Bytes>> {
        let result = match self.cursor.active() {
            Some(active) => self
                .catalog
                .read_row(&active.name, active.id, self.cursor.position()),
            None => Err(Error::InvariantViolation(
                "scan_next called without an active scan".to_string(),
            )),
        };

        match result.map_err(|e| self.surface(e))? {
            Some(row) => {
                self.cursor.advance();
                Ok(Some(row))
            }
            None => {
                self.cursor.detach();
                Ok(None)
            }
        }
    }

    /// Index lookups always find nothing; the engine has no indexes.
    pub fn index_read(&mut self, _key: &[u8]) -> Result<Option<Bytes>> {
        Ok(None)
    }

    pub fn update_row(&mut self, _old: &[u8], _new: &[u8]) -> Result<()> {
        Err(Error::UnsupportedOperation("update_row"))
    }

    pub fn delete_row(&mut self, _row: &[u8]) -> Result<()> {
        Err(Error::UnsupportedOperation("delete_row"))
    }

    fn surface(&self, err: Error) -> Error {
        if let Error::InvariantViolation(msg) = &err {
            error!(table = ?self.table, "{}", msg);
            if self.panic_on_invariant_violation {
                panic!("invariant violated: {}", msg);
            }
        }
        err
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::FieldType;

    fn open_handler(catalog: &Arc<Catalog>, name: &str) -> Handler {
        let mut handler = Handler::new(catalog.clone(), false);
        handler.open(name).unwrap();
        handler
    }

    #[test]
    fn test_open_does_not_require_table() {
        let catalog = Arc::new(Catalog::new());
        let handler = open_handler(&catalog, "./db/later");
        assert_eq!(handler.table_name(), Some("./db/later"));
        assert_eq!(catalog.table_count().unwrap(), 0);
    }

    #[test]
    fn test_close_forgets_table_and_scan() {
        let catalog = Arc::new(Catalog::new());
        let mut handler = open_handler(&catalog, "t");
        handler
            .create_table("t", &Schema::from_types([FieldType::Long]))
            .unwrap();
        handler.write_row(&[0, 1, 0, 0, 0]).unwrap();
        handler.scan_start().unwrap();

        handler.close().unwrap();
        assert_eq!(handler.table_name(), None);
        assert!(matches!(handler.write_row(&[0, 2, 0, 0, 0]), Err(Error::NoTableOpen)));
        assert!(matches!(
            handler.scan_next(),
            Err(Error::InvariantViolation(_))
        ));
        assert_eq!(catalog.find_table("t").unwrap().unwrap().row_count, 1);
    }

    #[test]
    fn test_write_and_scan_without_open() {
        let catalog = Arc::new(Catalog::new());
        let mut handler = Handler::new(catalog, false);

        assert!(matches!(handler.write_row(&[0]), Err(Error::NoTableOpen)));
        assert!(matches!(handler.scan_start(), Err(Error::NoTableOpen)));
    }

    #[test]
    fn test_scan_start_on_missing_table() {
        let catalog = Arc::new(Catalog::new());
        let mut handler = open_handler(&catalog, "./db/none");
        assert!(matches!(handler.scan_start(), Err(Error::TableNotFound(_))));
    }

    #[test]
    fn test_scan_next_after_end_is_invariant_violation() {
        let catalog = Arc::new(Catalog::new());
        let mut handler = open_handler(&catalog, "t");
        handler
            .create_table("t", &Schema::from_types([FieldType::Long]))
            .unwrap();

        handler.scan_start().unwrap();
        assert_eq!(handler.scan_next().unwrap(), None);
        assert!(matches!(
            handler.scan_next(),
            Err(Error::InvariantViolation(_))
        ));
    }

    #[test]
    fn test_scan_sees_drop_mid_scan() {
        let catalog = Arc::new(Catalog::new());
        let mut handler = open_handler(&catalog, "t");
        handler
            .create_table("t", &Schema::from_types([FieldType::Long]))
            .unwrap();
        handler.write_row(&[0, 1, 0, 0, 0]).unwrap();
        handler.write_row(&[0, 2, 0, 0, 0]).unwrap();

        handler.scan_start().unwrap();
        assert!(handler.scan_next().unwrap().is_some());

        let other = open_handler(&catalog, "t");
        other.drop_table("t").unwrap();

        assert!(matches!(
            handler.scan_next(),
            Err(Error::InvariantViolation(_))
        ));
    }

    #[test]
    #[should_panic(expected = "invariant violated")]
    fn test_panic_on_invariant_violation() {
        let catalog = Arc::new(Catalog::new());
        let mut handler = Handler::new(catalog, true);
        handler.open("t").unwrap();
        let _ = handler.scan_next();
    }

    #[test]
    fn test_unsupported_operations() {
        let catalog = Arc::new(Catalog::new());
        let mut handler = open_handler(&catalog, "t");

        assert_eq!(handler.index_read(&[1, 2]).unwrap(), None);
        assert!(matches!(
            handler.update_row(&[0], &[0]),
            Err(Error::UnsupportedOperation("update_row"))
        ));
        assert!(matches!(
            handler.delete_row(&[0]),
            Err(Error::UnsupportedOperation("delete_row"))
        ));
    }
}
