//! Table storage for MEMEM
//!
//! A table is an append-only sequence of row payloads in insertion order.

use bytes::Bytes;
use tracing::trace;

use super::record::RecordCodec;
use crate::catalog::Schema;
use crate::error::Result;

/// Catalog-assigned table identity, unique for the lifetime of a catalog.
pub type TableId = u64;

/// An in-memory table
#[derive(Debug)]
pub struct Table {
    /// Table ID
    id: TableId,
    /// Table name
    name: String,
    /// Schema the table was created with
    schema: Schema,
    /// Row codec derived from the schema
    codec: RecordCodec,
    /// Stored payloads, presence byte stripped
    rows: Vec<Bytes>,
}

impl Table {
    /// Create a new empty table
    pub fn new(id: TableId, name: impl Into<String>, schema: Schema, row_capacity: usize) -> Self {
        let codec = RecordCodec::new(schema.field_count());
        Self {
            id,
            name: name.into(),
            schema,
            codec,
            rows: Vec::with_capacity(row_capacity),
        }
    }

    pub fn id(&self) -> TableId {
        self.id
    }

    /// Get table name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get table schema
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Get row count
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Append a host row buffer.
    ///
    /// Duplicates are accepted; there are no keys.
    pub fn append(&mut self, buf: &[u8]) -> Result<()> {
        let payload = self.codec.decode_for_write(buf)?;
        self.rows.push(payload);
        trace!(table = %self.name, rows = self.rows.len(), "appended row");
        Ok(())
    }

    /// The row at `position` in host layout, or `None` past the end.
    pub fn read_row(&self, position: usize) -> Result<Option<Bytes>> {
        match self.rows.get(position) {
            Some(payload) => self.codec.encode_for_read(payload).map(Some),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::FieldType;
    use crate::error::Error;

    fn create_test_table() -> Table {
        let schema = Schema::from_types([FieldType::Long, FieldType::Long]);
        Table::new(1, "./test/pairs", schema, 0)
    }

    #[test]
    fn test_table_append() {
        let mut table = create_test_table();

        table.append(&[0, 1, 0, 0, 0, 2, 0, 0, 0]).unwrap();
        assert_eq!(table.row_count(), 1);
        assert_eq!(
            table.read_row(0).unwrap().as_deref(),
            Some(&[0u8, 1, 0, 0, 0, 2, 0, 0, 0][..])
        );
        assert_eq!(table.read_row(1).unwrap(), None);
    }

    #[test]
    fn test_table_wrong_row_width() {
        let mut table = create_test_table();

        let result = table.append(&[0, 1, 0, 0, 0]);
        assert!(matches!(result, Err(Error::RowWidthMismatch { .. })));
        assert_eq!(table.row_count(), 0);
    }

    #[test]
    fn test_table_accepts_duplicates_in_order() {
        let mut table = create_test_table();

        for i in [3u8, 3, 1] {
            table.append(&[0, i, 0, 0, 0, 0, 0, 0, 0]).unwrap();
        }

        let firsts: Vec<u8> = (0..table.row_count())
            .map(|p| table.read_row(p).unwrap().unwrap()[1])
            .collect();
        assert_eq!(firsts, vec![3, 3, 1]);
    }
}
