//! Schema definitions for MEMEM
//!
//! This module defines the ordered field list a table is created with and
//! the checks that decide whether the engine can store it.

use super::types::FieldType;
use crate::error::{Error, Result};
use crate::storage::record;

/// Field definition in a table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    /// Field name
    pub name: String,
    /// Declared type
    pub field_type: FieldType,
}

impl Field {
    /// Create a new field
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
        }
    }
}

/// Table schema - the ordered field declarations
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Schema {
    fields: Vec<Field>,
}

impl Schema {
    /// Create a new empty schema
    pub fn new() -> Self {
        Self { fields: Vec::new() }
    }

    /// Create a schema from a list of fields
    pub fn from_fields(fields: Vec<Field>) -> Self {
        Self { fields }
    }

    /// Create a schema from bare type tags; fields are named `f0`, `f1`, ...
    pub fn from_types(types: impl IntoIterator<Item = FieldType>) -> Self {
        let fields = types
            .into_iter()
            .enumerate()
            .map(|(i, ty)| Field::new(format!("f{}", i), ty))
            .collect();
        Self { fields }
    }

    /// Get all fields
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Get number of fields
    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    /// Byte length of every row of a table with this schema
    pub fn row_width(&self) -> usize {
        record::row_width(self.fields.len())
    }

    /// Reject any field the engine cannot store.
    ///
    /// The first offending field is reported; nothing is partially accepted.
    pub fn validate(&self) -> Result<()> {
        match self.fields.iter().find(|f| !f.field_type.is_supported()) {
            Some(field) => Err(Error::UnsupportedFieldType {
                field: field.name.clone(),
                field_type: field.field_type,
            }),
            None => Ok(()),
        }
    }
}
