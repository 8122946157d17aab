//! Catalog module
//!
//! This module contains the table registry, schema definitions, and field types.

pub mod catalog;
pub mod schema;
pub mod types;

pub use catalog::{Catalog, TableInfo};
pub use schema::{Field, Schema};
pub use types::FieldType;
