//! Error types for MEMEM
//!
//! This module defines all error types used throughout the storage engine.

use crate::catalog::FieldType;
use thiserror::Error;

/// The main error type for MEMEM
#[derive(Error, Debug)]
pub enum Error {
    // ========== Schema Errors ==========
    #[error("Schema error: unsupported field type {field_type} for field '{field}'")]
    UnsupportedFieldType { field: String, field_type: FieldType },

    #[error("Schema error: unknown field type '{0}'")]
    UnknownFieldType(String),

    #[error("Schema error: row is {actual} bytes, expected {expected}")]
    RowWidthMismatch { expected: usize, actual: usize },

    // ========== Catalog Errors ==========
    #[error("Catalog error: table '{0}' not found")]
    TableNotFound(String),

    // ========== Handler Errors ==========
    #[error("Handler error: no table is open")]
    NoTableOpen,

    #[error("Handler error: operation '{0}' is not supported")]
    UnsupportedOperation(&'static str),

    // ========== Configuration Errors ==========
    #[error("Config error: {0}")]
    Config(String),

    // ========== I/O Errors ==========
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    // ========== Internal Errors ==========
    #[error("Internal error: catalog lock poisoned")]
    LockPoisoned,

    #[error("Internal error: invariant violated: {0}")]
    InvariantViolation(String),
}

impl Error {
    /// True for errors that decline an operation because the schema or the
    /// row layout is not one this engine stores.
    pub fn is_schema_rejected(&self) -> bool {
        matches!(
            self,
            Error::UnsupportedFieldType { .. } | Error::RowWidthMismatch { .. }
        )
    }
}

/// Result type alias for MEMEM operations
pub type Result<T> = std::result::Result<T, Error>;
