//! Field types for MEMEM
//!
//! This module defines the field type tags a host schema can declare.
//! Only [`FieldType::Long`] is storable; the rest exist so that a schema
//! using them can be recognised and rejected.

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Host field type tags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldType {
    /// 8-bit integer
    Tiny,
    /// 16-bit integer
    Short,
    /// 32-bit signed integer
    Long,
    /// 64-bit integer
    LongLong,
    /// Single-precision floating point
    Float,
    /// Double-precision floating point
    Double,
    /// Variable-length character string with max length
    Varchar(usize),
    /// Binary data
    Blob,
    /// Date
    Date,
    /// Timestamp
    Timestamp,
}

impl FieldType {
    /// Check if rows of this type can be stored by the engine
    pub fn is_supported(&self) -> bool {
        matches!(self, FieldType::Long)
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldType::Tiny => write!(f, "TINYINT"),
            FieldType::Short => write!(f, "SMALLINT"),
            FieldType::Long => write!(f, "INT"),
            FieldType::LongLong => write!(f, "BIGINT"),
            FieldType::Float => write!(f, "FLOAT"),
            FieldType::Double => write!(f, "DOUBLE"),
            FieldType::Varchar(n) => write!(f, "VARCHAR({})", n),
            FieldType::Blob => write!(f, "BLOB"),
            FieldType::Date => write!(f, "DATE"),
            FieldType::Timestamp => write!(f, "TIMESTAMP"),
        }
    }
}

impl FromStr for FieldType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let lower = s.trim().to_ascii_lowercase();
        let ty = match lower.as_str() {
            "tinyint" => FieldType::Tiny,
            "smallint" => FieldType::Short,
            "int" | "integer" => FieldType::Long,
            "bigint" => FieldType::LongLong,
            "float" => FieldType::Float,
            "double" => FieldType::Double,
            "blob" => FieldType::Blob,
            "date" => FieldType::Date,
            "timestamp" => FieldType::Timestamp,
            other => {
                let len = other
                    .strip_prefix("varchar(")
                    .and_then(|rest| rest.strip_suffix(')'))
                    .and_then(|n| n.parse::<usize>().ok())
                    .ok_or_else(|| Error::UnknownFieldType(s.to_string()))?;
                FieldType::Varchar(len)
            }
        };
        Ok(ty)
    }
}
