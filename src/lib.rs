//! MEMEM - a transient in-memory table store for a pluggable storage-engine layer
//!
//! This library provides:
//! - A catalog of named tables guarded by a single lock
//! - Append-only row storage in the host's record layout
//! - A record codec for fixed-width integer rows
//! - Per-handle table access (open, write, scan) and engine lifecycle
//!
//! Nothing is persisted; all tables are lost when the engine stops.

pub mod catalog;
pub mod engine;
pub mod error;
pub mod storage;

pub use engine::{Engine, EngineConfig, Handler};
pub use error::{Error, Result};
