//! Engine module
//!
//! This module ties the catalog to the host: engine start and shutdown,
//! the handler factory, and the plugin descriptor.

pub mod config;
pub mod handler;

pub use config::EngineConfig;
pub use handler::Handler;

use std::sync::Arc;
use tracing::info;

use crate::catalog::Catalog;
use crate::error::Result;

/// Plugin maturity levels understood by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Maturity {
    Experimental,
    Alpha,
    Beta,
    Gamma,
    Stable,
}

/// Static description of the storage engine plugin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PluginInfo {
    pub name: &'static str,
    pub author: &'static str,
    pub description: &'static str,
    pub license: &'static str,
    /// Packed `major << 8 | minor`
    pub version: u16,
    pub version_string: &'static str,
    pub maturity: Maturity,
    /// The engine can re-create a table in place instead of requiring a drop
    pub can_recreate: bool,
}

pub const PLUGIN_INFO: PluginInfo = PluginInfo {
    name: "MEMEM",
    author: "MySQL AB",
    description: "In-memory table store (all data is lost on restart)",
    license: "GPL",
    version: 0x0100,
    version_string: "1.0",
    maturity: Maturity::Stable,
    can_recreate: true,
};

/// Build the host's table path for `table` in database `db`
pub fn qualified_table_name(db: &str, table: &str) -> String {
    format!("./{}/{}", db, table)
}

/// A running storage engine instance
#[derive(Debug)]
pub struct Engine {
    config: Arc<EngineConfig>,
    catalog: Arc<Catalog>,
}

impl Engine {
    /// Start the engine with an empty catalog
    pub fn start(config: EngineConfig) -> Self {
        let catalog = Arc::new(Catalog::with_capacity(
            config.initial_table_capacity,
            config.initial_row_capacity,
        ));
        info!(
            engine = PLUGIN_INFO.name,
            version = PLUGIN_INFO.version_string,
            "storage engine started"
        );
        Self {
            config: Arc::new(config),
            catalog,
        }
    }

    /// Shared catalog
    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    /// Create a handler for one table handle
    pub fn create_handler(&self) -> Handler {
        Handler::new(
            self.catalog.clone(),
            self.config.panic_on_invariant_violation,
        )
    }

    /// Stop the engine, discarding every table
    pub fn shutdown(self) -> Result<usize> {
        let dropped = self.catalog.clear()?;
        info!(tables = dropped, "storage engine stopped, tables discarded");
        Ok(dropped)
    }
}
