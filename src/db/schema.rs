//! Database schema introspection
//!
//! The browsable shape of a connected database: its name and its tables.

use crate::db::provider::Database;
use crate::error::DbResult;

/// Placeholder shown when the driver cannot report a name
pub const UNKNOWN_DATABASE: &str = "Unknown db";

/// Schema snapshot taken right after connecting
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DatabaseSchema {
    /// Database name (file stem for SQLite)
    pub name: String,
    /// Table names in catalog order
    pub tables: Vec<String>,
}

impl DatabaseSchema {
    pub fn new(name: impl Into<String>, tables: Vec<String>) -> Self {
        Self {
            name: name.into(),
            tables,
        }
    }

    /// Introspect a live connection. A missing name is cosmetic and falls
    /// back to a placeholder; failing to list tables is an error.
    pub fn load(db: &dyn Database) -> DbResult<Self> {
        let name = match db.get_database_name() {
            Ok(name) => name,
            Err(e) => {
                tracing::warn!(error = %e, "Could not read database name");
                UNKNOWN_DATABASE.to_string()
            }
        };
        let tables = db.get_tables()?;
        Ok(Self { name, tables })
    }
}
