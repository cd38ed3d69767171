//! Database gateway trait
//!
//! Defines the interface every backend implements. Calls are blocking; the
//! event loop runs them on worker threads so the UI never waits on I/O.

use crate::config::DatabaseUrl;
use crate::db::sqlite::SqliteDatabase;
use crate::db::types::QueryResults;
use crate::error::{DbError, DbResult};
use std::fmt::Debug;
use std::sync::Arc;

/// Main database gateway trait
///
/// Implementations must be shareable across worker threads.
pub trait Database: Send + Sync + Debug {
    /// Execute a SQL statement and return its rows as display strings
    ///
    /// # Errors
    /// Returns `DbError::QueryFailed` if the statement fails
    fn execute_query(&self, sql: &str) -> DbResult<QueryResults>;

    /// List the user tables
    ///
    /// # Errors
    /// Returns `DbError::SchemaLoadFailed` if the catalog cannot be read
    fn get_tables(&self) -> DbResult<Vec<String>>;

    /// Name of the connected database
    fn get_database_name(&self) -> DbResult<String>;
}

/// Shared handle to an open connection
pub type DbHandle = Arc<dyn Database>;

/// Open a connection for a URL, dispatching on its scheme
pub fn connect(url: &str) -> DbResult<DbHandle> {
    match DatabaseUrl::parse(url)? {
        DatabaseUrl::Sqlite { path } => {
            let db = SqliteDatabase::open(&path)?;
            Ok(Arc::new(db))
        }
        DatabaseUrl::Postgres(_) => Err(DbError::NotImplemented("PostgreSQL")),
        DatabaseUrl::MySql(_) => Err(DbError::NotImplemented("MySQL")),
    }
}
