//! SQLite backend
//!
//! Wraps a single `rusqlite::Connection` behind a mutex so worker threads
//! can share one handle.

use crate::db::provider::Database;
use crate::db::types::{NULL_DISPLAY, QueryResults};
use crate::error::{DbError, DbResult};
use rusqlite::types::ValueRef;
use rusqlite::{Connection, OpenFlags};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

const TABLES_QUERY: &str =
    "SELECT name FROM sqlite_master WHERE type = 'table' AND name NOT LIKE 'sqlite_%'";

#[derive(Debug)]
pub struct SqliteDatabase {
    conn: Mutex<Connection>,
    path: PathBuf,
}

impl SqliteDatabase {
    /// Open an existing database file and verify it answers.
    ///
    /// Never creates a file: a typo in the path should fail loudly instead of
    /// leaving an empty database behind.
    pub fn open(path: &Path) -> DbResult<Self> {
        if !path.exists() {
            return Err(DbError::ConnectionFailed(format!(
                "database file {} does not exist",
                path.display()
            )));
        }

        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .map_err(|e| DbError::ConnectionFailed(e.to_string()))?;

        // A non-database file opens fine and only fails on first read
        conn.query_row("SELECT count(*) FROM sqlite_master", [], |row| {
            row.get::<_, i64>(0)
        })
        .map_err(|e| DbError::ConnectionFailed(e.to_string()))?;

        tracing::info!(path = %path.display(), "Opened SQLite database");

        Ok(Self {
            conn: Mutex::new(conn),
            path: path.to_path_buf(),
        })
    }

    fn lock(&self) -> DbResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| DbError::ConnectionFailed("connection lock poisoned".to_string()))
    }
}

impl Database for SqliteDatabase {
    fn execute_query(&self, sql: &str) -> DbResult<QueryResults> {
        let conn = self.lock()?;
        let mut stmt = conn
            .prepare(sql)
            .map_err(|e| DbError::QueryFailed(e.to_string()))?;

        let columns: Vec<String> = stmt
            .column_names()
            .into_iter()
            .map(String::from)
            .collect();
        let width = columns.len();

        let mut rows = stmt
            .query([])
            .map_err(|e| DbError::QueryFailed(e.to_string()))?;

        let mut out = Vec::new();
        while let Some(row) = rows
            .next()
            .map_err(|e| DbError::QueryFailed(e.to_string()))?
        {
            let mut values = Vec::with_capacity(width);
            for i in 0..width {
                let value = row
                    .get_ref(i)
                    .map_err(|e| DbError::QueryFailed(e.to_string()))?;
                values.push(display_value(value));
            }
            out.push(values);
        }

        tracing::debug!(rows = out.len(), columns = width, "Query finished");
        Ok(QueryResults::new(columns, out))
    }

    fn get_tables(&self) -> DbResult<Vec<String>> {
        let conn = self.lock()?;
        let mut stmt = conn
            .prepare(TABLES_QUERY)
            .map_err(|e| DbError::SchemaLoadFailed(e.to_string()))?;
        let names = stmt
            .query_map([], |row| row.get::<_, String>(0))
            .map_err(|e| DbError::SchemaLoadFailed(e.to_string()))?
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| DbError::SchemaLoadFailed(e.to_string()))?;
        Ok(names)
    }

    fn get_database_name(&self) -> DbResult<String> {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .ok_or_else(|| DbError::QueryFailed("database path has no file name".to_string()))
    }
}

fn display_value(value: ValueRef<'_>) -> String {
    match value {
        ValueRef::Null => NULL_DISPLAY.to_string(),
        ValueRef::Integer(i) => i.to_string(),
        ValueRef::Real(f) => f.to_string(),
        ValueRef::Text(t) => String::from_utf8_lossy(t).into_owned(),
        ValueRef::Blob(b) => format!("<blob {} bytes>", b.len()),
    }
}
