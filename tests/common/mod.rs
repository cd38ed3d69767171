//! Common test utilities and helpers
//!
//! Shared test infrastructure for the integration tests.

#![allow(dead_code)]

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use sqlpane::app::App;
use sqlpane::config::Settings;
use sqlpane::db::{Database, DatabaseSchema, QueryResults};
use sqlpane::error::DbResult;
use sqlpane::message::{Message, Task};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// In-memory database returning one fixed result set
#[derive(Debug)]
pub struct MockDatabase;

impl Database for MockDatabase {
    fn execute_query(&self, _sql: &str) -> DbResult<QueryResults> {
        Ok(QueryResults::new(
            vec!["id".to_string(), "name".to_string()],
            vec![vec!["1".to_string(), "test".to_string()]],
        ))
    }

    fn get_tables(&self) -> DbResult<Vec<String>> {
        Ok(vec!["users".to_string(), "orders".to_string()])
    }

    fn get_database_name(&self) -> DbResult<String> {
        Ok("test_db".to_string())
    }
}

pub fn test_schema() -> DatabaseSchema {
    DatabaseSchema::new("test_db", vec!["users".to_string(), "orders".to_string()])
}

/// App already connected to `MockDatabase`
pub fn connected_app() -> App {
    App::with_connection(Arc::new(MockDatabase), test_schema(), &Settings::default())
}

pub fn key(code: KeyCode) -> Message {
    Message::Key(KeyEvent::new(code, KeyModifiers::NONE))
}

pub fn ctrl(c: char) -> Message {
    Message::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL))
}

pub fn type_text(app: &mut App, text: &str) -> Vec<Task> {
    let mut tasks = Vec::new();
    for c in text.chars() {
        tasks.extend(app.update(key(KeyCode::Char(c))));
    }
    tasks
}

/// Deliver `Emit` tasks the way the event loop would. Returns the tasks
/// that need a worker.
pub fn drain(app: &mut App, tasks: Vec<Task>) -> Vec<Task> {
    let mut pending = Vec::new();
    let mut queue = tasks;
    while !queue.is_empty() {
        let mut next = Vec::new();
        for task in queue {
            if task.is_immediate() {
                next.extend(app.update(task.run()));
            } else {
                pending.push(task);
            }
        }
        queue = next;
    }
    pending
}

/// Run worker tasks inline and deliver everything until quiet
pub fn settle(app: &mut App, tasks: Vec<Task>) {
    let mut pending = drain(app, tasks);
    while !pending.is_empty() {
        let mut next = Vec::new();
        for task in pending {
            let tasks = app.update(task.run());
            next.extend(drain(app, tasks));
        }
        pending = next;
    }
}

/// Create a small SQLite database file with two related tables
pub fn create_sqlite_fixture(dir: &Path) -> PathBuf {
    let path = dir.join("shop.db");
    let conn = rusqlite::Connection::open(&path).unwrap();
    conn.execute_batch(
        "CREATE TABLE users (id INTEGER PRIMARY KEY, name TEXT, avatar BLOB);
         CREATE TABLE orders (
             id INTEGER PRIMARY KEY,
             user_id INTEGER REFERENCES users(id),
             total REAL
         );
         INSERT INTO users (id, name, avatar) VALUES (1, 'Alice', x'000102'), (2, NULL, NULL);
         INSERT INTO orders (id, user_id, total) VALUES (10, 1, 9.5);",
    )
    .unwrap();
    path
}
