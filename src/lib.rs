//! sqlpane - A keyboard-driven database browser for the terminal
//!
//! sqlpane shows three panes: a sidebar with connections and the schema of
//! the open database, a vim-flavoured SQL editor, and a results table.
//!
//! # Architecture
//!
//! Everything is driven by messages:
//!
//! - [`message`]: the `Message` and `Command` vocabulary
//! - [`app`]: routes each message to a pane and stamps follow-up work
//! - [`runtime`]: the event loop that owns the terminal and runs tasks
//! - [`ui`]: panes, text buffer, SQL highlighting and layout
//! - [`db`]: database gateway and schema introspection
//! - [`config`]: connection URLs and settings
//! - [`keymap`]: data-driven key bindings
//! - [`error`]: error types and result aliases
//!
//! # Example
//!
//! ```no_run
//! use sqlpane::db::{DatabaseSchema, connect};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let db = connect("sqlite:///shop.db")?;
//! let schema = DatabaseSchema::load(db.as_ref())?;
//! println!("{} has {} tables", schema.name, schema.tables.len());
//!
//! let results = db.execute_query("SELECT * FROM users")?;
//! println!("Got {} rows", results.row_count());
//! # Ok(())
//! # }
//! ```

pub mod app;
pub mod config;
pub mod db;
pub mod error;
pub mod keymap;
pub mod logging;
pub mod message;
pub mod runtime;
pub mod ui;

pub use error::{AppError, ConfigError, DbError, Result};
