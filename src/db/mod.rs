//! Database gateway
//!
//! `Database` is the seam between the UI and a driver. `connect` picks the
//! driver from the URL scheme; only SQLite is wired up.

pub mod provider;
pub mod schema;
pub mod sqlite;
pub mod types;

// Re-export main types
pub use provider::{Database, DbHandle, connect};
pub use schema::DatabaseSchema;
pub use types::QueryResults;
