//! Configuration management
//!
//! Handles user settings and in-memory connection entries.

pub mod connections;
pub mod settings;

pub use connections::{ConnectionConfig, DatabaseUrl};
pub use settings::Settings;
