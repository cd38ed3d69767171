//! Connection entries and URL parsing
//!
//! Connections live only in memory for the lifetime of the process. A
//! connection is a display name plus a URL whose scheme picks the driver.

use crate::error::{ConfigError, ConfigResult, DbError, DbResult};
use percent_encoding::{AsciiSet, CONTROLS, percent_decode_str, utf8_percent_encode};
use std::fmt;
use std::path::{Path, PathBuf};

/// Bytes escaped in SQLite URL paths. `%` must be escaped because parsing
/// decodes the path.
const PATH_ENCODE_SET: &AsciiSet = &CONTROLS.add(b' ').add(b'%');

/// A named database connection shown in the sidebar
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionConfig {
    /// Display name
    pub name: String,

    /// Connection URL, e.g. `sqlite:///data/app.db`
    pub url: String,
}

impl ConnectionConfig {
    /// Build a connection entry. An empty name falls back to the URL.
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        let url = url.into().trim().to_string();
        let name = name.into().trim().to_string();
        let name = if name.is_empty() { url.clone() } else { name };
        Self { name, url }
    }

    /// Get the config directory path (~/.sqlpane/)
    pub fn config_dir() -> ConfigResult<PathBuf> {
        let home = dirs::home_dir().ok_or(ConfigError::NoHomeDir)?;
        Ok(home.join(".sqlpane"))
    }
}

/// A parsed connection URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatabaseUrl {
    /// `sqlite:///<path>`
    Sqlite { path: PathBuf },
    /// `postgres://...` or `postgresql://...`
    Postgres(String),
    /// `mysql://...`
    MySql(String),
}

impl DatabaseUrl {
    /// Parse a connection URL and pick the driver from its scheme.
    ///
    /// SQLite paths follow the usual three-slash form: `sqlite:///app.db` is
    /// relative to the working directory, `sqlite:////var/app.db` is absolute.
    pub fn parse(url: &str) -> DbResult<Self> {
        let url = url.trim();
        let (scheme, rest) = url
            .split_once("://")
            .ok_or_else(|| DbError::InvalidUrl(format!("missing scheme in '{}'", url)))?;

        match scheme.to_ascii_lowercase().as_str() {
            "sqlite" => {
                let raw = rest.strip_prefix('/').ok_or_else(|| {
                    DbError::InvalidUrl("SQLite URLs must start with sqlite:///".to_string())
                })?;
                if raw.is_empty() {
                    return Err(DbError::InvalidUrl(
                        "missing database file path".to_string(),
                    ));
                }
                let decoded = percent_decode_str(raw)
                    .decode_utf8()
                    .map_err(|e| DbError::InvalidUrl(format!("bad path encoding: {}", e)))?;
                Ok(Self::Sqlite {
                    path: PathBuf::from(decoded.as_ref()),
                })
            }
            "postgres" | "postgresql" => Ok(Self::Postgres(url.to_string())),
            "mysql" => Ok(Self::MySql(url.to_string())),
            "" => Err(DbError::InvalidUrl(format!("missing scheme in '{}'", url))),
            other => Err(DbError::UnsupportedScheme(other.to_string())),
        }
    }

    /// Build a `sqlite:///` URL for a filesystem path
    pub fn sqlite_url(path: &Path) -> String {
        format!("sqlite:///{}", encode_path(path))
    }

    /// Human-readable driver name
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Sqlite { .. } => "SQLite",
            Self::Postgres(_) => "PostgreSQL",
            Self::MySql(_) => "MySQL",
        }
    }
}

impl fmt::Display for DatabaseUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sqlite { path } => write!(f, "sqlite:///{}", encode_path(path)),
            Self::Postgres(url) | Self::MySql(url) => f.write_str(url),
        }
    }
}

fn encode_path(path: &Path) -> String {
    utf8_percent_encode(&path.to_string_lossy(), PATH_ENCODE_SET).to_string()
}
