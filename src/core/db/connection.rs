//! Connection Module
//!
//! The connection descriptor names where the store lives; it is built once per
//! facade and turned into a `ConnectionSpec` that opens a fresh connection for
//! every call.

use crate::core::{DataError, Result};
use rusqlite::{Connection, OpenFlags};
use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Catalog used when none is configured
pub const DEFAULT_CATALOG: &str = "NorthWindAzure";

const CATALOG_EXTENSION: &str = "db";

/// Immutable description of the store to connect to.
///
/// `host` is the directory holding catalog files and `catalog` the database
/// file inside it. Safe to share across threads for concurrent reads.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ConnectionDescriptor {
    host: String,
    catalog: String,
}

impl ConnectionDescriptor {
    pub fn new(host: impl Into<String>, catalog: impl Into<String>) -> Self {
        ConnectionDescriptor {
            host: host.into(),
            catalog: catalog.into(),
        }
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn catalog(&self) -> &str {
        &self.catalog
    }

    /// Resolves the descriptor into the parameters used to open a connection.
    ///
    /// A catalog without an extension gets `.db` appended.
    pub fn build(&self) -> ConnectionSpec {
        let mut path = Path::new(&self.host).join(&self.catalog);
        if path.extension().is_none() {
            path.set_extension(CATALOG_EXTENSION);
        }

        ConnectionSpec {
            path,
            connection_string: format!(
                "Data Source={};Initial Catalog={}",
                self.host, self.catalog
            ),
        }
    }
}

impl Default for ConnectionDescriptor {
    fn default() -> Self {
        ConnectionDescriptor::new(".", DEFAULT_CATALOG)
    }
}

/// Resolved connection parameters derived from a `ConnectionDescriptor`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionSpec {
    path: PathBuf,
    connection_string: String,
}

impl ConnectionSpec {
    /// Path of the catalog file
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn connection_string(&self) -> &str {
        &self.connection_string
    }

    /// Opens a read-only connection to the catalog.
    ///
    /// The catalog is never created; a missing or unreadable file is
    /// `DataError::StoreUnavailable`. The connection closes when dropped.
    pub fn open(&self) -> Result<Connection> {
        debug!("Opening connection: {}", self.connection_string);
        let flags = OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX;

        Connection::open_with_flags(self.file_path(), flags).map_err(DataError::StoreUnavailable)
    }

    // The bundled SQLite parses any name starting with `file:` as a URI
    fn file_path(&self) -> PathBuf {
        if self.path.to_string_lossy().starts_with("file:") {
            Path::new(".").join(&self.path)
        } else {
            self.path.clone()
        }
    }
}

impl fmt::Display for ConnectionSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.connection_string)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_appends_extension() {
        let descriptor = ConnectionDescriptor::new("/srv/data", "NorthWindAzure");
        let spec = descriptor.build();

        assert_eq!(spec.path(), Path::new("/srv/data/NorthWindAzure.db"));
        assert_eq!(
            spec.connection_string(),
            "Data Source=/srv/data;Initial Catalog=NorthWindAzure"
        );
    }

    #[test]
    fn test_build_keeps_explicit_extension() {
        let spec = ConnectionDescriptor::new("data", "customers.sqlite3").build();
        assert_eq!(spec.path(), Path::new("data/customers.sqlite3"));
    }

    #[test]
    fn test_build_is_pure() {
        let descriptor = ConnectionDescriptor::default();
        assert_eq!(descriptor.build(), descriptor.build());
        assert_eq!(descriptor.catalog(), DEFAULT_CATALOG);
    }

    #[test]
    fn test_open_missing_catalog_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let spec = ConnectionDescriptor::new(dir.path().to_string_lossy(), "absent").build();

        match spec.open() {
            Err(DataError::StoreUnavailable(_)) => {}
            other => panic!("Expected StoreUnavailable, got {:?}", other.map(|_| ())),
        }
        assert!(!spec.path().exists(), "open must not create the catalog");
    }

    #[test]
    fn test_open_existing_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("present.db");
        Connection::open(&path)
            .unwrap()
            .execute_batch("CREATE TABLE t (id INTEGER);")
            .unwrap();

        let spec = ConnectionDescriptor::new(dir.path().to_string_lossy(), "present").build();
        let conn = spec.open().unwrap();
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM t", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 0);
    }

    #[test]
    fn test_open_treats_uri_like_catalog_as_plain_file() {
        let dir = tempfile::tempdir().unwrap();
        let real = dir.path().join("present.db");
        Connection::open(&real)
            .unwrap()
            .execute_batch("CREATE TABLE t (id INTEGER);")
            .unwrap();

        // As a URI this would name the real catalog; as a file it names nothing
        let spec = ConnectionDescriptor::new("", format!("file:{}", real.display())).build();
        assert!(spec.path().to_string_lossy().starts_with("file:"));
        assert!(matches!(spec.open(), Err(DataError::StoreUnavailable(_))));
    }
}
