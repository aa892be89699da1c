use crate::core::error::{Result, ShelfmarkError};
use log::info;
use rusqlite::Connection;
use std::path::Path;

/// Owns the SQLite connection behind a catalog.
pub struct Storage {
    conn: Connection,
}

impl Storage {
    /// Opens or creates the catalog database at `path` and ensures the
    /// `books` schema exists. Applying the schema is idempotent, so the
    /// same call serves first runs and reopens alike.
    ///
    /// # Errors
    ///
    /// Returns [`ShelfmarkError::CatalogUnavailable`] if the file cannot
    /// be opened (permission error, a directory path) or the schema
    /// cannot be applied (the file exists but is not a SQLite database).
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path)
            .map_err(|e| ShelfmarkError::CatalogUnavailable(e.to_string()))?;
        Self::apply_schema(conn)
    }

    /// Opens an in-memory catalog, used by tests and ephemeral sessions.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()
            .map_err(|e| ShelfmarkError::CatalogUnavailable(e.to_string()))?;
        Self::apply_schema(conn)
    }

    fn apply_schema(conn: Connection) -> Result<Self> {
        conn.execute_batch(include_str!("schema.sql"))
            .map_err(|e| ShelfmarkError::CatalogUnavailable(e.to_string()))?;
        info!("catalog storage ready");
        Ok(Self { conn })
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Closes the underlying connection, surfacing any failure to flush.
    ///
    /// Dropping a `Storage` also releases the connection; `close` exists
    /// for callers that must observe the outcome.
    pub fn close(self) -> Result<()> {
        self.conn.close().map_err(|(_, e)| e.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_open_creates_schema() {
        let temp = NamedTempFile::new().unwrap();
        let storage = Storage::open(temp.path()).unwrap();

        let tables: Vec<String> = storage
            .connection()
            .prepare("SELECT name FROM sqlite_master WHERE type='table'")
            .unwrap()
            .query_map([], |row| row.get(0))
            .unwrap()
            .collect::<std::result::Result<_, _>>()
            .unwrap();

        assert!(tables.contains(&"books".to_string()));
    }

    #[test]
    fn test_open_is_idempotent() {
        let temp = NamedTempFile::new().unwrap();

        Storage::open(temp.path()).unwrap();

        // Reopening must not fail or clobber the schema.
        let storage = Storage::open(temp.path()).unwrap();
        let count: i64 = storage
            .connection()
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name='books'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn test_open_invalid_database() {
        let temp = NamedTempFile::new().unwrap();

        // A file that exists but is not SQLite.
        std::fs::write(temp.path(), "not a database").unwrap();

        let result = Storage::open(temp.path());
        assert!(matches!(
            result,
            Err(ShelfmarkError::CatalogUnavailable(_))
        ));
    }

    #[test]
    fn test_open_directory_path_fails() {
        let dir = tempfile::tempdir().unwrap();
        let result = Storage::open(dir.path());
        assert!(matches!(
            result,
            Err(ShelfmarkError::CatalogUnavailable(_))
        ));
    }

    #[test]
    fn test_close_releases_connection() {
        let temp = NamedTempFile::new().unwrap();
        let storage = Storage::open(temp.path()).unwrap();
        storage.close().unwrap();
    }
}
