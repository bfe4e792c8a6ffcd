// SQLite connection handle for the local cache.
// Opens the database, applies the schema and scopes transactions.

use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

use rusqlite::{Connection, Transaction};
use tracing::debug;

use crate::error::{GhUsersError, Result};

use super::schema::SCHEMA;

/// Shared handle to the cache database.
#[derive(Clone)]
pub struct CacheDb {
    conn: Arc<Mutex<Connection>>,
}

impl std::fmt::Debug for CacheDb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CacheDb").finish_non_exhaustive()
    }
}

impl CacheDb {
    /// Open or create the cache database at `path`.
    pub fn open(path: &Path) -> Result<Self> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        debug!(path = %path.display(), "opening cache database");
        let conn = Connection::open(path)?;
        Self::from_connection(conn)
    }

    /// Open a private in-memory database.
    #[cfg(test)]
    pub fn open_in_memory() -> Result<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        Self::migrate(&conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Run schema migrations (all statements are idempotent).
    fn migrate(conn: &Connection) -> Result<()> {
        conn.execute_batch(SCHEMA)?;
        Ok(())
    }

    /// Lock the connection. Never hold the guard across an await.
    pub fn conn(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| GhUsersError::Other("cache lock poisoned".to_string()))
    }

    /// Run `f` inside a single transaction, committing only if it succeeds.
    pub fn transaction<T>(&self, f: impl FnOnce(&Transaction<'_>) -> Result<T>) -> Result<T> {
        let mut conn = self.conn()?;
        let tx = conn.transaction()?;
        let value = f(&tx)?;
        tx.commit()?;
        Ok(value)
    }

    /// Schema version recorded in the database.
    #[cfg(test)]
    pub fn user_version(&self) -> Result<i64> {
        let conn = self.conn()?;
        let version = conn.query_row("PRAGMA user_version", [], |row| row.get(0))?;
        Ok(version)
    }

    /// Current unix timestamp, used for `fetched_at` columns.
    pub fn now() -> i64 {
        chrono::Utc::now().timestamp()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_open_creates_parent_dirs_and_schema() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("cache.db");

        let db = CacheDb::open(&path).unwrap();
        assert!(path.exists());
        assert_eq!(db.user_version().unwrap(), 1);
    }

    #[test]
    fn test_reopen_is_idempotent() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("cache.db");

        drop(CacheDb::open(&path).unwrap());
        let db = CacheDb::open(&path).unwrap();
        assert_eq!(db.user_version().unwrap(), 1);
    }

    #[test]
    fn test_failed_transaction_rolls_back() {
        let db = CacheDb::open_in_memory().unwrap();

        let result: Result<()> = db.transaction(|tx| {
            tx.execute("INSERT INTO remote_keys (user_id, next_key) VALUES (1, 1)", [])?;
            Err(GhUsersError::Other("boom".to_string()))
        });
        assert!(result.is_err());

        let count: i64 = db
            .conn()
            .unwrap()
            .query_row("SELECT COUNT(*) FROM remote_keys", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 0);
    }
}
