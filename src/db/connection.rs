//! SQLite connection management.

use crate::error::{Error, Result};
use rusqlite::{Connection as SqliteConnection, Transaction, TransactionBehavior};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// How long a writer waits on a locked database file before giving up.
pub const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Path to the worker database file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DbPath {
    path: PathBuf,
}

impl DbPath {
    /// Default filename, relative to the working directory.
    pub const DEFAULT_FILE: &'static str = "workers.db";

    /// Create a new DbPath with the default filename "workers.db".
    pub fn default_path() -> Self {
        Self {
            path: PathBuf::from(Self::DEFAULT_FILE),
        }
    }

    /// Create a DbPath from a string path.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Get the path as a reference.
    pub fn as_path(&self) -> &Path {
        &self.path
    }

    /// Check if the database file exists.
    pub fn exists(&self) -> bool {
        self.path.exists()
    }
}

impl Default for DbPath {
    fn default() -> Self {
        Self::default_path()
    }
}

/// Database connection wrapper.
pub struct Connection {
    conn: SqliteConnection,
}

impl Connection {
    /// Open (creating if needed) the database at the given path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = SqliteConnection::open(path)?;
        Self::configure(conn)
    }

    /// Open an in-memory database for testing.
    pub fn open_in_memory() -> Result<Self> {
        let conn = SqliteConnection::open_in_memory()?;
        Self::configure(conn)
    }

    fn configure(conn: SqliteConnection) -> Result<Self> {
        conn.busy_timeout(BUSY_TIMEOUT)?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        Ok(Self { conn })
    }

    /// Begin a write transaction that takes the database lock up front.
    ///
    /// Read-then-write sequences run inside this so that two processes
    /// cannot interleave between the read and the write.
    pub fn write_transaction(&mut self) -> Result<Transaction<'_>> {
        self.conn
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .map_err(Error::from)
    }

    /// Get a reference to the underlying SqliteConnection.
    pub fn as_conn(&self) -> &SqliteConnection {
        &self.conn
    }

    /// Check if a table exists.
    pub fn table_exists(&self, table_name: &str) -> Result<bool> {
        let mut stmt = self
            .conn
            .prepare("SELECT name FROM sqlite_master WHERE type='table' AND name=?")?;
        Ok(stmt.exists([table_name])?)
    }
}
