//! Database schema and row types.

use crate::db::Connection as DbConnection;
use crate::error::Result;
use rusqlite::Row;

/// Schema management.
pub struct Schema;

impl Schema {
    /// Create the `posts` and `workers` tables unless they already exist.
    ///
    /// Safe to run on every invocation.
    pub fn init(conn: &mut DbConnection) -> Result<()> {
        conn.as_conn().execute_batch(
            "CREATE TABLE IF NOT EXISTS posts (
                post_id INTEGER PRIMARY KEY AUTOINCREMENT,
                post_title TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS workers (
                id INTEGER PRIMARY KEY,
                surname TEXT NOT NULL,
                name TEXT NOT NULL,
                phone TEXT NOT NULL,
                post_id INTEGER NOT NULL REFERENCES posts(post_id),
                date Date NOT NULL
            );",
        )?;
        Ok(())
    }

    /// Check whether both tables are present.
    pub fn is_initialized(conn: &DbConnection) -> bool {
        conn.table_exists("posts").unwrap_or(false) && conn.table_exists("workers").unwrap_or(false)
    }
}

/// Row representation of a post from the database.
#[derive(Debug, Clone)]
pub struct PostRow {
    pub post_id: i64,
    pub post_title: String,
}

impl PostRow {
    /// Create a PostRow from a SQLite row.
    pub fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            post_id: row.get("post_id")?,
            post_title: row.get("post_title")?,
        })
    }
}

/// Row representation of a worker from the database.
///
/// `date` stays as text here; it is parsed when converted to a model type.
#[derive(Debug, Clone)]
pub struct WorkerRow {
    pub id: i64,
    pub surname: String,
    pub name: String,
    pub phone: String,
    pub post_id: i64,
    pub date: String,
}

impl WorkerRow {
    /// Create a WorkerRow from a SQLite row.
    pub fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            surname: row.get("surname")?,
            name: row.get("name")?,
            phone: row.get("phone")?,
            post_id: row.get("post_id")?,
            date: row.get("date")?,
        })
    }
}

/// The display subset of a worker row.
#[derive(Debug, Clone)]
pub struct WorkerSummaryRow {
    pub surname: String,
    pub name: String,
    pub phone: String,
    pub date: String,
}

impl WorkerSummaryRow {
    /// Create a WorkerSummaryRow from a SQLite row.
    pub fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            surname: row.get("surname")?,
            name: row.get("name")?,
            phone: row.get("phone")?,
            date: row.get("date")?,
        })
    }
}
