//! Error types for staffdb.

/// Result type alias for staffdb operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error enum for staffdb.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// SQLite error (unreachable file, constraint violation, ...).
    #[error("Database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// PostgreSQL error.
    #[error("Database error: {0}")]
    Postgres(#[from] postgres::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Date of birth is not a `YYYY-MM-DD` calendar date.
    #[error("Invalid date: {0:?} (expected YYYY-MM-DD)")]
    InvalidDate(String),
}
