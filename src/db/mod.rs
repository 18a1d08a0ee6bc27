//! Database layer for staffdb.
//!
//! Handles connections, schema creation, and row types for both backends.

mod connection;
pub mod pg;
pub mod schema;

pub use connection::{Connection, DbPath, BUSY_TIMEOUT};
pub use pg::PgConnection;
pub use schema::{PostRow, Schema, WorkerRow, WorkerSummaryRow};
