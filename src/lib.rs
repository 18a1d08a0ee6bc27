//! # staffdb - worker registry
//!
//! Records employees ("workers") and their job titles ("posts") in two
//! normalized tables, stored in SQLite or PostgreSQL.

pub mod cli;
pub mod config;
pub mod core;
pub mod db;
pub mod error;

// Re-export commonly used types
pub use crate::config::{Backend, PgConfig, StoreConfig};
pub use crate::core::{open_store, NewWorker, Post, Store, Worker, WorkerSummary};
pub use crate::error::{Error, Result};
