//! Core worker models and storage operations.

pub mod pg_repository;
pub mod post;
pub mod repository;
pub mod store;
pub mod worker;

pub use pg_repository::PgRepository;
pub use repository::SqliteRepository;
pub use store::{open_store, Store};
pub use worker::{NewWorker, Post, Worker, WorkerSummary};
