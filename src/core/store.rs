//! Backend-independent store interface.

use crate::config::{Backend, StoreConfig};
use crate::core::{NewWorker, PgRepository, SqliteRepository, Worker, WorkerSummary};
use crate::error::Result;

/// Operations every storage backend provides.
pub trait Store {
    /// The backend this store talks to.
    fn backend(&self) -> Backend;

    /// Create the tables if they are missing.
    fn init_schema(&mut self) -> Result<()>;

    /// Get-or-create the post with this exact title and return its id.
    fn resolve_post(&mut self, title: &str) -> Result<i64>;

    /// Resolve the worker's post and insert the worker.
    fn add_worker(&mut self, worker: &NewWorker) -> Result<Worker>;

    /// All workers, in storage order.
    fn list_workers(&mut self) -> Result<Vec<WorkerSummary>>;

    /// First worker whose phone equals `phone` exactly.
    fn find_by_phone(&mut self, phone: &str) -> Result<Option<Worker>>;
}

/// Open the store described by `config`.
pub fn open_store(config: &StoreConfig) -> Result<Box<dyn Store>> {
    match config.backend {
        Backend::Sqlite => Ok(Box::new(SqliteRepository::open(&config.sqlite_path)?)),
        Backend::Postgres => Ok(Box::new(PgRepository::connect(&config.postgres)?)),
    }
}
