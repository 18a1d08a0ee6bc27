//! PostgreSQL connection and schema.

use crate::config::PgConfig;
use crate::error::Result;
use postgres::{Client, NoTls, Transaction};

/// PostgreSQL connection wrapper.
pub struct PgConnection {
    client: Client,
}

impl PgConnection {
    /// Connect using the given parameters.
    pub fn connect(config: &PgConfig) -> Result<Self> {
        tracing::debug!(host = %config.host, port = config.port, database = %config.database, "connecting to postgres");
        let client = config.to_postgres().connect(NoTls)?;
        Ok(Self { client })
    }

    /// Create the `posts` and `workers` tables unless they already exist.
    pub fn init_schema(&mut self) -> Result<()> {
        self.client.batch_execute(
            "CREATE TABLE IF NOT EXISTS posts (
                post_id SERIAL PRIMARY KEY,
                post_title TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS workers (
                id SERIAL PRIMARY KEY,
                surname TEXT NOT NULL,
                name TEXT NOT NULL,
                phone TEXT NOT NULL,
                post_id INTEGER NOT NULL REFERENCES posts(post_id),
                date TEXT NOT NULL
            );",
        )?;
        Ok(())
    }

    /// Begin a transaction.
    pub fn transaction(&mut self) -> Result<Transaction<'_>> {
        Ok(self.client.transaction()?)
    }

    /// Get a mutable reference to the underlying client.
    pub fn client(&mut self) -> &mut Client {
        &mut self.client
    }
}
