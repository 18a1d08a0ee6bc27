//! PostgreSQL-backed worker repository.

use crate::config::{Backend, PgConfig};
use crate::core::worker::{format_date, parse_date, Worker, WorkerSummary};
use crate::core::{NewWorker, Store};
use crate::db::PgConnection;
use crate::error::Result;
use postgres::{GenericClient, Row};

/// Worker repository over a PostgreSQL server.
pub struct PgRepository {
    conn: PgConnection,
}

impl PgRepository {
    /// Connect using the given parameters.
    pub fn connect(config: &PgConfig) -> Result<Self> {
        let conn = PgConnection::connect(config)?;
        Ok(Self { conn })
    }
}

/// Get-or-create a post by title inside an open transaction.
///
/// The table lock serializes concurrent resolvers until commit, so the
/// same unseen title cannot be inserted twice.
fn resolve_in<C: GenericClient>(client: &mut C, title: &str) -> Result<i32> {
    client.batch_execute("LOCK TABLE posts IN SHARE ROW EXCLUSIVE MODE")?;

    let existing = client.query_opt(
        "SELECT post_id FROM posts WHERE post_title = $1 LIMIT 1",
        &[&title],
    )?;
    if let Some(row) = existing {
        let post_id: i32 = row.get(0);
        tracing::debug!(post_id, title, "post found");
        return Ok(post_id);
    }

    let row = client.query_one(
        "INSERT INTO posts (post_title) VALUES ($1) RETURNING post_id",
        &[&title],
    )?;
    let post_id: i32 = row.get(0);
    tracing::info!(post_id, title, "created post");
    Ok(post_id)
}

fn worker_from_row(row: &Row) -> Result<Worker> {
    let date: String = row.get("date");
    Ok(Worker {
        id: i64::from(row.get::<_, i32>("id")),
        surname: row.get("surname"),
        name: row.get("name"),
        phone: row.get("phone"),
        post_id: i64::from(row.get::<_, i32>("post_id")),
        date: parse_date(&date)?,
    })
}

impl Store for PgRepository {
    fn backend(&self) -> Backend {
        Backend::Postgres
    }

    fn init_schema(&mut self) -> Result<()> {
        self.conn.init_schema()
    }

    fn resolve_post(&mut self, title: &str) -> Result<i64> {
        let mut tx = self.conn.transaction()?;
        let post_id = resolve_in(&mut tx, title)?;
        tx.commit()?;
        Ok(i64::from(post_id))
    }

    fn add_worker(&mut self, worker: &NewWorker) -> Result<Worker> {
        let mut tx = self.conn.transaction()?;
        // SERIAL columns are int4.
        let post_id = resolve_in(&mut tx, &worker.post)?;
        let row = tx.query_one(
            "INSERT INTO workers (surname, name, post_id, phone, date)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING id, surname, name, phone, post_id, date",
            &[
                &worker.surname,
                &worker.name,
                &post_id,
                &worker.phone,
                &format_date(worker.date),
            ],
        )?;
        let added = worker_from_row(&row)?;
        tx.commit()?;

        tracing::info!(id = added.id, post_id, phone = %worker.phone, "added worker");
        Ok(added)
    }

    fn list_workers(&mut self) -> Result<Vec<WorkerSummary>> {
        tracing::debug!("listing workers");
        let rows = self
            .conn
            .client()
            .query("SELECT surname, name, phone, date FROM workers", &[])?;

        rows.iter()
            .map(|row| {
                let date: String = row.get("date");
                Ok(WorkerSummary {
                    surname: row.get("surname"),
                    name: row.get("name"),
                    phone: row.get("phone"),
                    date: parse_date(&date)?,
                })
            })
            .collect()
    }

    fn find_by_phone(&mut self, phone: &str) -> Result<Option<Worker>> {
        tracing::debug!(phone, "looking up worker by phone");
        let row = self.conn.client().query_opt(
            "SELECT id, surname, name, phone, post_id, date FROM workers WHERE phone = $1 LIMIT 1",
            &[&phone],
        )?;

        row.as_ref().map(worker_from_row).transpose()
    }
}
