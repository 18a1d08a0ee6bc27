//! SQLite-backed worker repository.

use crate::config::Backend;
use crate::core::worker::{Worker, WorkerSummary};
use crate::core::{post, NewWorker, Store};
use crate::db::schema::{WorkerRow, WorkerSummaryRow};
use crate::db::{Connection, DbPath, Schema};
use crate::error::Result;
use rusqlite::OptionalExtension;

/// Worker repository over a SQLite file.
pub struct SqliteRepository {
    conn: Connection,
}

impl SqliteRepository {
    /// Open the database file, creating it if needed.
    pub fn open(path: &DbPath) -> Result<Self> {
        tracing::debug!(
            path = %path.as_path().display(),
            new = !path.exists(),
            "opening sqlite database"
        );
        let conn = Connection::open(path.as_path())?;
        Ok(Self { conn })
    }

    /// Open an in-memory repository for testing.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Ok(Self { conn })
    }

    /// Get the underlying connection.
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    fn get_worker(&self, id: i64) -> Result<Worker> {
        let row = self.conn.as_conn().query_row(
            "SELECT * FROM workers WHERE id = ?",
            [id],
            WorkerRow::from_row,
        )?;
        Worker::from_row(row)
    }
}

impl Store for SqliteRepository {
    fn backend(&self) -> Backend {
        Backend::Sqlite
    }

    fn init_schema(&mut self) -> Result<()> {
        if !Schema::is_initialized(&self.conn) {
            tracing::info!("creating posts and workers tables");
        }
        Schema::init(&mut self.conn)
    }

    fn resolve_post(&mut self, title: &str) -> Result<i64> {
        let tx = self.conn.write_transaction()?;
        let post_id = post::resolve(&tx, title)?;
        tx.commit()?;
        Ok(post_id)
    }

    fn add_worker(&mut self, worker: &NewWorker) -> Result<Worker> {
        let tx = self.conn.write_transaction()?;
        let post_id = post::resolve(&tx, &worker.post)?;
        // NaiveDate is written as `YYYY-MM-DD` text.
        tx.execute(
            "INSERT INTO workers (surname, name, post_id, phone, date) VALUES (?, ?, ?, ?, ?)",
            rusqlite::params![
                worker.surname,
                worker.name,
                post_id,
                worker.phone,
                worker.date,
            ],
        )?;
        let id = tx.last_insert_rowid();
        tx.commit()?;

        tracing::info!(id, post_id, phone = %worker.phone, "added worker");
        self.get_worker(id)
    }

    fn list_workers(&mut self) -> Result<Vec<WorkerSummary>> {
        tracing::debug!("listing workers");
        let mut stmt = self
            .conn
            .as_conn()
            .prepare("SELECT surname, name, phone, date FROM workers")?;
        let rows = stmt
            .query_map([], WorkerSummaryRow::from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        rows.into_iter().map(WorkerSummary::from_row).collect()
    }

    fn find_by_phone(&mut self, phone: &str) -> Result<Option<Worker>> {
        tracing::debug!(phone, "looking up worker by phone");
        let row = self
            .conn
            .as_conn()
            .query_row(
                "SELECT * FROM workers WHERE phone = ? LIMIT 1",
                [phone],
                WorkerRow::from_row,
            )
            .optional()?;

        row.map(Worker::from_row).transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::worker::parse_date;

    fn setup() -> SqliteRepository {
        let mut repo = SqliteRepository::open_in_memory().unwrap();
        repo.init_schema().unwrap();
        repo
    }

    fn new_worker(surname: &str, name: &str, post: &str, phone: &str, date: &str) -> NewWorker {
        NewWorker {
            surname: surname.to_string(),
            name: name.to_string(),
            post: post.to_string(),
            phone: phone.to_string(),
            date: parse_date(date).unwrap(),
        }
    }

    fn count(repo: &SqliteRepository, sql: &str) -> i64 {
        repo.conn()
            .as_conn()
            .query_row(sql, [], |r| r.get(0))
            .unwrap()
    }

    #[test]
    fn test_init_schema_twice() {
        let mut repo = setup();
        repo.init_schema().unwrap();
        assert_eq!(
            count(
                &repo,
                "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name IN ('posts', 'workers')"
            ),
            2
        );
    }

    #[test]
    fn test_resolve_post_same_title() {
        let mut repo = setup();
        let a = repo.resolve_post("Engineer").unwrap();
        let b = repo.resolve_post("Engineer").unwrap();
        assert_eq!(a, b);
        assert_eq!(count(&repo, "SELECT COUNT(*) FROM posts"), 1);
    }

    #[test]
    fn test_resolve_post_different_titles() {
        let mut repo = setup();
        let a = repo.resolve_post("Engineer").unwrap();
        let b = repo.resolve_post("Manager").unwrap();
        assert_ne!(a, b);
        assert_eq!(count(&repo, "SELECT COUNT(*) FROM posts"), 2);
    }

    #[test]
    fn test_add_worker_then_list() {
        let mut repo = setup();
        let added = repo
            .add_worker(&new_worker("Ivanov", "Ivan", "Engineer", "5551234", "1990-01-01"))
            .unwrap();

        assert_eq!(added.surname, "Ivanov");
        assert_eq!(added.post_id, repo.resolve_post("Engineer").unwrap());

        let workers = repo.list_workers().unwrap();
        assert_eq!(
            workers,
            vec![WorkerSummary {
                surname: "Ivanov".to_string(),
                name: "Ivan".to_string(),
                phone: "5551234".to_string(),
                date: parse_date("1990-01-01").unwrap(),
            }]
        );
    }

    #[test]
    fn test_list_workers_empty() {
        let mut repo = setup();
        assert!(repo.list_workers().unwrap().is_empty());
    }

    #[test]
    fn test_workers_share_post() {
        let mut repo = setup();
        let first = repo
            .add_worker(&new_worker("Petrov", "Petr", "Manager", "111", "1985-05-05"))
            .unwrap();
        let second = repo
            .add_worker(&new_worker("Sidorov", "Sidor", "Manager", "222", "1987-07-07"))
            .unwrap();

        assert_eq!(first.post_id, second.post_id);
        assert_eq!(
            count(&repo, "SELECT COUNT(*) FROM posts WHERE post_title = 'Manager'"),
            1
        );
        assert_eq!(count(&repo, "SELECT COUNT(*) FROM posts"), 1);
    }

    #[test]
    fn test_duplicate_workers_allowed() {
        let mut repo = setup();
        let worker = new_worker("Ivanov", "Ivan", "Engineer", "5551234", "1990-01-01");
        let a = repo.add_worker(&worker).unwrap();
        let b = repo.add_worker(&worker).unwrap();

        assert_ne!(a.id, b.id);
        assert_eq!(repo.list_workers().unwrap().len(), 2);
    }

    #[test]
    fn test_find_by_phone() {
        let mut repo = setup();
        let added = repo
            .add_worker(&new_worker("Ivanov", "Ivan", "Engineer", "5551234", "1990-01-01"))
            .unwrap();

        let found = repo.find_by_phone("5551234").unwrap();
        assert_eq!(found, Some(added));
    }

    #[test]
    fn test_find_by_phone_missing() {
        let mut repo = setup();
        repo.add_worker(&new_worker("Ivanov", "Ivan", "Engineer", "5551234", "1990-01-01"))
            .unwrap();

        assert_eq!(repo.find_by_phone("0000000").unwrap(), None);
        // No numeric coercion: a leading zero is a different phone.
        assert_eq!(repo.find_by_phone("05551234").unwrap(), None);
    }

    #[test]
    fn test_find_by_phone_first_match() {
        let mut repo = setup();
        let first = repo
            .add_worker(&new_worker("Ivanov", "Ivan", "Engineer", "5551234", "1990-01-01"))
            .unwrap();
        repo.add_worker(&new_worker("Petrov", "Petr", "Manager", "5551234", "1991-02-02"))
            .unwrap();

        let found = repo.find_by_phone("5551234").unwrap().unwrap();
        assert_eq!(found.id, first.id);
    }

    #[test]
    fn test_concurrent_adds_share_posts() {
        const THREADS: usize = 8;
        const TITLES: usize = 20;

        let dir = tempfile::TempDir::new().unwrap();
        let path = DbPath::new(dir.path().join("staff.db"));
        SqliteRepository::open(&path).unwrap().init_schema().unwrap();

        let handles: Vec<_> = (0..THREADS)
            .map(|t| {
                let path = path.clone();
                std::thread::spawn(move || {
                    let mut repo = SqliteRepository::open(&path).unwrap();
                    for i in 0..TITLES {
                        let post = format!("P{i}");
                        let phone = format!("{t}-{i}");
                        repo.add_worker(&new_worker("Ivanov", "Ivan", &post, &phone, "1990-01-01"))
                            .unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let repo = SqliteRepository::open(&path).unwrap();
        assert_eq!(count(&repo, "SELECT COUNT(*) FROM posts"), TITLES as i64);
        assert_eq!(
            count(&repo, "SELECT COUNT(DISTINCT post_title) FROM posts"),
            TITLES as i64
        );
        assert_eq!(
            count(&repo, "SELECT COUNT(*) FROM workers"),
            (THREADS * TITLES) as i64
        );
    }

    #[test]
    fn test_failed_insert_leaves_no_post() {
        let mut repo = setup();
        repo.conn()
            .as_conn()
            .execute_batch(
                "CREATE TRIGGER reject_workers BEFORE INSERT ON workers
                 BEGIN SELECT RAISE(ABORT, 'rejected'); END;",
            )
            .unwrap();

        let result = repo.add_worker(&new_worker("Ivanov", "Ivan", "Engineer", "5551234", "1990-01-01"));
        assert!(result.is_err());
        assert_eq!(count(&repo, "SELECT COUNT(*) FROM posts"), 0);
    }

    #[test]
    fn test_bad_stored_date_is_reported() {
        let mut repo = setup();
        let post_id = repo.resolve_post("Engineer").unwrap();
        repo.conn()
            .as_conn()
            .execute(
                "INSERT INTO workers (surname, name, phone, post_id, date) VALUES ('A', 'B', '1', ?, 'someday')",
                [post_id],
            )
            .unwrap();

        assert!(matches!(
            repo.list_workers(),
            Err(crate::error::Error::InvalidDate(_))
        ));
    }
}
