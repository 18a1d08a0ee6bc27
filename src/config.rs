//! Storage configuration.
//!
//! Built once at startup (normally from CLI flags and environment) and
//! handed to [`crate::core::open_store`].

use crate::db::DbPath;
use std::fmt;
use std::time::Duration;

/// Default connection-acquisition timeout for PostgreSQL.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Which database engine backs the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Backend {
    /// Embedded single-file database.
    #[default]
    Sqlite,
    /// Client-server database.
    Postgres,
}

impl Backend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Backend::Sqlite => "sqlite",
            Backend::Postgres => "postgres",
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// PostgreSQL connection parameters.
#[derive(Clone, PartialEq, Eq)]
pub struct PgConfig {
    pub host: String,
    pub port: u16,
    pub database: String,
    pub user: String,
    pub password: String,
    pub connect_timeout: Duration,
}

impl Default for PgConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 5432,
            database: "workers".to_string(),
            user: "postgres".to_string(),
            password: String::new(),
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
        }
    }
}

impl PgConfig {
    /// Convert into a `postgres::Config` ready to connect.
    pub fn to_postgres(&self) -> postgres::Config {
        let mut config = postgres::Config::new();
        config
            .host(&self.host)
            .port(self.port)
            .dbname(&self.database)
            .user(&self.user)
            .connect_timeout(self.connect_timeout);
        if !self.password.is_empty() {
            config.password(&self.password);
        }
        config
    }
}

// Hand-written so the password never ends up in logs.
impl fmt::Debug for PgConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PgConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database", &self.database)
            .field("user", &self.user)
            .field("password", &"***")
            .field("connect_timeout", &self.connect_timeout)
            .finish()
    }
}

/// Everything needed to open a store.
#[derive(Debug, Clone, Default)]
pub struct StoreConfig {
    pub backend: Backend,
    pub sqlite_path: DbPath,
    pub postgres: PgConfig,
}

impl StoreConfig {
    /// SQLite store at the given path.
    pub fn sqlite(path: DbPath) -> Self {
        Self {
            backend: Backend::Sqlite,
            sqlite_path: path,
            postgres: PgConfig::default(),
        }
    }

    /// PostgreSQL store with the given parameters.
    pub fn postgres(postgres: PgConfig) -> Self {
        Self {
            backend: Backend::Postgres,
            sqlite_path: DbPath::default(),
            postgres,
        }
    }
}
