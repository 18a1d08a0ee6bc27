//! CLI interface for staffdb.

pub mod output;

use crate::config::{Backend, PgConfig, StoreConfig};
use crate::core::worker::parse_date;
use crate::core::{open_store, NewWorker, Store};
use crate::db::DbPath;
use crate::error::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;

/// staffdb - worker registry
#[derive(Parser, Debug)]
#[command(name = "staffdb", version)]
#[command(about = "Управление базой данных работников", long_about = None)]
pub struct Cli {
    /// Путь к файлу базы данных
    #[arg(long, global = true, env = "STAFFDB_PATH", default_value = DbPath::DEFAULT_FILE)]
    pub db: PathBuf,

    /// Storage backend
    #[arg(long, global = true, env = "STAFFDB_BACKEND", value_enum, default_value_t = Backend::Sqlite)]
    pub backend: Backend,

    #[command(flatten)]
    pub pg: PgArgs,

    #[command(subcommand)]
    pub command: Command,
}

/// PostgreSQL connection options.
#[derive(Args, Debug)]
pub struct PgArgs {
    /// PostgreSQL host
    #[arg(long = "pg-host", global = true, env = "STAFFDB_PG_HOST", default_value = "localhost")]
    pub host: String,

    /// PostgreSQL port
    #[arg(long = "pg-port", global = true, env = "STAFFDB_PG_PORT", default_value_t = 5432)]
    pub port: u16,

    /// PostgreSQL database name
    #[arg(long = "pg-database", global = true, env = "STAFFDB_PG_DATABASE", default_value = "workers")]
    pub database: String,

    /// PostgreSQL user
    #[arg(long = "pg-user", global = true, env = "STAFFDB_PG_USER", default_value = "postgres")]
    pub user: String,

    /// PostgreSQL password
    #[arg(long = "pg-password", global = true, env = "STAFFDB_PG_PASSWORD", default_value = "", hide_env_values = true)]
    pub password: String,

    /// Seconds to wait for a PostgreSQL connection
    #[arg(long = "pg-connect-timeout", global = true, env = "STAFFDB_PG_CONNECT_TIMEOUT", default_value_t = 5)]
    pub connect_timeout: u64,
}

impl From<PgArgs> for PgConfig {
    fn from(args: PgArgs) -> Self {
        Self {
            host: args.host,
            port: args.port,
            database: args.database,
            user: args.user,
            password: args.password,
            connect_timeout: Duration::from_secs(args.connect_timeout),
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Добавить нового работника
    Add {
        /// Фамилия
        #[arg(long)]
        surname: String,
        /// Имя
        #[arg(long)]
        name: String,
        /// The worker's post
        #[arg(short = 'p', long)]
        post: String,
        /// Телефон
        #[arg(long)]
        phone: String,
        /// Дата рождения (YYYY-MM-DD)
        #[arg(long)]
        date: String,
    },

    /// Отобразить всех работников
    Display {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Select worker by phone
    Select {
        /// Phone number to look up
        #[arg(short = 'p', long)]
        phone: String,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

impl Cli {
    /// Split into the storage configuration and the command to run.
    pub fn into_parts(self) -> (StoreConfig, Command) {
        let config = StoreConfig {
            backend: self.backend,
            sqlite_path: DbPath::new(self.db),
            postgres: self.pg.into(),
        };
        (config, self.command)
    }
}

/// Run one command against an opened store and return what to print.
pub fn execute(store: &mut dyn Store, command: Command) -> Result<String> {
    store.init_schema()?;

    match command {
        Command::Add {
            surname,
            name,
            post,
            phone,
            date,
        } => {
            let worker = NewWorker {
                date: parse_date(&date)?,
                surname,
                name,
                post,
                phone,
            };
            store.add_worker(&worker)?;
            Ok(String::new())
        }

        Command::Display { json } => {
            let workers = store.list_workers()?;
            if json {
                Ok(format!("{}\n", serde_json::to_string_pretty(&workers)?))
            } else {
                Ok(output::format_list(&workers))
            }
        }

        Command::Select { phone, json } => {
            let worker = store.find_by_phone(&phone)?;
            if json {
                Ok(format!("{}\n", serde_json::to_string_pretty(&worker)?))
            } else {
                Ok(output::format_worker(worker.as_ref()))
            }
        }
    }
}

/// Run the CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let (config, command) = cli.into_parts();
    tracing::debug!(?command, "starting");

    let mut store = open_store(&config)?;
    tracing::debug!(backend = %store.backend(), "store opened");
    let out = execute(store.as_mut(), command)?;
    print!("{out}");
    Ok(())
}
