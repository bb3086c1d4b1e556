use sqlx::PgPool;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use std::str::FromStr;
use std::time::Duration;

pub mod dto;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;
pub mod store;

pub use error::{Result, StorageError};
pub use store::{MemorySnapshotStore, SnapshotStore};

/// Shared Postgres connection pool.
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    pub async fn new(database_url: &str) -> Result<Self> {
        Self::with_timeout(database_url, Duration::from_secs(5)).await
    }

    /// Connects with a bounded acquire timeout. Every session also carries a
    /// server-side `statement_timeout` of the same length, so Postgres aborts
    /// a slow statement itself rather than finishing it after the caller has
    /// given up.
    pub async fn with_timeout(database_url: &str, timeout: Duration) -> Result<Self> {
        let options = PgConnectOptions::from_str(database_url)?
            .options([("statement_timeout", statement_timeout(timeout))]);

        let pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(timeout)
            .connect_with(options)
            .await?;

        Ok(Self { pool })
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }
}

fn statement_timeout(timeout: Duration) -> String {
    format!("{}ms", timeout.as_millis().max(1))
}
