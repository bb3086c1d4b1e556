use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("No locked leaderboard has been seeded")]
    NoLockRecord,

    #[error("Write rejected: {0}")]
    WriteRejected(String),

    #[error("Snapshot store timed out during {0}")]
    Timeout(&'static str),
}

pub type Result<T> = std::result::Result<T, StorageError>;
