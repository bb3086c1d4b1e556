use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::{FromRow, PgPool};

use crate::error::{Result, StorageError};
use crate::models::{Leaderboard, LockRecord, Member};
use crate::store::SnapshotStore;

pub const DEFAULT_LOCK_ROW_ID: i32 = 1;

#[derive(FromRow)]
struct LockRow {
    locked: Json<Vec<Member>>,
    last_locked_time: i64,
}

impl From<LockRow> for LockRecord {
    fn from(row: LockRow) -> Self {
        LockRecord::new(Leaderboard::from_members(row.locked.0), row.last_locked_time)
    }
}

/// Postgres-backed snapshot store over the `weekly_leaderboard` table.
#[derive(Clone)]
pub struct LockRepository {
    pool: PgPool,
    row_id: i32,
}

impl LockRepository {
    pub fn new(pool: PgPool) -> Self {
        Self::with_row_id(pool, DEFAULT_LOCK_ROW_ID)
    }

    pub fn with_row_id(pool: PgPool, row_id: i32) -> Self {
        Self { pool, row_id }
    }

    pub fn row_id(&self) -> i32 {
        self.row_id
    }
}

#[async_trait]
impl SnapshotStore for LockRepository {
    async fn read(&self) -> Result<LockRecord> {
        let row = sqlx::query_as::<_, LockRow>(
            r#"
            SELECT locked, last_locked_time
            FROM weekly_leaderboard
            WHERE id = $1
            "#,
        )
        .bind(self.row_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(StorageError::NoLockRecord)?;

        Ok(row.into())
    }

    async fn write(&self, record: &LockRecord) -> Result<()> {
        // The timestamp guard keeps last_locked_time monotonic when two
        // writers race; it is not a compare-and-swap on the read value.
        let result = sqlx::query(
            r#"
            UPDATE weekly_leaderboard
            SET locked = $1, last_locked_time = $2
            WHERE id = $3 AND last_locked_time <= $2
            "#,
        )
        .bind(Json(record.locked.members()))
        .bind(record.last_locked_time)
        .bind(self.row_id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::WriteRejected(format!(
                "row {} missing or already locked after {}",
                self.row_id, record.last_locked_time
            )));
        }

        Ok(())
    }

    async fn write_if_unchanged(&self, expected: i64, record: &LockRecord) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE weekly_leaderboard
            SET locked = $1, last_locked_time = $2
            WHERE id = $3 AND last_locked_time = $4
            "#,
        )
        .bind(Json(record.locked.members()))
        .bind(record.last_locked_time)
        .bind(self.row_id)
        .bind(expected)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() == 1)
    }

    async fn seed(&self, record: &LockRecord) -> Result<bool> {
        let result = sqlx::query(
            r#"
            INSERT INTO weekly_leaderboard (id, locked, last_locked_time)
            VALUES ($1, $2, $3)
            ON CONFLICT (id) DO NOTHING
            "#,
        )
        .bind(self.row_id)
        .bind(Json(record.locked.members()))
        .bind(record.last_locked_time)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() == 1)
    }
}
