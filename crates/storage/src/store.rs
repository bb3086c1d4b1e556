use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::{Result, StorageError};
use crate::models::LockRecord;

/// Access to the single persisted locked-leaderboard row.
///
/// The lock engine only talks to persistence through this trait, so the
/// Postgres repository and the in-memory store are interchangeable.
///
/// `write` is last-write-wins: no atomic compare-and-swap is guaranteed, and
/// two refreshes that both observe an expired lock may both write. Writes
/// carrying an older `last_locked_time` than the stored one are rejected so
/// the timestamp never moves backwards. `write_if_unchanged` is the hardened
/// conditional variant.
#[async_trait]
pub trait SnapshotStore: Send + Sync {
    /// Fails with [`StorageError::NoLockRecord`] if the row was never seeded.
    async fn read(&self) -> Result<LockRecord>;

    /// A write that times out on the caller's side may still have been
    /// applied. Backends should abort the write themselves within the same
    /// bound (the Postgres pool sets `statement_timeout`); callers treat a
    /// timed-out write as failed and must tolerate finding it applied on the
    /// next read.
    async fn write(&self, record: &LockRecord) -> Result<()>;

    /// Writes only if the stored `last_locked_time` still equals `expected`.
    /// Returns `false` when another writer got there first.
    async fn write_if_unchanged(&self, expected: i64, record: &LockRecord) -> Result<bool>;

    /// Creates the row if it does not exist yet. Returns `false` if it did.
    async fn seed(&self, record: &LockRecord) -> Result<bool>;
}

/// Snapshot store kept in process memory.
#[derive(Debug, Default)]
pub struct MemorySnapshotStore {
    record: RwLock<Option<LockRecord>>,
}

impl MemorySnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_record(record: LockRecord) -> Self {
        Self {
            record: RwLock::new(Some(record)),
        }
    }
}

#[async_trait]
impl SnapshotStore for MemorySnapshotStore {
    async fn read(&self) -> Result<LockRecord> {
        self.record
            .read()
            .await
            .clone()
            .ok_or(StorageError::NoLockRecord)
    }

    async fn write(&self, record: &LockRecord) -> Result<()> {
        let mut guard = self.record.write().await;
        let current = guard.as_ref().ok_or(StorageError::NoLockRecord)?;

        if record.last_locked_time < current.last_locked_time {
            return Err(StorageError::WriteRejected(format!(
                "lock time {} is older than stored {}",
                record.last_locked_time, current.last_locked_time
            )));
        }

        *guard = Some(record.clone());
        Ok(())
    }

    async fn write_if_unchanged(&self, expected: i64, record: &LockRecord) -> Result<bool> {
        let mut guard = self.record.write().await;
        let current = guard.as_ref().ok_or(StorageError::NoLockRecord)?;

        if current.last_locked_time != expected {
            return Ok(false);
        }

        *guard = Some(record.clone());
        Ok(true)
    }

    async fn seed(&self, record: &LockRecord) -> Result<bool> {
        let mut guard = self.record.write().await;
        if guard.is_some() {
            return Ok(false);
        }

        *guard = Some(record.clone());
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Leaderboard, Member};

    fn record(xp: u64, at: i64) -> LockRecord {
        LockRecord::new(Leaderboard::from_members(vec![Member::new("alice", xp)]), at)
    }

    #[tokio::test]
    async fn test_read_unseeded_store() {
        let store = MemorySnapshotStore::new();
        assert!(matches!(
            store.read().await,
            Err(StorageError::NoLockRecord)
        ));
        assert!(matches!(
            store.write(&record(1, 1)).await,
            Err(StorageError::NoLockRecord)
        ));
    }

    #[tokio::test]
    async fn test_seed_only_once() {
        let store = MemorySnapshotStore::new();

        assert!(store.seed(&record(10, 100)).await.unwrap());
        assert!(!store.seed(&record(20, 200)).await.unwrap());
        assert_eq!(store.read().await.unwrap(), record(10, 100));
    }

    #[tokio::test]
    async fn test_write_last_write_wins() {
        let store = MemorySnapshotStore::with_record(record(10, 100));

        store.write(&record(20, 200)).await.unwrap();
        store.write(&record(30, 200)).await.unwrap();

        assert_eq!(store.read().await.unwrap(), record(30, 200));
    }

    #[tokio::test]
    async fn test_write_rejects_older_timestamp() {
        let store = MemorySnapshotStore::with_record(record(10, 500));

        let result = store.write(&record(20, 499)).await;

        assert!(matches!(result, Err(StorageError::WriteRejected(_))));
        assert_eq!(store.read().await.unwrap(), record(10, 500));
    }

    #[tokio::test]
    async fn test_write_if_unchanged() {
        let store = MemorySnapshotStore::with_record(record(10, 100));

        assert!(!store.write_if_unchanged(99, &record(20, 200)).await.unwrap());
        assert_eq!(store.read().await.unwrap(), record(10, 100));

        assert!(store.write_if_unchanged(100, &record(20, 200)).await.unwrap());
        assert_eq!(store.read().await.unwrap(), record(20, 200));
    }
}
