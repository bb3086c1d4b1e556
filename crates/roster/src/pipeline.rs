use std::sync::Arc;

use storage::dto::weekly::WeeklyLeaderboard;
use storage::models::Leaderboard;
use storage::services::{LockEngine, LockOutcome, compute_difference};
use tracing::{debug, info};

use crate::Result;
use crate::normalize::compute_current_leaderboard;
use crate::traits::RosterSource;

/// One refresh: live roster, then the weekly lock, then the gains since the lock.
#[derive(Clone)]
pub struct WeeklyRefresh {
    source: Arc<dyn RosterSource>,
    engine: LockEngine,
}

impl WeeklyRefresh {
    pub fn new(source: Arc<dyn RosterSource>, engine: LockEngine) -> Self {
        Self { source, engine }
    }

    pub fn source(&self) -> &Arc<dyn RosterSource> {
        &self.source
    }

    pub fn engine(&self) -> &LockEngine {
        &self.engine
    }

    /// Fetches and normalizes the live roster.
    pub async fn current_leaderboard(&self) -> Result<Leaderboard> {
        let payload = self.source.fetch_roster().await?;
        let leaderboard = compute_current_leaderboard(&payload)?;
        debug!(members = leaderboard.len(), "Normalized guild roster");
        Ok(leaderboard)
    }

    /// Runs the whole pipeline. Roster failures abort before the snapshot
    /// store is touched.
    pub async fn refresh(&self, now: i64) -> Result<WeeklyLeaderboard> {
        let current = self.current_leaderboard().await?;
        let resolution = self.engine.resolve(&current, now).await?;

        if resolution.outcome != LockOutcome::Kept {
            info!(outcome = ?resolution.outcome, "Weekly lock evaluated");
        }

        let difference = compute_difference(&current, &resolution.locked_leaderboard);

        Ok(WeeklyLeaderboard::new(
            current,
            resolution.locked_leaderboard,
            difference,
            resolution.last_locked_time,
            now,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RosterError;
    use crate::models::PlayerProfile;
    use serde_json::{Value, json};
    use storage::models::{LockRecord, Member};
    use storage::services::ONE_WEEK_MS;
    use storage::{MemorySnapshotStore, SnapshotStore, StorageError};

    struct StaticRoster(Value);

    #[async_trait::async_trait]
    impl RosterSource for StaticRoster {
        async fn fetch_roster(&self) -> Result<Value> {
            Ok(self.0.clone())
        }

        async fn fetch_player(&self, name: &str) -> Result<PlayerProfile> {
            Err(RosterError::PlayerNotFound(name.to_string()))
        }
    }

    struct DownRoster;

    #[async_trait::async_trait]
    impl RosterSource for DownRoster {
        async fn fetch_roster(&self) -> Result<Value> {
            Err(RosterError::Status {
                status: 503,
                url: "http://roster.test/guild".to_string(),
            })
        }

        async fn fetch_player(&self, name: &str) -> Result<PlayerProfile> {
            Err(RosterError::PlayerNotFound(name.to_string()))
        }
    }

    fn roster() -> Value {
        json!({
            "members": {
                "owner": { "alice": { "contributed": 150 } },
                "recruit": { "alice": { "contributed": 20 }, "carol": { "contributed": 5 } }
            }
        })
    }

    fn locked() -> LockRecord {
        LockRecord::new(
            Leaderboard::from_members(vec![Member::new("alice", 100), Member::new("bob", 30)]),
            0,
        )
    }

    fn refresh_with(source: impl RosterSource + 'static, store: Arc<MemorySnapshotStore>) -> WeeklyRefresh {
        WeeklyRefresh::new(Arc::new(source), LockEngine::new(store))
    }

    #[tokio::test]
    async fn test_refresh_within_week() {
        let store = Arc::new(MemorySnapshotStore::with_record(locked()));
        let pipeline = refresh_with(StaticRoster(roster()), store.clone());

        let weekly = pipeline.refresh(1_000).await.unwrap();

        assert_eq!(weekly.last_locked_time, 0);
        assert_eq!(weekly.next_reset_at, ONE_WEEK_MS);
        assert_eq!(weekly.last_updated_time, 1_000);
        assert_eq!(weekly.locked_leaderboard, locked().locked);
        let diffs: Vec<(&str, i64)> = weekly
            .difference_leaderboard
            .iter()
            .map(|d| (d.username.as_str(), d.difference))
            .collect();
        assert_eq!(diffs, vec![("alice", 50), ("carol", 5), ("bob", -30)]);
        assert_eq!(store.read().await.unwrap(), locked());
    }

    #[tokio::test]
    async fn test_refresh_after_week_relocks() {
        let store = Arc::new(MemorySnapshotStore::with_record(locked()));
        let pipeline = refresh_with(StaticRoster(roster()), store.clone());

        let weekly = pipeline.refresh(ONE_WEEK_MS).await.unwrap();

        assert_eq!(weekly.last_locked_time, ONE_WEEK_MS);
        assert_eq!(weekly.locked_leaderboard, weekly.current_leaderboard);
        assert!(weekly.difference_leaderboard.iter().all(|d| d.difference == 0));
        assert_eq!(store.read().await.unwrap().last_locked_time, ONE_WEEK_MS);
    }

    #[tokio::test]
    async fn test_fetch_failure_leaves_store_untouched() {
        let store = Arc::new(MemorySnapshotStore::with_record(locked()));
        let pipeline = refresh_with(DownRoster, store.clone());

        let err = pipeline.refresh(ONE_WEEK_MS * 2).await.unwrap_err();

        assert!(err.is_fetch_failure());
        assert_eq!(store.read().await.unwrap(), locked());
    }

    #[tokio::test]
    async fn test_malformed_roster_leaves_store_untouched() {
        let store = Arc::new(MemorySnapshotStore::with_record(locked()));
        let pipeline = refresh_with(StaticRoster(json!({ "name": "Cats" })), store.clone());

        let err = pipeline.refresh(ONE_WEEK_MS * 2).await.unwrap_err();

        assert!(matches!(err, RosterError::MalformedRoster(_)));
        assert_eq!(store.read().await.unwrap(), locked());
    }

    #[tokio::test]
    async fn test_unseeded_store_surfaces() {
        let pipeline = refresh_with(StaticRoster(roster()), Arc::new(MemorySnapshotStore::new()));

        let err = pipeline.refresh(0).await.unwrap_err();

        assert!(matches!(
            err,
            RosterError::StorageError(StorageError::NoLockRecord)
        ));
    }
}
