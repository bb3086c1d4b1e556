use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use crate::error::{Result, StorageError};
use crate::models::{Leaderboard, LockRecord};
use crate::store::SnapshotStore;

/// Length of the weekly window in milliseconds.
pub const ONE_WEEK_MS: i64 = 7 * 24 * 60 * 60 * 1000;

pub const DEFAULT_STORE_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockState {
    /// The lock is still inside its weekly window.
    Fresh,
    /// A full week has passed since the last lock.
    Stale,
}

impl LockState {
    pub fn evaluate(last_locked_time: i64, now: i64) -> Self {
        if now.saturating_sub(last_locked_time) >= ONE_WEEK_MS {
            Self::Stale
        } else {
            Self::Fresh
        }
    }
}

/// How a stale lock is replaced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LockPolicy {
    /// Plain overwrite. Concurrent refreshes that both see a stale lock both
    /// write and the later one wins.
    #[default]
    LastWriteWins,
    /// Conditional write keyed on the timestamp that was read.
    CompareAndSwap,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockOutcome {
    Kept,
    Relocked,
    WriteFailed,
    LostRace,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LockResolution {
    pub locked_leaderboard: Leaderboard,
    pub last_locked_time: i64,
    pub outcome: LockOutcome,
}

impl LockResolution {
    fn from_record(record: LockRecord, outcome: LockOutcome) -> Self {
        Self {
            locked_leaderboard: record.locked,
            last_locked_time: record.last_locked_time,
            outcome,
        }
    }
}

pub fn next_reset_at(last_locked_time: i64) -> i64 {
    last_locked_time.saturating_add(ONE_WEEK_MS)
}

/// Decides whether the weekly baseline is replaced by the current leaderboard.
#[derive(Clone)]
pub struct LockEngine {
    store: Arc<dyn SnapshotStore>,
    policy: LockPolicy,
    store_timeout: Duration,
}

impl LockEngine {
    pub fn new(store: Arc<dyn SnapshotStore>) -> Self {
        Self {
            store,
            policy: LockPolicy::default(),
            store_timeout: DEFAULT_STORE_TIMEOUT,
        }
    }

    pub fn with_policy(mut self, policy: LockPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_store_timeout(mut self, store_timeout: Duration) -> Self {
        self.store_timeout = store_timeout;
        self
    }

    /// Returns the effective locked leaderboard for `now`.
    ///
    /// A failed or timed-out read is fatal. A failed write is not: the
    /// previously stored record is returned and the caller carries on with
    /// the outdated baseline.
    pub async fn resolve(&self, current: &Leaderboard, now: i64) -> Result<LockResolution> {
        let previous = self.bounded("read", self.store.read()).await?;

        if LockState::evaluate(previous.last_locked_time, now) == LockState::Fresh {
            return Ok(LockResolution::from_record(previous, LockOutcome::Kept));
        }

        let next = LockRecord::new(current.clone(), now);

        match self.policy {
            LockPolicy::LastWriteWins => match self.bounded("write", self.store.write(&next)).await {
                Ok(()) => {
                    info!(
                        members = next.locked.len(),
                        previous_lock = previous.last_locked_time,
                        last_locked_time = now,
                        "Weekly leaderboard locked"
                    );
                    Ok(LockResolution::from_record(next, LockOutcome::Relocked))
                }
                Err(e) => {
                    warn!(error = %e, "Failed to write locked leaderboard, keeping previous lock");
                    Ok(LockResolution::from_record(previous, LockOutcome::WriteFailed))
                }
            },
            LockPolicy::CompareAndSwap => {
                let expected = previous.last_locked_time;
                match self
                    .bounded("write", self.store.write_if_unchanged(expected, &next))
                    .await
                {
                    Ok(true) => {
                        info!(
                            members = next.locked.len(),
                            previous_lock = expected,
                            last_locked_time = now,
                            "Weekly leaderboard locked"
                        );
                        Ok(LockResolution::from_record(next, LockOutcome::Relocked))
                    }
                    Ok(false) => {
                        info!(expected, "Another refresh locked the leaderboard first");
                        match self.bounded("read", self.store.read()).await {
                            Ok(winner) => {
                                Ok(LockResolution::from_record(winner, LockOutcome::LostRace))
                            }
                            Err(e) => {
                                warn!(error = %e, "Failed to re-read locked leaderboard");
                                Ok(LockResolution::from_record(previous, LockOutcome::LostRace))
                            }
                        }
                    }
                    Err(e) => {
                        warn!(error = %e, "Failed to write locked leaderboard, keeping previous lock");
                        Ok(LockResolution::from_record(previous, LockOutcome::WriteFailed))
                    }
                }
            }
        }
    }

    async fn bounded<T>(
        &self,
        operation: &'static str,
        fut: impl Future<Output = Result<T>>,
    ) -> Result<T> {
        tokio::time::timeout(self.store_timeout, fut)
            .await
            .map_err(|_| StorageError::Timeout(operation))?
    }
}
