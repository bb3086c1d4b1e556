use roster::WeeklyRefresh;
use storage::{
    dto::weekly::WeeklyLeaderboard,
    error::Result,
    models::{DifferenceMember, Leaderboard},
    services::{LockEngine, LockResolution, compute_difference},
};

/// Resolve the weekly lock against a leaderboard supplied by the caller
pub async fn resolve_lock(
    engine: &LockEngine,
    leaderboard: &Leaderboard,
    now: i64,
) -> Result<LockResolution> {
    engine.resolve(leaderboard, now).await
}

pub fn difference(current: &Leaderboard, locked: &Leaderboard) -> Vec<DifferenceMember> {
    compute_difference(current, locked)
}

/// Full refresh: live roster, weekly lock and gains since the lock
pub async fn weekly(refresh: &WeeklyRefresh, now: i64) -> roster::Result<WeeklyLeaderboard> {
    refresh.refresh(now).await
}
