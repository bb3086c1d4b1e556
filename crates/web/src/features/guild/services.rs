use serde_json::Value;
use storage::dto::guild::CurrentLeaderboardFilter;
use storage::models::Leaderboard;

use roster::{Result, WeeklyRefresh};

/// Raw roster payload, passed through unchanged
pub async fn fetch_roster(refresh: &WeeklyRefresh) -> Result<Value> {
    refresh.source().fetch_roster().await
}

/// Normalized live leaderboard, optionally cut to the top `limit` members
pub async fn current_leaderboard(
    refresh: &WeeklyRefresh,
    filter: &CurrentLeaderboardFilter,
) -> Result<Leaderboard> {
    let leaderboard = refresh.current_leaderboard().await?;

    Ok(match filter.limit {
        Some(limit) => roster::top_members(&leaderboard, limit as usize),
        None => leaderboard,
    })
}
