use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::{DifferenceMember, Leaderboard, Member};
use crate::services::next_reset_at;

/// One complete refresh: live board, locked baseline and the weekly gains.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyLeaderboard {
    #[schema(value_type = Vec<Member>)]
    pub current_leaderboard: Leaderboard,
    #[schema(value_type = Vec<Member>)]
    pub locked_leaderboard: Leaderboard,
    pub difference_leaderboard: Vec<DifferenceMember>,
    pub last_locked_time: i64,
    pub next_reset_at: i64,
    pub last_updated_time: i64,
}

impl WeeklyLeaderboard {
    pub fn new(
        current_leaderboard: Leaderboard,
        locked_leaderboard: Leaderboard,
        difference_leaderboard: Vec<DifferenceMember>,
        last_locked_time: i64,
        last_updated_time: i64,
    ) -> Self {
        Self {
            current_leaderboard,
            locked_leaderboard,
            difference_leaderboard,
            last_locked_time,
            next_reset_at: next_reset_at(last_locked_time),
            last_updated_time,
        }
    }
}
