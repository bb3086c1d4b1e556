use serde::Deserialize;
use utoipa::IntoParams;

pub const MAX_LEADERBOARD_LIMIT: u32 = 100;

#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct CurrentLeaderboardFilter {
    /// Only return the top `limit` members.
    pub limit: Option<u32>,
}

impl CurrentLeaderboardFilter {
    pub fn validate(&self) -> Result<(), String> {
        if let Some(limit) = self.limit
            && !(1..=MAX_LEADERBOARD_LIMIT).contains(&limit)
        {
            return Err(format!(
                "limit must be between 1 and {}",
                MAX_LEADERBOARD_LIMIT
            ));
        }
        Ok(())
    }
}
