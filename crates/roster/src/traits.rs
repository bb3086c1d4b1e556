use serde_json::Value;

use crate::Result;
use crate::models::PlayerProfile;

/// Where the live guild roster and player profiles come from.
#[async_trait::async_trait]
pub trait RosterSource: Send + Sync {
    /// Raw rank-partitioned roster payload.
    async fn fetch_roster(&self) -> Result<Value>;

    async fn fetch_player(&self, name: &str) -> Result<PlayerProfile>;
}
