use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Raw `GET /player/{name}` payload; the profile is the first entry of `data`.
#[derive(Debug, Deserialize)]
pub struct PlayerResponse {
    #[serde(default)]
    pub data: Vec<PlayerData>,
}

#[derive(Debug, Deserialize)]
pub struct PlayerData {
    pub username: String,
    pub rank: Option<String>,
    #[serde(default)]
    pub meta: PlayerMeta,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerMeta {
    pub level: Option<u64>,
    /// Minutes played.
    pub playtime: Option<f64>,
    pub first_join: Option<String>,
    pub last_join: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PlayerProfile {
    pub username: String,
    pub rank: Option<String>,
    pub level: Option<u64>,
    pub playtime: Option<f64>,
    pub first_join: Option<String>,
    pub last_join: Option<String>,
}

impl From<PlayerData> for PlayerProfile {
    fn from(data: PlayerData) -> Self {
        Self {
            username: data.username,
            rank: data.rank,
            level: data.meta.level,
            playtime: data.meta.playtime,
            first_join: data.meta.first_join,
            last_join: data.meta.last_join,
        }
    }
}

impl PlayerResponse {
    pub fn into_profile(self) -> Option<PlayerProfile> {
        self.data.into_iter().next().map(PlayerProfile::from)
    }
}
