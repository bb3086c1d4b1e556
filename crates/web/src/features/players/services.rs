use roster::{PlayerProfile, Result, RosterSource};

pub async fn get_player(source: &dyn RosterSource, name: &str) -> Result<PlayerProfile> {
    source.fetch_player(name).await
}
