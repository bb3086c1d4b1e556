use std::time::Duration;

use reqwest::{StatusCode, Url};
use serde_json::Value;
use tracing::debug;

use crate::error::{Result, RosterError};
use crate::models::{PlayerProfile, PlayerResponse};
use crate::traits::RosterSource;

pub const DEFAULT_API_URL: &str = "https://api.wynncraft.com/v3";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// HTTP client for the Wynncraft v3 API, bound to one guild.
pub struct WynncraftClient {
    base_url: Url,
    guild: String,
    client: reqwest::Client,
}

impl WynncraftClient {
    pub fn new(guild: impl Into<String>) -> Result<Self> {
        Self::with_options(guild, DEFAULT_API_URL, DEFAULT_TIMEOUT)
    }

    pub fn with_options(guild: impl Into<String>, base_url: &str, timeout: Duration) -> Result<Self> {
        let base_url =
            Url::parse(base_url).map_err(|e| RosterError::InvalidUrl(format!("{}: {}", base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(RosterError::InvalidUrl(base_url.to_string()));
        }

        let client = reqwest::Client::builder()
            .user_agent(concat!("guild-weekly-xp/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()?;

        Ok(Self {
            base_url,
            guild: guild.into(),
            client,
        })
    }

    pub fn guild(&self) -> &str {
        &self.guild
    }

    /// Appends percent-encoded path segments to the base URL.
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| RosterError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get(&self, url: Url) -> Result<reqwest::Response> {
        debug!(url = %url, "GET");
        let response = self.client.get(url.clone()).send().await?;

        if !response.status().is_success() {
            return Err(RosterError::Status {
                status: response.status().as_u16(),
                url: url.to_string(),
            });
        }

        Ok(response)
    }
}

#[async_trait::async_trait]
impl RosterSource for WynncraftClient {
    async fn fetch_roster(&self) -> Result<Value> {
        let url = self.endpoint(&["guild", &self.guild])?;
        let response = self.get(url).await?;
        let bytes = response.bytes().await?;

        Ok(serde_json::from_slice(&bytes)?)
    }

    async fn fetch_player(&self, name: &str) -> Result<PlayerProfile> {
        let url = self.endpoint(&["player", name])?;

        let response = match self.get(url).await {
            Err(RosterError::Status { status, .. }) if status == StatusCode::NOT_FOUND.as_u16() => {
                return Err(RosterError::PlayerNotFound(name.to_string()));
            }
            other => other?,
        };

        let bytes = response.bytes().await?;
        let payload: PlayerResponse = serde_json::from_slice(&bytes)?;

        payload
            .into_profile()
            .ok_or_else(|| RosterError::PlayerNotFound(name.to_string()))
    }
}
