use anyhow::{Context, Result};
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub guild_name: String,
    pub wynncraft_api_url: String,
    pub roster_timeout: Duration,
    pub store_timeout: Duration,
    pub lock_row_id: i32,
    pub lock_compare_and_swap: bool,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            host: std::env::var("HOST").context("Cannot load HOST env variable")?,
            port: std::env::var("PORT")
                .context("PORT must be a number")?
                .parse()?,
            database_url: std::env::var("DATABASE_URL")
                .context("Cannot load DATABASE_URL env variable")?,
            guild_name: std::env::var("GUILD_NAME").context("Cannot load GUILD_NAME env variable")?,
            wynncraft_api_url: std::env::var("WYNNCRAFT_API_URL")
                .unwrap_or_else(|_| roster::client::DEFAULT_API_URL.to_string()),
            roster_timeout: Duration::from_secs(
                parse_or("ROSTER_TIMEOUT_SECS", 10).context("ROSTER_TIMEOUT_SECS must be a number")?,
            ),
            store_timeout: Duration::from_secs(
                parse_or("STORE_TIMEOUT_SECS", 5).context("STORE_TIMEOUT_SECS must be a number")?,
            ),
            lock_row_id: parse_or("LOCK_ROW_ID", 1).context("LOCK_ROW_ID must be a number")?,
            lock_compare_and_swap: parse_flag(
                std::env::var("LOCK_COMPARE_AND_SWAP").ok().as_deref(),
            )
            .context("LOCK_COMPARE_AND_SWAP must be true or false")?,
        })
    }
}

fn parse_or<T: std::str::FromStr>(key: &str, default: T) -> Result<T>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => Ok(raw.trim().parse()?),
        Err(_) => Ok(default),
    }
}

fn parse_flag(raw: Option<&str>) -> Result<bool> {
    match raw.map(|s| s.trim().to_ascii_lowercase()).as_deref() {
        None | Some("") | Some("0") | Some("false") | Some("no") => Ok(false),
        Some("1") | Some("true") | Some("yes") => Ok(true),
        Some(other) => anyhow::bail!("unrecognized flag value '{}'", other),
    }
}
