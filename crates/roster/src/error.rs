use thiserror::Error;

pub type Result<T> = std::result::Result<T, RosterError>;

#[derive(Error, Debug)]
pub enum RosterError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("{url} returned status {status}")]
    Status { status: u16, url: String },

    #[error("Failed to parse JSON: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("Malformed roster: {0}")]
    MalformedRoster(String),

    #[error("Player '{0}' not found")]
    PlayerNotFound(String),

    #[error("Invalid API URL: {0}")]
    InvalidUrl(String),

    #[error("Storage error: {0}")]
    StorageError(#[from] storage::StorageError),
}

impl RosterError {
    /// The roster source was unreachable, slow or answered with an error.
    pub fn is_fetch_failure(&self) -> bool {
        matches!(self, Self::RequestError(_) | Self::Status { .. })
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::RequestError(e) if e.is_timeout())
    }
}
