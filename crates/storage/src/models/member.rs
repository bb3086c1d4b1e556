use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// One guild member's contributed XP at a point in time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema)]
pub struct Member {
    #[validate(length(
        min = 1,
        max = 64,
        message = "Username must be between 1 and 64 characters"
    ))]
    pub username: String,
    pub xp: u64,
}

impl Member {
    pub fn new(username: impl Into<String>, xp: u64) -> Self {
        Self {
            username: username.into(),
            xp,
        }
    }
}
