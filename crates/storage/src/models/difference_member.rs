use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// XP gained (or lost, for members who left) since the last weekly lock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DifferenceMember {
    pub username: String,
    pub difference: i64,
}

impl DifferenceMember {
    pub fn new(username: impl Into<String>, difference: i64) -> Self {
        Self {
            username: username.into(),
            difference,
        }
    }
}
