use serde::{Deserialize, Serialize};

use super::Leaderboard;

/// The persisted weekly baseline. Exactly one exists per guild.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LockRecord {
    pub locked: Leaderboard,
    /// Epoch milliseconds of the last successful lock.
    pub last_locked_time: i64,
}

impl LockRecord {
    pub fn new(locked: Leaderboard, last_locked_time: i64) -> Self {
        Self {
            locked,
            last_locked_time,
        }
    }
}
