use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::models::{Leaderboard, Member};
use crate::services::LockResolution;

/// Body of `POST /api/leaderboard`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct LockRequest {
    #[validate(nested)]
    pub leaderboard: Vec<Member>,
}

impl LockRequest {
    /// Usernames must be unique within one snapshot.
    pub fn check_unique(&self) -> Result<(), String> {
        let leaderboard = Leaderboard::from_members(self.leaderboard.clone());
        match leaderboard.duplicate_username() {
            Some(name) => Err(format!("duplicate username '{}' in leaderboard", name)),
            None => Ok(()),
        }
    }

    pub fn into_leaderboard(self) -> Leaderboard {
        Leaderboard::from_members(self.leaderboard)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LockResponse {
    pub locked_leaderboard: Vec<Member>,
    pub last_locked_time: i64,
}

impl From<LockResolution> for LockResponse {
    fn from(resolution: LockResolution) -> Self {
        Self {
            locked_leaderboard: resolution.locked_leaderboard.into_members(),
            last_locked_time: resolution.last_locked_time,
        }
    }
}

/// Body of `POST /api/leaderboard/difference`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DifferenceRequest {
    #[validate(nested)]
    pub current_leaderboard: Vec<Member>,
    #[validate(nested)]
    pub locked_leaderboard: Vec<Member>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::LockOutcome;

    #[test]
    fn test_lock_response_wire_format() {
        let response = LockResponse::from(LockResolution {
            locked_leaderboard: Leaderboard::from_members(vec![Member::new("alice", 100)]),
            last_locked_time: 604_800_000,
            outcome: LockOutcome::Relocked,
        });

        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            serde_json::json!({
                "lockedLeaderboard": [{"username": "alice", "xp": 100}],
                "lastLockedTime": 604_800_000
            })
        );
    }

    #[test]
    fn test_lock_request_validation() {
        let valid: LockRequest = serde_json::from_value(serde_json::json!({
            "leaderboard": [{"username": "alice", "xp": 1}, {"username": "bob", "xp": 2}]
        }))
        .unwrap();
        assert!(valid.validate().is_ok());
        assert!(valid.check_unique().is_ok());

        let empty_name = LockRequest {
            leaderboard: vec![Member::new("", 1)],
        };
        assert!(empty_name.validate().is_err());

        let duplicated = LockRequest {
            leaderboard: vec![Member::new("alice", 1), Member::new("alice", 2)],
        };
        assert!(duplicated.check_unique().is_err());
    }
}
