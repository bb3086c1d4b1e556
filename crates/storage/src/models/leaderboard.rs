use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::Member;

/// Members ordered by XP, highest first.
///
/// The ordering is enforced on construction, including when a leaderboard is
/// deserialized from a request body or from the snapshot store. Members with
/// equal XP keep the order in which they were supplied.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(from = "Vec<Member>", into = "Vec<Member>")]
pub struct Leaderboard(Vec<Member>);

impl Leaderboard {
    pub fn from_members(mut members: Vec<Member>) -> Self {
        // sort_by is stable, so ties keep insertion order
        members.sort_by(|a, b| b.xp.cmp(&a.xp));
        Self(members)
    }

    pub fn members(&self) -> &[Member] {
        &self.0
    }

    pub fn into_members(self) -> Vec<Member> {
        self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Member> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn xp_of(&self, username: &str) -> Option<u64> {
        self.0.iter().find(|m| m.username == username).map(|m| m.xp)
    }

    /// The `n` highest members.
    pub fn top(&self, n: usize) -> Leaderboard {
        Self(self.0.iter().take(n).cloned().collect())
    }

    /// First username that occurs more than once, if any.
    pub fn duplicate_username(&self) -> Option<&str> {
        let mut seen = HashSet::new();
        self.0
            .iter()
            .map(|m| m.username.as_str())
            .find(|name| !seen.insert(*name))
    }
}

impl From<Vec<Member>> for Leaderboard {
    fn from(members: Vec<Member>) -> Self {
        Self::from_members(members)
    }
}

impl From<Leaderboard> for Vec<Member> {
    fn from(leaderboard: Leaderboard) -> Self {
        leaderboard.0
    }
}

impl<'a> IntoIterator for &'a Leaderboard {
    type Item = &'a Member;
    type IntoIter = std::slice::Iter<'a, Member>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
