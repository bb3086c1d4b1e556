use std::collections::{HashMap, HashSet};

use crate::models::{DifferenceMember, Leaderboard};

/// XP gained by each member since the locked snapshot, highest first.
///
/// Members only in `current` count from zero; members only in `locked`
/// (they left the guild) get the negation of their locked XP. Every username
/// appears once. Ties keep current-roster order, followed by departed members
/// in locked order.
pub fn compute_difference(current: &Leaderboard, locked: &Leaderboard) -> Vec<DifferenceMember> {
    let locked_xp: HashMap<&str, u64> = locked
        .iter()
        .map(|m| (m.username.as_str(), m.xp))
        .collect();

    let mut seen: HashSet<&str> = HashSet::with_capacity(current.len());
    let mut differences = Vec::with_capacity(current.len() + locked.len());

    for member in current {
        if !seen.insert(member.username.as_str()) {
            continue;
        }
        let baseline = locked_xp.get(member.username.as_str()).copied().unwrap_or(0);
        differences.push(DifferenceMember::new(
            member.username.clone(),
            signed(member.xp).saturating_sub(signed(baseline)),
        ));
    }

    for member in locked {
        if seen.insert(member.username.as_str()) {
            differences.push(DifferenceMember::new(
                member.username.clone(),
                signed(member.xp).saturating_neg(),
            ));
        }
    }

    differences.sort_by(|a, b| b.difference.cmp(&a.difference));
    differences
}

fn signed(xp: u64) -> i64 {
    i64::try_from(xp).unwrap_or(i64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Member;

    fn leaderboard(entries: &[(&str, u64)]) -> Leaderboard {
        Leaderboard::from_members(
            entries
                .iter()
                .map(|(name, xp)| Member::new(*name, *xp))
                .collect(),
        )
    }

    fn pairs(differences: &[DifferenceMember]) -> Vec<(&str, i64)> {
        differences
            .iter()
            .map(|d| (d.username.as_str(), d.difference))
            .collect()
    }

    #[test]
    fn test_member_left_guild() {
        let locked = leaderboard(&[("alice", 100), ("bob", 30)]);
        let current = leaderboard(&[("alice", 150)]);

        let differences = compute_difference(&current, &locked);

        assert_eq!(pairs(&differences), vec![("alice", 50), ("bob", -30)]);
    }

    #[test]
    fn test_new_member_counts_from_zero() {
        let locked = leaderboard(&[("alice", 100)]);
        let current = leaderboard(&[("alice", 110), ("newbie", 40)]);

        let differences = compute_difference(&current, &locked);

        assert_eq!(pairs(&differences), vec![("newbie", 40), ("alice", 10)]);
    }

    #[test]
    fn test_empty_inputs() {
        assert!(compute_difference(&Leaderboard::default(), &Leaderboard::default()).is_empty());

        let only_locked = compute_difference(&Leaderboard::default(), &leaderboard(&[("a", 5)]));
        assert_eq!(pairs(&only_locked), vec![("a", -5)]);

        let only_current = compute_difference(&leaderboard(&[("a", 5)]), &Leaderboard::default());
        assert_eq!(pairs(&only_current), vec![("a", 5)]);
    }

    #[test]
    fn test_every_username_once_and_sorted() {
        let locked = leaderboard(&[("a", 10), ("b", 20), ("c", 30), ("d", 5)]);
        let current = leaderboard(&[("a", 15), ("c", 30), ("e", 1), ("b", 100)]);

        let differences = compute_difference(&current, &locked);

        let mut names: Vec<&str> = differences.iter().map(|d| d.username.as_str()).collect();
        names.sort();
        assert_eq!(names, vec!["a", "b", "c", "d", "e"]);

        assert!(
            differences
                .windows(2)
                .all(|w| w[0].difference >= w[1].difference)
        );

        for d in &differences {
            let expected = match current.xp_of(&d.username) {
                Some(xp) => xp as i64 - locked.xp_of(&d.username).unwrap_or(0) as i64,
                None => -(locked.xp_of(&d.username).unwrap() as i64),
            };
            assert_eq!(d.difference, expected, "difference for {}", d.username);
        }
    }

    #[test]
    fn test_ties_keep_roster_order_then_departed() {
        let locked = leaderboard(&[("gone", 0), ("x", 10), ("y", 10)]);
        let current = leaderboard(&[("x", 10), ("y", 10)]);

        let differences = compute_difference(&current, &locked);

        assert_eq!(pairs(&differences), vec![("x", 0), ("y", 0), ("gone", 0)]);
    }

    #[test]
    fn test_xp_loss_is_negative() {
        let locked = leaderboard(&[("alice", 100)]);
        let current = leaderboard(&[("alice", 60)]);

        assert_eq!(
            pairs(&compute_difference(&current, &locked)),
            vec![("alice", -40)]
        );
    }
}
