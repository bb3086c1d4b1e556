use std::collections::HashMap;

use serde_json::Value;
use storage::models::{Leaderboard, Member};
use tracing::{debug, warn};

use crate::error::{Result, RosterError};
use crate::rank::Rank;

/// Flattens a rank-partitioned roster payload into a leaderboard.
///
/// Expects `{ "members": { "<rank>": { "<username>": { "contributed": ... } } } }`.
/// Ranks that are absent or `null` are empty. A member listed under several
/// ranks keeps the highest contributed value seen.
pub fn compute_current_leaderboard(payload: &Value) -> Result<Leaderboard> {
    let members = payload
        .get("members")
        .and_then(Value::as_object)
        .ok_or_else(|| RosterError::MalformedRoster("missing 'members' object".to_string()))?;

    for key in members.keys() {
        if Rank::from_key(key).is_none() {
            debug!(key = %key, "Ignoring non-rank key in roster");
        }
    }

    let mut index: HashMap<String, usize> = HashMap::new();
    let mut ranks_seen: Vec<Rank> = Vec::new();
    let mut entries: Vec<Member> = Vec::new();

    for rank in Rank::ALL {
        let bucket = match members.get(rank.as_str()) {
            None | Some(Value::Null) => continue,
            Some(Value::Object(bucket)) => bucket,
            Some(other) => {
                return Err(RosterError::MalformedRoster(format!(
                    "rank '{}' is not an object (found {})",
                    rank,
                    json_kind(other)
                )));
            }
        };

        for (username, record) in bucket {
            let xp = contributed_xp(record);

            match index.get(username) {
                Some(&position) => {
                    let existing = &mut entries[position];
                    warn!(
                        username = %username,
                        first_rank = %ranks_seen[position],
                        duplicate_rank = %rank,
                        "Member listed under more than one rank"
                    );
                    existing.xp = existing.xp.max(xp);
                }
                None => {
                    index.insert(username.clone(), entries.len());
                    ranks_seen.push(rank);
                    entries.push(Member::new(username.clone(), xp));
                }
            }
        }
    }

    Ok(Leaderboard::from_members(entries))
}

/// The `n` highest members of the live roster.
pub fn top_members(leaderboard: &Leaderboard, n: usize) -> Leaderboard {
    leaderboard.top(n)
}

/// Missing or non-numeric values count as zero.
fn contributed_xp(record: &Value) -> u64 {
    match record.get("contributed") {
        Some(Value::Number(n)) => n.as_u64().unwrap_or_else(|| {
            n.as_f64().map(float_to_xp).unwrap_or(0)
        }),
        Some(Value::String(s)) => parse_xp(s),
        _ => 0,
    }
}

fn parse_xp(raw: &str) -> u64 {
    let raw = raw.trim();
    raw.parse::<u64>()
        .ok()
        .or_else(|| raw.parse::<f64>().ok().map(float_to_xp))
        .unwrap_or(0)
}

fn float_to_xp(value: f64) -> u64 {
    if value.is_finite() && value > 0.0 {
        // saturating float-to-int cast
        value.trunc() as u64
    } else {
        0
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn pairs(leaderboard: &Leaderboard) -> Vec<(&str, u64)> {
        leaderboard
            .iter()
            .map(|m| (m.username.as_str(), m.xp))
            .collect()
    }

    #[test]
    fn test_duplicate_member_keeps_max() {
        let payload = json!({
            "members": {
                "owner": { "alice": { "contributed": 100 } },
                "recruit": {
                    "alice": { "contributed": 50 },
                    "bob": { "contributed": 30 }
                }
            }
        });

        let leaderboard = compute_current_leaderboard(&payload).unwrap();

        assert_eq!(pairs(&leaderboard), vec![("alice", 100), ("bob", 30)]);
    }

    #[test]
    fn test_duplicate_max_not_sum_or_last() {
        let payload = json!({
            "members": {
                "chief": { "carol": { "contributed": 20 } },
                "captain": { "carol": { "contributed": 70 } },
                "recruit": { "carol": { "contributed": 40 } }
            }
        });

        let leaderboard = compute_current_leaderboard(&payload).unwrap();

        assert_eq!(pairs(&leaderboard), vec![("carol", 70)]);
    }

    #[test]
    fn test_missing_or_non_numeric_contributed_is_zero() {
        let payload = json!({
            "members": {
                "captain": {
                    "missing": {},
                    "null": { "contributed": null },
                    "word": { "contributed": "lots" },
                    "flag": { "contributed": true },
                    "negative": { "contributed": -12 },
                    "numeric_string": { "contributed": " 250 " },
                    "float": { "contributed": 12.9 },
                    "float_string": { "contributed": "3.5" }
                }
            }
        });

        let leaderboard = compute_current_leaderboard(&payload).unwrap();

        assert_eq!(leaderboard.xp_of("missing"), Some(0));
        assert_eq!(leaderboard.xp_of("null"), Some(0));
        assert_eq!(leaderboard.xp_of("word"), Some(0));
        assert_eq!(leaderboard.xp_of("flag"), Some(0));
        assert_eq!(leaderboard.xp_of("negative"), Some(0));
        assert_eq!(leaderboard.xp_of("numeric_string"), Some(250));
        assert_eq!(leaderboard.xp_of("float"), Some(12));
        assert_eq!(leaderboard.xp_of("float_string"), Some(3));
        assert_eq!(leaderboard.len(), 8);
    }

    #[test]
    fn test_output_sorted_descending() {
        let payload = json!({
            "members": {
                "owner": { "a": { "contributed": 5 } },
                "strategist": { "b": { "contributed": 500 }, "c": { "contributed": 50 } },
                "recruiter": { "d": { "contributed": 5000 } },
                "recruit": { "e": { "contributed": 0 } }
            }
        });

        let leaderboard = compute_current_leaderboard(&payload).unwrap();

        assert!(leaderboard.members().windows(2).all(|w| w[0].xp >= w[1].xp));
        assert_eq!(
            pairs(&leaderboard),
            vec![("d", 5000), ("b", 500), ("c", 50), ("a", 5), ("e", 0)]
        );
    }

    #[test]
    fn test_missing_ranks_are_empty() {
        let payload = json!({
            "members": {
                "total": 1,
                "chief": null,
                "recruit": { "solo": { "contributed": 9 } }
            }
        });

        let leaderboard = compute_current_leaderboard(&payload).unwrap();
        assert_eq!(pairs(&leaderboard), vec![("solo", 9)]);

        let empty = compute_current_leaderboard(&json!({ "members": {} })).unwrap();
        assert!(empty.is_empty());
    }

    #[test]
    fn test_malformed_payloads() {
        for payload in [
            json!({}),
            json!({ "members": [] }),
            json!({ "members": "owner" }),
            json!([1, 2, 3]),
            json!({ "members": { "owner": [] } }),
        ] {
            assert!(
                matches!(
                    compute_current_leaderboard(&payload),
                    Err(RosterError::MalformedRoster(_))
                ),
                "expected malformed roster for {}",
                payload
            );
        }
    }

    #[test]
    fn test_top_members() {
        let payload = json!({
            "members": {
                "recruit": {
                    "a": { "contributed": 1 },
                    "b": { "contributed": 2 },
                    "c": { "contributed": 3 },
                    "d": { "contributed": 4 }
                }
            }
        });

        let leaderboard = compute_current_leaderboard(&payload).unwrap();

        assert_eq!(
            pairs(&top_members(&leaderboard, 3)),
            vec![("d", 4), ("c", 3), ("b", 2)]
        );
    }
}
