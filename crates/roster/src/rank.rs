use std::fmt;

/// Guild membership tiers, highest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rank {
    Owner,
    Chief,
    Strategist,
    Captain,
    Recruiter,
    Recruit,
}

impl Rank {
    pub const ALL: [Rank; 6] = [
        Rank::Owner,
        Rank::Chief,
        Rank::Strategist,
        Rank::Captain,
        Rank::Recruiter,
        Rank::Recruit,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Owner => "owner",
            Self::Chief => "chief",
            Self::Strategist => "strategist",
            Self::Captain => "captain",
            Self::Recruiter => "recruiter",
            Self::Recruit => "recruit",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|rank| rank.as_str() == key)
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rank_keys_roundtrip() {
        for rank in Rank::ALL {
            assert_eq!(Rank::from_key(rank.as_str()), Some(rank));
        }
        assert_eq!(Rank::from_key("Owner"), None);
        assert_eq!(Rank::from_key("total"), None);
    }
}
