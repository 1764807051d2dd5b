use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::SessionError;

/// Scope of a user's authority. Tiers 3 and 4 live inside a franchise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Tier {
    GlobalSuperadmin = 1,
    GlobalAdmin = 2,
    FranchiseSuperadmin = 3,
    FranchiseRole = 4,
}

impl Tier {
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// Whether sessions at this tier must carry a franchise name
    pub fn requires_franchise(self) -> bool {
        matches!(self, Tier::FranchiseSuperadmin | Tier::FranchiseRole)
    }
}

impl TryFrom<u8> for Tier {
    type Error = SessionError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Tier::GlobalSuperadmin),
            2 => Ok(Tier::GlobalAdmin),
            3 => Ok(Tier::FranchiseSuperadmin),
            4 => Ok(Tier::FranchiseRole),
            other => Err(SessionError::InvalidTier(other.to_string())),
        }
    }
}

impl From<Tier> for u8 {
    fn from(tier: Tier) -> Self {
        tier.as_u8()
    }
}

impl FromStr for Tier {
    type Err = SessionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        trimmed
            .parse::<u8>()
            .map_err(|_| SessionError::InvalidTier(trimmed.to_string()))
            .and_then(Tier::try_from)
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_u8())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_cookie_encoded_tier() {
        assert_eq!(" 3 ".parse::<Tier>().unwrap(), Tier::FranchiseSuperadmin);
        assert_eq!("4".parse::<Tier>().unwrap(), Tier::FranchiseRole);
    }

    #[test]
    fn test_reject_unknown_tier() {
        assert!(matches!("0".parse::<Tier>(), Err(SessionError::InvalidTier(v)) if v == "0"));
        assert!(matches!("five".parse::<Tier>(), Err(SessionError::InvalidTier(_))));
        assert!(Tier::try_from(5).is_err());
    }

    #[test]
    fn test_serde_as_integer() {
        let json = serde_json::to_string(&Tier::GlobalAdmin).unwrap();
        assert_eq!(json, "2");

        let tier: Tier = serde_json::from_str("4").unwrap();
        assert_eq!(tier, Tier::FranchiseRole);
        assert!(serde_json::from_str::<Tier>("7").is_err());
    }

    #[test]
    fn test_franchise_requirement() {
        assert!(!Tier::GlobalSuperadmin.requires_franchise());
        assert!(!Tier::GlobalAdmin.requires_franchise());
        assert!(Tier::FranchiseSuperadmin.requires_franchise());
        assert!(Tier::FranchiseRole.requires_franchise());
    }
}
