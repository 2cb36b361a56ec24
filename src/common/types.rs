//! Unified types shared by the REST client, the sessions and the server

use serde::{Deserialize, Serialize};

use super::errors::ClientError;

/// Regional routing value used to pick the API host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Region {
    Americas,
    Europe,
    Asia,
    Sea,
}

impl Region {
    /// Routing value as it appears in the regional host name
    pub fn as_str(&self) -> &'static str {
        match self {
            Region::Americas => "americas",
            Region::Europe => "europe",
            Region::Asia => "asia",
            Region::Sea => "sea",
        }
    }

    /// Per-region platform host code
    pub fn platform_id(&self) -> &'static str {
        match self {
            Region::Americas => "na1",
            Region::Europe => "euw1",
            Region::Asia => "kr",
            Region::Sea => "sg2",
        }
    }
}

impl std::fmt::Display for Region {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Region {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "americas" => Ok(Region::Americas),
            "europe" => Ok(Region::Europe),
            "asia" => Ok(Region::Asia),
            "sea" => Ok(Region::Sea),
            other => Err(ClientError::Configuration(format!(
                "Unknown region: {}",
                other
            ))),
        }
    }
}

/// Opaque match identifier, e.g. `EUW1_6812345678`
pub type MatchId = String;
