use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Trust profile of a publisher, keyed by registered domain.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SourceProfile {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub reliability: String,
    pub focus: String,
    #[serde(default)]
    pub certified: bool,
    #[serde(default)]
    pub badge: Option<String>,
}

impl SourceProfile {
    pub const EXTERNAL_NAME: &'static str = "External Source";

    /// Profile for a domain missing from the reputation table.
    pub fn web_source(domain: Option<&str>) -> Self {
        let name = match domain {
            Some(d) if !d.is_empty() => d.to_string(),
            _ => Self::EXTERNAL_NAME.to_string(),
        };
        Self {
            name,
            kind: "Web Source".to_string(),
            reliability: "Standard".to_string(),
            focus: "General Content".to_string(),
            certified: false,
            badge: None,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Tier {
    Golden = 1,
    Consensus = 2,
    Raw = 3,
}

impl From<Tier> for u8 {
    fn from(t: Tier) -> u8 {
        t as u8
    }
}

impl TryFrom<u8> for Tier {
    type Error = String;

    fn try_from(v: u8) -> Result<Self, Self::Error> {
        match v {
            1 => Ok(Tier::Golden),
            2 => Ok(Tier::Consensus),
            3 => Ok(Tier::Raw),
            other => Err(format!("tier out of range: {other}")),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct RankedSource {
    pub url: String,
    #[serde(rename = "meta")]
    pub profile: SourceProfile,
    #[serde(rename = "rank")]
    #[schemars(with = "u8")]
    pub tier: Tier,
    /// Hex SHA-256 of `url`, stable across runs.
    #[serde(rename = "sourceId")]
    pub source_id: String,
}

impl RankedSource {
    pub fn new(url: &str, profile: SourceProfile, tier: Tier) -> Self {
        Self {
            url: url.to_string(),
            profile,
            tier,
            source_id: source_id(url),
        }
    }
}

pub fn source_id(url: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(url.as_bytes());
    hex::encode(hasher.finalize())
}
