use crate::error::VerifyError;
use crate::reputation::ReputationTable;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_MODEL: &str = "gpt-4o";
pub const DEFAULT_GENERATION_TIMEOUT_SECS: u64 = 45;

/// Highest-trust domains: government and certified fact-checkers.
pub const GOLDEN_DOMAINS: [&str; 4] = ["pib.gov", "boomlive.in", "factly.in", "altnews.in"];

/// Credible mainstream outlets.
pub const CONSENSUS_DOMAINS: [&str; 5] = [
    "thehindu.com",
    "indianexpress.com",
    "reuters.com",
    "apnews.com",
    "aniin.com",
];

/// Read-only trust configuration shared by every run.
///
/// Entries of the two domain lists are matched as substrings of the
/// lowercased URL, so `pib.gov` also covers `pib.gov.in`.
#[derive(Clone, Debug, Deserialize)]
pub struct SourcePolicy {
    pub golden: Vec<String>,
    pub consensus: Vec<String>,
    #[serde(default)]
    pub reputation: ReputationTable,
}

impl Default for SourcePolicy {
    fn default() -> Self {
        Self {
            golden: GOLDEN_DOMAINS.iter().map(|d| d.to_string()).collect(),
            consensus: CONSENSUS_DOMAINS.iter().map(|d| d.to_string()).collect(),
            reputation: ReputationTable::default(),
        }
    }
}

impl SourcePolicy {
    pub fn from_toml_str(raw: &str) -> Result<Self, VerifyError> {
        let mut policy: SourcePolicy =
            toml::from_str(raw).map_err(|e| VerifyError::Config(e.to_string()))?;
        policy.golden = normalize_domains(policy.golden);
        policy.consensus = normalize_domains(policy.consensus);
        Ok(policy)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, VerifyError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)
            .map_err(|e| VerifyError::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_toml_str(&raw)
    }
}

fn normalize_domains(domains: Vec<String>) -> Vec<String> {
    domains
        .into_iter()
        .map(|d| d.trim().to_lowercase())
        .filter(|d| !d.is_empty())
        .collect()
}

/// Process settings, read from the environment (and `.env` via dotenv in the binaries).
#[derive(Clone, Debug)]
pub struct Settings {
    pub search_api_key: Option<String>,
    pub llm_api_key: Option<String>,
    pub llm_api_base: Option<String>,
    pub model: String,
    pub generation_timeout: Duration,
    pub policy_path: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            search_api_key: None,
            llm_api_key: None,
            llm_api_base: None,
            model: DEFAULT_MODEL.to_string(),
            generation_timeout: Duration::from_secs(DEFAULT_GENERATION_TIMEOUT_SECS),
            policy_path: None,
        }
    }
}

impl Settings {
    pub fn from_env() -> Result<Self, VerifyError> {
        let timeout_secs = match env::var("FAIRGPT_GENERATION_TIMEOUT_SECS") {
            Ok(raw) => raw.trim().parse::<u64>().map_err(|_| {
                VerifyError::Config(format!("FAIRGPT_GENERATION_TIMEOUT_SECS is not a number: {raw}"))
            })?,
            Err(_) => DEFAULT_GENERATION_TIMEOUT_SECS,
        };

        Ok(Self {
            search_api_key: env::var("TAVILY_API_KEY").ok().filter(|k| valid_api_key(k)),
            llm_api_key: env::var("OPENAI_API_KEY").ok().filter(|k| valid_api_key(k)),
            llm_api_base: env::var("OPENAI_API_BASE").ok().filter(|b| !b.trim().is_empty()),
            model: env::var("OPENAI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
            generation_timeout: Duration::from_secs(timeout_secs),
            policy_path: env::var("FAIRGPT_POLICY_PATH").ok().map(PathBuf::from),
        })
    }

    pub fn load_policy(&self) -> Result<SourcePolicy, VerifyError> {
        match &self.policy_path {
            Some(path) => SourcePolicy::from_path(path),
            None => Ok(SourcePolicy::default()),
        }
    }
}

/// Rejects empty keys and `sk-...`-style placeholders.
pub fn valid_api_key(key: &str) -> bool {
    let trimmed = key.trim();
    !trimmed.is_empty() && !trimmed.contains("...")
}
