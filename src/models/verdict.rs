use crate::models::source::{RankedSource, Tier};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    Success,
}

/// Tier counts over the deduplicated source set, taken before truncation.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct VerificationAudit {
    pub golden_count: usize,
    pub consensus_count: usize,
    pub raw_count: usize,
}

impl VerificationAudit {
    pub fn record(&mut self, tier: Tier) {
        match tier {
            Tier::Golden => self.golden_count += 1,
            Tier::Consensus => self.consensus_count += 1,
            Tier::Raw => self.raw_count += 1,
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct TrendPoint {
    pub date: String,
    pub volume: u32,
}

/// Caller-facing verdict for one query.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct VerificationResult {
    pub status: Status,
    pub summary: String,
    #[serde(default)]
    pub counter_summary: String,
    #[serde(default)]
    pub clarifications: Vec<String>,
    #[serde(default)]
    pub audit_history: Vec<String>,
    #[serde(default)]
    pub logic_audit: String,
    /// 0..=100
    pub certainty: u8,
    /// Lexical loaded-language density of the model answer. Not a measure of accuracy.
    #[serde(default)]
    pub bias_score: f64,
    #[serde(default)]
    pub verification_audit: VerificationAudit,
    /// Synthetic placeholder series for the UI chart.
    #[serde(default)]
    pub trend_history: Vec<TrendPoint>,
    #[serde(default)]
    pub sources: Vec<RankedSource>,
}

impl VerificationResult {
    pub const FAIL_SAFE_CERTAINTY: u8 = 60;

    /// Well-formed result used whenever a run fails at any stage.
    pub fn fail_safe(error: &str) -> Self {
        Self {
            status: Status::Success,
            summary: format!("Audit error: {}", error),
            counter_summary: String::new(),
            clarifications: Vec::new(),
            audit_history: Vec::new(),
            logic_audit: String::new(),
            certainty: Self::FAIL_SAFE_CERTAINTY,
            bias_score: 0.0,
            verification_audit: VerificationAudit::default(),
            trend_history: Vec::new(),
            sources: Vec::new(),
        }
    }
}
