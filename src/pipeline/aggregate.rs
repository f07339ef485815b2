use crate::config::SourcePolicy;
use crate::models::{ChannelHits, RankedSource, RetrievalHit, Tier, VerificationAudit};
use std::collections::HashSet;
use std::sync::Arc;

pub const MAX_PRESENTED_SOURCES: usize = 8;

/// Merged evidence of one run.
#[derive(Clone, Debug)]
pub struct Aggregate {
    /// Golden and consensus hits, fed to the model as the main context.
    pub consensus_context: String,
    /// Alternative-channel hits, fed to the model as dissenting context.
    pub alternative_context: String,
    /// At most [`MAX_PRESENTED_SOURCES`], ascending by tier.
    pub sources: Vec<RankedSource>,
    pub audit: VerificationAudit,
}

pub struct EvidenceAggregator {
    policy: Arc<SourcePolicy>,
}

impl EvidenceAggregator {
    pub fn new(policy: Arc<SourcePolicy>) -> Self {
        Self { policy }
    }

    pub fn aggregate(&self, hits: &ChannelHits) -> Aggregate {
        let consensus_context = render_context(hits.golden.iter().chain(hits.consensus.iter()));
        let alternative_context = render_context(hits.alternative.iter());

        let (mut sources, audit) = self.rank(hits.iter_all());
        sources.truncate(MAX_PRESENTED_SOURCES);

        Aggregate {
            consensus_context,
            alternative_context,
            sources,
            audit,
        }
    }

    /// Deduplicates by exact URL (first seen wins), classifies and tiers every
    /// survivor. The result is not truncated.
    pub fn rank<'a>(
        &self,
        hits: impl IntoIterator<Item = &'a RetrievalHit>,
    ) -> (Vec<RankedSource>, VerificationAudit) {
        let mut seen: HashSet<&str> = HashSet::new();
        let mut audit = VerificationAudit::default();
        let mut ranked = Vec::new();

        for hit in hits {
            if hit.url.is_empty() || !seen.insert(hit.url.as_str()) {
                continue;
            }
            let tier = self.tier_of(&hit.url);
            audit.record(tier);
            let profile = self.policy.reputation.profile(&hit.url);
            ranked.push(RankedSource::new(&hit.url, profile, tier));
        }

        // sort_by_key is stable: equal tiers keep first-seen order.
        ranked.sort_by_key(|s| s.tier);
        (ranked, audit)
    }

    /// Pure function of the URL text; the channel that produced it is irrelevant.
    pub fn tier_of(&self, url: &str) -> Tier {
        let lowered = url.to_lowercase();
        if self.policy.golden.iter().any(|d| lowered.contains(d.as_str())) {
            Tier::Golden
        } else if self.policy.consensus.iter().any(|d| lowered.contains(d.as_str())) {
            Tier::Consensus
        } else {
            Tier::Raw
        }
    }
}

fn render_context<'a>(hits: impl Iterator<Item = &'a RetrievalHit>) -> String {
    hits.map(|h| format!("SOURCE: {}\n{}", h.url, h.content))
        .collect::<Vec<_>>()
        .join("\n\n")
}
