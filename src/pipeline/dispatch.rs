use crate::config::SourcePolicy;
use crate::models::{Channel, ChannelHits, RetrievalHit};
use crate::pipeline::traits::{SearchClient, SearchDepth, SearchRequest};
use anyhow::Context;
use std::sync::Arc;
use tracing::debug;

pub const GOLDEN_MAX_RESULTS: usize = 4;
pub const CONSENSUS_MAX_RESULTS: usize = 3;
pub const ALTERNATIVE_MAX_RESULTS: usize = 3;

/// Fans one query out to the golden, consensus and alternative channels.
pub struct RetrievalDispatcher<S: SearchClient> {
    search: S,
    policy: Arc<SourcePolicy>,
}

impl<S: SearchClient> RetrievalDispatcher<S> {
    pub fn new(search: S, policy: Arc<SourcePolicy>) -> Self {
        Self { search, policy }
    }

    pub fn request(&self, channel: Channel, query: &str) -> SearchRequest {
        match channel {
            Channel::Golden => SearchRequest {
                query: query.to_string(),
                include_domains: self.policy.golden.clone(),
                depth: SearchDepth::Advanced,
                max_results: GOLDEN_MAX_RESULTS,
            },
            Channel::Consensus => SearchRequest {
                query: query.to_string(),
                include_domains: self.policy.consensus.clone(),
                depth: SearchDepth::Advanced,
                max_results: CONSENSUS_MAX_RESULTS,
            },
            Channel::Alternative => SearchRequest {
                query: alternative_query(query),
                include_domains: Vec::new(),
                depth: SearchDepth::Advanced,
                max_results: ALTERNATIVE_MAX_RESULTS,
            },
        }
    }

    /// Runs the three searches concurrently; the first failure aborts the run.
    pub async fn dispatch(&self, query: &str) -> anyhow::Result<ChannelHits> {
        let golden = self.request(Channel::Golden, query);
        let consensus = self.request(Channel::Consensus, query);
        let alternative = self.request(Channel::Alternative, query);

        let (golden, consensus, alternative) = tokio::try_join!(
            self.run(Channel::Golden, &golden),
            self.run(Channel::Consensus, &consensus),
            self.run(Channel::Alternative, &alternative),
        )?;

        Ok(ChannelHits {
            golden,
            consensus,
            alternative,
        })
    }

    async fn run(
        &self,
        channel: Channel,
        request: &SearchRequest,
    ) -> anyhow::Result<Vec<RetrievalHit>> {
        let hits = self
            .search
            .search(request)
            .await
            .with_context(|| format!("{} channel", channel))?;
        debug!(%channel, hits = hits.len(), "retrieval finished");
        Ok(hits)
    }
}

pub fn alternative_query(query: &str) -> String {
    format!("criticism of \"{}\" OR \"opposition to {}\"", query, query)
}
