use serde::{Deserialize, Serialize};
use std::fmt;

/// One search result as returned by the search collaborator.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetrievalHit {
    pub url: String,
    pub content: String,
}

impl RetrievalHit {
    pub fn new(url: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            content: content.into(),
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Channel {
    Golden,
    Consensus,
    Alternative,
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Channel::Golden => "golden",
            Channel::Consensus => "consensus",
            Channel::Alternative => "alternative",
        };
        f.write_str(name)
    }
}

/// Raw hit lists of the three retrieval channels of one run.
#[derive(Clone, Debug, Default)]
pub struct ChannelHits {
    pub golden: Vec<RetrievalHit>,
    pub consensus: Vec<RetrievalHit>,
    pub alternative: Vec<RetrievalHit>,
}

impl ChannelHits {
    /// All hits in channel order: golden, consensus, alternative.
    pub fn iter_all(&self) -> impl Iterator<Item = &RetrievalHit> {
        self.golden
            .iter()
            .chain(self.consensus.iter())
            .chain(self.alternative.iter())
    }
}
