pub mod hit;
pub mod section;
pub mod source;
pub mod verdict;

pub use hit::{Channel, ChannelHits, RetrievalHit};
pub use section::{ParsedSections, Section};
pub use source::{source_id, RankedSource, SourceProfile, Tier};
pub use verdict::{Status, TrendPoint, VerificationAudit, VerificationResult};
