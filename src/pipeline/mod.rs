pub mod aggregate;
pub mod bias;
pub mod dispatch;
pub mod llm_generator;
pub mod mock;
pub mod orchestrator;
pub mod parse;
pub mod prompt;
pub mod tavily;
pub mod traits;

pub use aggregate::{Aggregate, EvidenceAggregator};
pub use bias::{BiasStrategy, LiveAnswerBias, StoredArticleBias};
pub use dispatch::RetrievalDispatcher;
pub use llm_generator::LlmGenerator;
pub use mock::{DummyGenerator, DummySearch};
pub use orchestrator::VerificationOrchestrator;
pub use parse::{extract_confidence, parse_sections, to_lines};
pub use tavily::TavilySearch;
pub use traits::{Generator, SearchClient, SearchDepth, SearchRequest};
