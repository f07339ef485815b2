use crate::models::RetrievalHit;
use crate::pipeline::traits::{Generator, SearchClient, SearchRequest};
use async_trait::async_trait;

/// Offline search: every channel comes back empty.
pub struct DummySearch;

#[async_trait]
impl SearchClient for DummySearch {
    async fn search(&self, _request: &SearchRequest) -> anyhow::Result<Vec<RetrievalHit>> {
        Ok(Vec::new())
    }
}

/// Offline generator answering in the tagged format.
pub struct DummyGenerator;

#[async_trait]
impl Generator for DummyGenerator {
    async fn generate(
        &self,
        _system_instruction: &str,
        user_content: &str,
    ) -> anyhow::Result<String> {
        let query = user_content
            .lines()
            .next()
            .and_then(|l| l.strip_prefix("QUERY: "))
            .unwrap_or(user_content);
        Ok(format!(
            "[SUMMARY] No live model configured; \"{}\" was not checked against a model.\n\
[COUNTER_SUMMARY] No alternative view found.\n\
[CLARIFICATION]\n- Offline mode\n\
[AUDIT]\n- Retrieval dispatched\n- Generation skipped\n\
[LOGIC_AUDIT] No significant fallacies detected.\n\
[CONFIDENCE] 0",
            query
        ))
    }
}
