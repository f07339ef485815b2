use crate::models::RetrievalHit;
use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchDepth {
    Basic,
    Advanced,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchRequest {
    pub query: String,
    /// Empty means unrestricted.
    pub include_domains: Vec<String>,
    pub depth: SearchDepth,
    pub max_results: usize,
}

/// Web search collaborator.
///
/// Zero matches are `Ok(vec![])`; only transport failures are errors.
#[async_trait]
pub trait SearchClient: Send + Sync {
    async fn search(&self, request: &SearchRequest) -> anyhow::Result<Vec<RetrievalHit>>;
}

/// Generative model collaborator, one request-response per call.
#[async_trait]
pub trait Generator: Send + Sync {
    async fn generate(&self, system_instruction: &str, user_content: &str)
        -> anyhow::Result<String>;
}

#[async_trait]
impl<T: SearchClient + ?Sized> SearchClient for Arc<T> {
    async fn search(&self, request: &SearchRequest) -> anyhow::Result<Vec<RetrievalHit>> {
        (**self).search(request).await
    }
}

#[async_trait]
impl<T: Generator + ?Sized> Generator for &T {
    async fn generate(
        &self,
        system_instruction: &str,
        user_content: &str,
    ) -> anyhow::Result<String> {
        (**self).generate(system_instruction, user_content).await
    }
}
