use crate::error::VerifyError;
use crate::models::RetrievalHit;
use crate::pipeline::traits::{SearchClient, SearchDepth, SearchRequest};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const TAVILY_ENDPOINT: &str = "https://api.tavily.com/search";

/// Search collaborator backed by the Tavily search API.
pub struct TavilySearch {
    client: Client,
    api_key: String,
    endpoint: String,
}

#[derive(Serialize)]
struct TavilyRequest<'a> {
    query: &'a str,
    search_depth: SearchDepth,
    max_results: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    include_domains: Option<&'a [String]>,
}

#[derive(Deserialize)]
struct TavilyResponse {
    #[serde(default)]
    results: Vec<TavilyResult>,
}

#[derive(Deserialize)]
struct TavilyResult {
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    content: Option<String>,
}

impl TavilySearch {
    pub fn new(api_key: &str) -> Result<Self, VerifyError> {
        let client = Client::builder()
            .user_agent(concat!("FairGPT/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| VerifyError::Config(format!("http client: {e}")))?;
        Ok(Self {
            client,
            api_key: api_key.trim().to_string(),
            endpoint: TAVILY_ENDPOINT.to_string(),
        })
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }
}

fn request_body(request: &SearchRequest) -> TavilyRequest<'_> {
    TavilyRequest {
        query: &request.query,
        search_depth: request.depth,
        max_results: request.max_results,
        include_domains: if request.include_domains.is_empty() {
            None
        } else {
            Some(request.include_domains.as_slice())
        },
    }
}

/// Results without a URL are dropped.
pub fn parse_response(body: &str) -> Result<Vec<RetrievalHit>, VerifyError> {
    let parsed: TavilyResponse = serde_json::from_str(body)
        .map_err(|e| VerifyError::Search(format!("invalid response body: {e}")))?;
    Ok(parsed
        .results
        .into_iter()
        .filter_map(|r| match r.url {
            Some(url) if !url.trim().is_empty() => {
                Some(RetrievalHit::new(url, r.content.unwrap_or_default()))
            }
            _ => None,
        })
        .collect())
}

#[async_trait]
impl SearchClient for TavilySearch {
    async fn search(&self, request: &SearchRequest) -> anyhow::Result<Vec<RetrievalHit>> {
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&request_body(request))
            .send()
            .await
            .map_err(|e| VerifyError::Search(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| VerifyError::Search(e.to_string()))?;
        if !status.is_success() {
            let excerpt: String = body.chars().take(200).collect();
            return Err(VerifyError::Search(format!("HTTP {status}: {excerpt}")).into());
        }
        Ok(parse_response(&body)?)
    }
}
