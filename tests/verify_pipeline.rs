use async_trait::async_trait;
use fairgpt::models::{RetrievalHit, Status, Tier};
use fairgpt::pipeline::{
    DummyGenerator, DummySearch, Generator, SearchClient, SearchRequest,
    VerificationOrchestrator,
};
use fairgpt::{SourcePolicy, VerifyError};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Answers by allow-list: golden, consensus, or unrestricted (alternative).
struct ChannelSearch {
    golden: Vec<RetrievalHit>,
    consensus: Vec<RetrievalHit>,
    alternative: Vec<RetrievalHit>,
    in_flight: AtomicUsize,
    peak: AtomicUsize,
}

impl ChannelSearch {
    fn new(
        golden: Vec<RetrievalHit>,
        consensus: Vec<RetrievalHit>,
        alternative: Vec<RetrievalHit>,
    ) -> Self {
        Self {
            golden,
            consensus,
            alternative,
            in_flight: AtomicUsize::new(0),
            peak: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl SearchClient for ChannelSearch {
    async fn search(&self, request: &SearchRequest) -> anyhow::Result<Vec<RetrievalHit>> {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);
        tokio::time::sleep(Duration::from_millis(20)).await;
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        let hits = if request.include_domains.iter().any(|d| d == "pib.gov") {
            &self.golden
        } else if request.include_domains.iter().any(|d| d == "reuters.com") {
            &self.consensus
        } else {
            &self.alternative
        };
        Ok(hits.clone())
    }
}

struct FailingSearch;

#[async_trait]
impl SearchClient for FailingSearch {
    async fn search(&self, _request: &SearchRequest) -> anyhow::Result<Vec<RetrievalHit>> {
        Err(VerifyError::Search("connection refused".to_string()).into())
    }
}

struct CannedGenerator {
    answer: String,
    seen: Mutex<Vec<(String, String)>>,
}

impl CannedGenerator {
    fn new(answer: &str) -> Self {
        Self {
            answer: answer.to_string(),
            seen: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl Generator for CannedGenerator {
    async fn generate(&self, system: &str, user: &str) -> anyhow::Result<String> {
        self.seen
            .lock()
            .unwrap()
            .push((system.to_string(), user.to_string()));
        Ok(self.answer.clone())
    }
}

struct FailingGenerator(&'static str);

#[async_trait]
impl Generator for FailingGenerator {
    async fn generate(&self, _system: &str, _user: &str) -> anyhow::Result<String> {
        Err(anyhow::anyhow!(self.0))
    }
}

struct SlowGenerator;

#[async_trait]
impl Generator for SlowGenerator {
    async fn generate(&self, _system: &str, _user: &str) -> anyhow::Result<String> {
        tokio::time::sleep(Duration::from_secs(5)).await;
        Ok("[SUMMARY] too late".to_string())
    }
}

const ANSWER: &str = "[SUMMARY] The claim is false according to PIB and Boom Live.
[COUNTER_SUMMARY] Some commentators allege the notice was genuine.
[CLARIFICATION]
- PIB issued a clarification
- Boom Live traced the image
[AUDIT]
* Checked official release
* Compared with wire reports
[LOGIC_AUDIT] No significant fallacies detected.
[CONFIDENCE] Between 80 and 90";

fn policy() -> Arc<SourcePolicy> {
    Arc::new(SourcePolicy::default())
}

fn three_tier_search() -> ChannelSearch {
    ChannelSearch::new(
        vec![RetrievalHit::new(
            "https://www.boomlive.in/fact-check/fake-notice",
            "Boom Live found the notice fabricated.",
        )],
        vec![RetrievalHit::new(
            "https://www.thehindu.com/news/national/notice",
            "The Hindu reports the ministry denied it.",
        )],
        vec![RetrievalHit::new(
            "https://blog.example.org/opinion",
            "A blogger disputes the denial.",
        )],
    )
}

#[tokio::test]
async fn full_run_produces_ranked_verdict() {
    let orchestrator = VerificationOrchestrator::new(
        three_tier_search(),
        CannedGenerator::new(ANSWER),
        policy(),
        Duration::from_secs(5),
    );

    let result = orchestrator.verify("viral ministry notice").await;

    assert_eq!(result.status, Status::Success);
    assert_eq!(
        result.summary,
        "The claim is false according to PIB and Boom Live."
    );
    assert_eq!(
        result.counter_summary,
        "Some commentators allege the notice was genuine."
    );
    assert_eq!(
        result.clarifications,
        vec!["PIB issued a clarification", "Boom Live traced the image"]
    );
    assert_eq!(
        result.audit_history,
        vec!["Checked official release", "Compared with wire reports"]
    );
    assert_eq!(result.logic_audit, "No significant fallacies detected.");
    assert_eq!(result.certainty, 80);
    assert!((0.0..=1.0).contains(&result.bias_score));
    assert_eq!(result.trend_history.len(), 7);

    let tiers: Vec<Tier> = result.sources.iter().map(|s| s.tier).collect();
    assert_eq!(tiers, vec![Tier::Golden, Tier::Consensus, Tier::Raw]);
    assert_eq!(result.verification_audit.golden_count, 1);
    assert_eq!(result.verification_audit.consensus_count, 1);
    assert_eq!(result.verification_audit.raw_count, 1);
    assert_eq!(result.sources[0].profile.name, "Boom Live");
    assert_eq!(result.sources[2].profile.name, "blog.example.org");
}

#[tokio::test]
async fn generator_sees_both_context_pools() {
    let generator = CannedGenerator::new(ANSWER);
    let orchestrator = VerificationOrchestrator::new(
        three_tier_search(),
        &generator,
        policy(),
        Duration::from_secs(5),
    );
    orchestrator.try_verify("viral ministry notice").await.unwrap();
    let seen = generator.seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    let (system, user) = &seen[0];
    assert!(system.contains("STRUCTURE: [SUMMARY], [COUNTER_SUMMARY]"));
    assert!(user.starts_with("QUERY: viral ministry notice\n\nCONSENSUS:\n"));
    let (consensus, alternative) = user.split_once("\n\nALTERNATIVE:\n").unwrap();
    assert!(consensus.contains("SOURCE: https://www.boomlive.in/fact-check/fake-notice"));
    assert!(consensus.contains("SOURCE: https://www.thehindu.com/news/national/notice"));
    assert!(!consensus.contains("blog.example.org"));
    assert_eq!(
        alternative,
        "SOURCE: https://blog.example.org/opinion\nA blogger disputes the denial."
    );
}

#[tokio::test]
async fn retrieval_channels_run_concurrently() {
    let search = Arc::new(three_tier_search());
    let orchestrator = VerificationOrchestrator::new(
        Arc::clone(&search),
        CannedGenerator::new(ANSWER),
        policy(),
        Duration::from_secs(5),
    );
    orchestrator.try_verify("q").await.unwrap();
    assert_eq!(search.peak.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn duplicate_urls_across_channels_appear_once() {
    let shared = RetrievalHit::new("https://factly.in/check/1", "golden copy");
    let search = ChannelSearch::new(
        vec![shared.clone()],
        vec![RetrievalHit::new("https://factly.in/check/1", "consensus copy")],
        vec![
            RetrievalHit::new("https://factly.in/check/1", "alt copy"),
            RetrievalHit::new("https://apnews.com/article/2", "ap"),
        ],
    );
    let orchestrator = VerificationOrchestrator::new(
        search,
        CannedGenerator::new(ANSWER),
        policy(),
        Duration::from_secs(5),
    );
    let result = orchestrator.verify("q").await;
    let urls: Vec<&str> = result.sources.iter().map(|s| s.url.as_str()).collect();
    assert_eq!(urls, vec!["https://factly.in/check/1", "https://apnews.com/article/2"]);
    assert_eq!(result.verification_audit.golden_count, 1);
    assert_eq!(result.verification_audit.consensus_count, 1);
    assert_eq!(result.verification_audit.raw_count, 0);
}

#[tokio::test]
async fn generation_failure_yields_fail_safe() {
    for message in ["quota exhausted", "HTTP 500: upstream", ""] {
        let orchestrator = VerificationOrchestrator::new(
            three_tier_search(),
            FailingGenerator(message),
            policy(),
            Duration::from_secs(5),
        );
        let result = orchestrator.verify("q").await;
        assert_eq!(result.status, Status::Success);
        assert_eq!(result.certainty, 60);
        assert!(result.clarifications.is_empty());
        assert!(result.audit_history.is_empty());
        assert!(result.summary.contains(message), "summary: {}", result.summary);
        assert!(result.sources.is_empty());
    }
}

#[tokio::test]
async fn retrieval_failure_yields_fail_safe() {
    let orchestrator = VerificationOrchestrator::new(
        FailingSearch,
        CannedGenerator::new(ANSWER),
        policy(),
        Duration::from_secs(5),
    );
    let result = orchestrator.verify("q").await;
    assert_eq!(result.certainty, 60);
    assert!(result.summary.contains("connection refused"));
}

#[tokio::test]
async fn generation_timeout_yields_fail_safe() {
    let orchestrator = VerificationOrchestrator::new(
        three_tier_search(),
        SlowGenerator,
        policy(),
        Duration::from_millis(50),
    );
    let result = orchestrator.verify("q").await;
    assert_eq!(result.certainty, 60);
    assert!(result.summary.starts_with("Audit error: generation timed out"));
}

#[tokio::test]
async fn strict_path_surfaces_timeout() {
    let orchestrator = VerificationOrchestrator::new(
        three_tier_search(),
        SlowGenerator,
        policy(),
        Duration::from_millis(50),
    );
    let err = orchestrator.try_verify("q").await.unwrap_err();
    assert!(matches!(err, VerifyError::Timeout(_)));
}

#[tokio::test]
async fn strict_path_keeps_search_error_variant() {
    let orchestrator = VerificationOrchestrator::new(
        FailingSearch,
        CannedGenerator::new(ANSWER),
        policy(),
        Duration::from_secs(5),
    );
    let err = orchestrator.try_verify("q").await.unwrap_err();
    assert!(matches!(err, VerifyError::Search(ref m) if m == "connection refused"));
}

struct EmptyGenerator;

#[async_trait]
impl Generator for EmptyGenerator {
    async fn generate(&self, _system: &str, _user: &str) -> anyhow::Result<String> {
        Err(VerifyError::EmptyCompletion.into())
    }
}

#[tokio::test]
async fn strict_path_keeps_generation_error_variant() {
    let orchestrator = VerificationOrchestrator::new(
        three_tier_search(),
        EmptyGenerator,
        policy(),
        Duration::from_secs(5),
    );
    let err = orchestrator.try_verify("q").await.unwrap_err();
    assert!(matches!(err, VerifyError::EmptyCompletion));
}

#[tokio::test]
async fn offline_collaborators_still_produce_a_verdict() {
    let orchestrator =
        VerificationOrchestrator::new(DummySearch, DummyGenerator, policy(), Duration::from_secs(5));
    let result = orchestrator.verify("fuel prices").await;
    assert_eq!(result.certainty, 0);
    assert!(result.sources.is_empty());
    assert!(result.summary.contains("fuel prices"));
    assert_eq!(result.audit_history, vec!["Retrieval dispatched", "Generation skipped"]);
}

#[tokio::test]
async fn verdict_serializes_with_caller_keys() {
    let orchestrator = VerificationOrchestrator::new(
        three_tier_search(),
        CannedGenerator::new(ANSWER),
        policy(),
        Duration::from_secs(5),
    );
    let result = orchestrator.verify("q").await;
    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["status"], "SUCCESS");
    assert_eq!(json["certainty"], 80);
    assert_eq!(json["verification_audit"]["goldenCount"], 1);
    assert_eq!(json["sources"][0]["rank"], 1);
    assert_eq!(json["sources"][0]["meta"]["type"], "Fact-Checker");
    assert_eq!(json["sources"][0]["meta"]["badge"], "IFCN Member");
    assert!(json["sources"][0]["sourceId"].is_string());
}
