use crate::config::SourcePolicy;
use crate::error::VerifyError;
use crate::models::{ParsedSections, Section, Status, TrendPoint, VerificationResult};
use crate::pipeline::aggregate::{Aggregate, EvidenceAggregator};
use crate::pipeline::bias::{BiasStrategy, LiveAnswerBias};
use crate::pipeline::dispatch::RetrievalDispatcher;
use crate::pipeline::parse::{extract_confidence, parse_sections, to_lines, DEFAULT_CONFIDENCE};
use crate::pipeline::prompt::{system_instruction, user_content};
use crate::pipeline::traits::{Generator, SearchClient};
use chrono::{Duration as ChronoDuration, Local, NaiveDate};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, info_span, warn, Instrument};
use uuid::Uuid;

pub const SUMMARY_MISSING: &str = "Summary unavailable.";
pub const SUMMARY_EMPTY: &str = "Consensus summary verified.";
pub const COUNTER_MISSING: &str = "No alternative view found.";
pub const COUNTER_EMPTY: &str = "No significant alternative perspective found.";
pub const LOGIC_DEFAULT: &str = "Audit complete.";

/// Runs one query through retrieval, generation and parsing.
///
/// DISPATCH -> AGGREGATE -> GENERATE -> PARSE -> EXTRACT -> ASSEMBLE. A failure
/// at any step discards the run and yields [`VerificationResult::fail_safe`].
pub struct VerificationOrchestrator<S, G>
where
    S: SearchClient,
    G: Generator,
{
    dispatcher: RetrievalDispatcher<S>,
    aggregator: EvidenceAggregator,
    generator: G,
    generation_timeout: Duration,
}

impl<S, G> VerificationOrchestrator<S, G>
where
    S: SearchClient,
    G: Generator,
{
    pub fn new(
        search: S,
        generator: G,
        policy: Arc<SourcePolicy>,
        generation_timeout: Duration,
    ) -> Self {
        Self {
            dispatcher: RetrievalDispatcher::new(search, Arc::clone(&policy)),
            aggregator: EvidenceAggregator::new(policy),
            generator,
            generation_timeout,
        }
    }

    /// Always returns a well-formed result; errors end up in the summary.
    pub async fn verify(&self, query: &str) -> VerificationResult {
        let span = info_span!("verify", run_id = %Uuid::new_v4());
        async {
            match self.try_verify(query).await {
                Ok(result) => result,
                Err(e) => {
                    let message = format!("{e:#}");
                    warn!(error = %message, "fail-safe verdict");
                    VerificationResult::fail_safe(&message)
                }
            }
        }
        .instrument(span)
        .await
    }

    /// Same pipeline without the fail-safe, for callers that want the error.
    pub async fn try_verify(&self, query: &str) -> Result<VerificationResult, VerifyError> {
        info!(query, "audit start");

        let hits = self.dispatcher.dispatch(query).await?;
        let aggregate = self.aggregator.aggregate(&hits);
        debug!(
            golden = aggregate.audit.golden_count,
            consensus = aggregate.audit.consensus_count,
            raw = aggregate.audit.raw_count,
            "sources ranked"
        );

        let raw_answer = self.generate(query, &aggregate).await?;
        let sections = parse_sections(&raw_answer);
        debug!(sections = sections.len(), "answer parsed");

        let bias_score = LiveAnswerBias.score(&raw_answer);
        let result = assemble(&sections, bias_score, aggregate, Local::now().date_naive());
        info!(
            certainty = result.certainty,
            sources = result.sources.len(),
            "audit complete"
        );
        Ok(result)
    }

    async fn generate(&self, query: &str, aggregate: &Aggregate) -> Result<String, VerifyError> {
        let system = system_instruction();
        let user = user_content(
            query,
            &aggregate.consensus_context,
            &aggregate.alternative_context,
        );
        match tokio::time::timeout(
            self.generation_timeout,
            self.generator.generate(&system, &user),
        )
        .await
        {
            Ok(answer) => Ok(answer?),
            Err(_) => Err(VerifyError::Timeout(self.generation_timeout)),
        }
    }
}

fn section_or(sections: &ParsedSections, section: Section, missing: &str, empty: &str) -> String {
    match sections.get(section) {
        None => missing.to_string(),
        Some("") => empty.to_string(),
        Some(text) => text.to_string(),
    }
}

pub fn assemble(
    sections: &ParsedSections,
    bias_score: f64,
    aggregate: Aggregate,
    today: NaiveDate,
) -> VerificationResult {
    VerificationResult {
        status: Status::Success,
        summary: section_or(sections, Section::Summary, SUMMARY_MISSING, SUMMARY_EMPTY),
        counter_summary: section_or(
            sections,
            Section::CounterSummary,
            COUNTER_MISSING,
            COUNTER_EMPTY,
        ),
        clarifications: sections
            .get(Section::Clarification)
            .map(to_lines)
            .unwrap_or_default(),
        audit_history: sections.get(Section::Audit).map(to_lines).unwrap_or_default(),
        logic_audit: section_or(sections, Section::LogicAudit, LOGIC_DEFAULT, LOGIC_DEFAULT),
        certainty: sections
            .get(Section::Confidence)
            .map(extract_confidence)
            .unwrap_or(DEFAULT_CONFIDENCE),
        bias_score,
        verification_audit: aggregate.audit,
        trend_history: trend_history(today),
        sources: aggregate.sources,
    }
}

/// Seven synthetic points ending at `today`. Placeholder data for the UI chart,
/// not derived from retrieval.
pub fn trend_history(today: NaiveDate) -> Vec<TrendPoint> {
    (0..7u32)
        .rev()
        .map(|days_back| TrendPoint {
            date: (today - ChronoDuration::days(i64::from(days_back)))
                .format("%b %d")
                .to_string(),
            volume: 10 + (days_back * 7) % 30,
        })
        .collect()
}
