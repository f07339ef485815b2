//! Lexical loaded-language density heuristics.
//!
//! Both strategies count whitespace tokens that contain a marker as a
//! substring. They are proxy signals for sensational or hedged wording, not
//! measures of factual accuracy. The two use different marker lists and
//! scaling and are kept separate on purpose.

/// Markers for scoring a live model answer.
pub const LIVE_ANSWER_MARKERS: [&str; 7] = [
    "allegedly",
    "claimed",
    "apparently",
    "supposedly",
    "huge",
    "shocking",
    "exposed",
];

pub const SENSATIONALIST_TERMS: [&str; 8] = [
    "shocking", "disaster", "historic", "shameful", "triumph", "miracle", "chaos", "brutal",
];

pub const POLITICAL_BIAS_TERMS: [&str; 6] = [
    "masterstroke",
    "puppet",
    "anti-national",
    "fascist",
    "dictator",
    "scam",
];

/// Multi-word entries can never match a single token; kept as configured.
pub const SPECULATIVE_TERMS: [&str; 5] = [
    "may be",
    "could lead to",
    "rumored",
    "allegedly",
    "sources claim",
];

/// Articles scoring above this are flagged.
pub const STORED_ARTICLE_THRESHOLD: f64 = 0.25;

pub trait BiasStrategy {
    fn score(&self, text: &str) -> f64;
}

fn marker_hits(text: &str, markers: &[&str]) -> (usize, usize) {
    let lowered = text.to_lowercase();
    let mut total = 0usize;
    let mut hits = 0usize;
    for token in lowered.split_whitespace() {
        total += 1;
        if markers.iter().any(|m| token.contains(m)) {
            hits += 1;
        }
    }
    (hits, total)
}

/// Rounds on the exact binary value with ties to even, as the formatter does.
fn round_to(value: f64, places: usize) -> f64 {
    format!("{:.*}", places, value).parse().unwrap_or(value)
}

/// Density × 10, rounded to 2 places, capped at 1.0.
#[derive(Clone, Copy, Debug, Default)]
pub struct LiveAnswerBias;

impl BiasStrategy for LiveAnswerBias {
    fn score(&self, text: &str) -> f64 {
        let (hits, total) = marker_hits(text, &LIVE_ANSWER_MARKERS);
        if total == 0 {
            return 0.0;
        }
        round_to(hits as f64 / total as f64 * 10.0, 2).min(1.0)
    }
}

/// Plain density over the loaded-word lists, rounded to 4 places.
#[derive(Clone, Debug)]
pub struct StoredArticleBias {
    terms: Vec<&'static str>,
}

impl Default for StoredArticleBias {
    fn default() -> Self {
        let terms = SENSATIONALIST_TERMS
            .iter()
            .chain(POLITICAL_BIAS_TERMS.iter())
            .chain(SPECULATIVE_TERMS.iter())
            .copied()
            .collect();
        Self { terms }
    }
}

impl StoredArticleBias {
    pub fn score_article(&self, title: &str, summary: &str) -> f64 {
        self.score(&format!("{} {}", title, summary))
    }

    pub fn is_flagged(score: f64) -> bool {
        score > STORED_ARTICLE_THRESHOLD
    }
}

impl BiasStrategy for StoredArticleBias {
    fn score(&self, text: &str) -> f64 {
        let (hits, total) = marker_hits(text, &self.terms);
        if total == 0 {
            return 0.0;
        }
        round_to(hits as f64 / total as f64, 4)
    }
}
