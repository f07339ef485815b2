use crate::models::SourceProfile;
use serde::Deserialize;
use std::collections::HashMap;
use url::Url;

/// Static domain -> trust profile table.
#[derive(Clone, Debug, Deserialize)]
#[serde(transparent)]
pub struct ReputationTable {
    entries: HashMap<String, SourceProfile>,
}

impl ReputationTable {
    pub fn new(entries: HashMap<String, SourceProfile>) -> Self {
        Self { entries }
    }

    pub fn get(&self, domain: &str) -> Option<&SourceProfile> {
        self.entries.get(domain)
    }

    /// Never fails: unknown or unparseable URLs get a generic web profile.
    pub fn profile(&self, url: &str) -> SourceProfile {
        let domain = match domain_of(url) {
            Some(d) => d,
            None => return SourceProfile::web_source(None),
        };
        self.entries
            .get(&domain)
            .cloned()
            .unwrap_or_else(|| SourceProfile::web_source(Some(&domain)))
    }
}

/// Host of `url` without a leading `www.`.
pub fn domain_of(url: &str) -> Option<String> {
    let parsed = Url::parse(url.trim()).ok()?;
    let host = parsed.host_str()?;
    let host = host.strip_prefix("www.").unwrap_or(host);
    if host.is_empty() {
        None
    } else {
        Some(host.to_string())
    }
}

fn entry(
    name: &str,
    kind: &str,
    reliability: &str,
    focus: &str,
    certified: bool,
    badge: Option<&str>,
) -> SourceProfile {
    SourceProfile {
        name: name.to_string(),
        kind: kind.to_string(),
        reliability: reliability.to_string(),
        focus: focus.to_string(),
        certified,
        badge: badge.map(str::to_string),
    }
}

impl Default for ReputationTable {
    fn default() -> Self {
        let mut entries = HashMap::new();
        entries.insert(
            "pib.gov.in".to_string(),
            entry(
                "Press Information Bureau",
                "Official Government",
                "Highest (Official)",
                "Government Policy & Official Clarifications",
                true,
                None,
            ),
        );
        entries.insert(
            "boomlive.in".to_string(),
            entry(
                "Boom Live",
                "Fact-Checker",
                "High (Verified)",
                "Social Media & Viral Misinformation",
                true,
                Some("IFCN Member"),
            ),
        );
        entries.insert(
            "factly.in".to_string(),
            entry(
                "Factly",
                "Fact-Checker",
                "High (Verified)",
                "Data-Driven Fact Checking",
                true,
                Some("IFCN Member"),
            ),
        );
        entries.insert(
            "thehindu.com".to_string(),
            entry(
                "The Hindu",
                "Major Media",
                "High (Editorial)",
                "National News & Policy Analysis",
                false,
                None,
            ),
        );
        entries.insert(
            "indianexpress.com".to_string(),
            entry(
                "Indian Express",
                "Major Media",
                "High (Editorial)",
                "Investigative Journalism",
                false,
                None,
            ),
        );
        Self { entries }
    }
}
