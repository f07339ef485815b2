use std::collections::HashMap;

/// Bracketed markers delimiting the model's structured answer.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Section {
    Summary,
    CounterSummary,
    Clarification,
    Audit,
    LogicAudit,
    Confidence,
}

impl Section {
    pub const ALL: [Section; 6] = [
        Section::Summary,
        Section::CounterSummary,
        Section::Clarification,
        Section::Audit,
        Section::LogicAudit,
        Section::Confidence,
    ];

    pub fn literal(self) -> &'static str {
        match self {
            Section::Summary => "[SUMMARY]",
            Section::CounterSummary => "[COUNTER_SUMMARY]",
            Section::Clarification => "[CLARIFICATION]",
            Section::Audit => "[AUDIT]",
            Section::LogicAudit => "[LOGIC_AUDIT]",
            Section::Confidence => "[CONFIDENCE]",
        }
    }
}

/// Sparse mapping of the sections found in one answer.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ParsedSections {
    map: HashMap<Section, String>,
}

impl ParsedSections {
    pub fn insert(&mut self, section: Section, text: String) {
        self.map.insert(section, text);
    }

    pub fn get(&self, section: Section) -> Option<&str> {
        self.map.get(&section).map(|s| s.as_str())
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}
