use crate::models::{ParsedSections, Section};
use regex::Regex;
use std::sync::OnceLock;

pub const DEFAULT_CONFIDENCE: u8 = 95;

/// Splits a tagged answer into its sections.
///
/// Only the first occurrence of each tag counts. Sections are cut at the next
/// found tag in text order, so tag order in the answer does not matter.
pub fn parse_sections(text: &str) -> ParsedSections {
    let mut positions: Vec<(usize, Section)> = Section::ALL
        .iter()
        .filter_map(|&section| text.find(section.literal()).map(|idx| (idx, section)))
        .collect();
    positions.sort();

    let mut sections = ParsedSections::default();
    for (i, &(start, section)) in positions.iter().enumerate() {
        let content_start = start + section.literal().len();
        let end = positions
            .get(i + 1)
            .map(|&(next, _)| next)
            .unwrap_or(text.len());
        sections.insert(section, text[content_start..end].trim().to_string());
    }
    sections
}

/// One entry per non-empty line. Leading bullet markers and dashes at either
/// end are removed.
pub fn to_lines(section: &str) -> Vec<String> {
    section
        .lines()
        .map(|line| {
            line.trim_start_matches(|c: char| c == '-' || c == '*' || c == '•' || c.is_whitespace())
                .trim_end_matches(|c: char| c == '-' || c.is_whitespace())
                .to_string()
        })
        .filter(|line| !line.is_empty())
        .collect()
}

fn digit_run() -> &'static Regex {
    static DIGITS: OnceLock<Regex> = OnceLock::new();
    DIGITS.get_or_init(|| Regex::new(r"[0-9]+").expect("static regex"))
}

/// First run of digits in the section, capped at 100. No digits: [`DEFAULT_CONFIDENCE`].
pub fn extract_confidence(section: &str) -> u8 {
    match digit_run().find(section) {
        Some(m) => {
            let value = m.as_str().parse::<u64>().unwrap_or(u64::MAX);
            value.min(100) as u8
        }
        None => DEFAULT_CONFIDENCE,
    }
}
