//! Work experience entries
//!
//! Two strategies, chosen by whether the section text carries `###` markers:
//!
//! * structured: one entry per `### Title | Company` block, with an italic period line
//!   and bulleted responsibilities;
//! * heuristic: one entry per blank-line paragraph, with the first line as a tentative
//!   title and the first date range found anywhere in the paragraph as the period.

use crate::processing::patterns::{
    bare_text, find_date_range, is_level3_heading, italic_text, level3_blocks, paragraphs, strip_bullet, Block,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

static EMPLOYER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\s+(?:chez|at|@)\s+").expect("valid employer regex"));

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExperienceEntry {
    pub title: String,
    pub company: String,
    pub period: String,
    pub responsibilities: Vec<String>,
}

impl ExperienceEntry {
    fn is_blank(&self) -> bool {
        self.title.is_empty() && self.responsibilities.is_empty()
    }
}

pub fn parse_experience(text: &str) -> Vec<ExperienceEntry> {
    if text.lines().any(is_level3_heading) {
        parse_structured(text)
    } else {
        parse_heuristic(text)
    }
}

fn parse_structured(text: &str) -> Vec<ExperienceEntry> {
    level3_blocks(text)
        .into_iter()
        .filter_map(structured_entry)
        .filter(|entry| !entry.is_blank())
        .collect()
}

fn structured_entry(block: Block<'_>) -> Option<ExperienceEntry> {
    let (header, mut body) = match block.heading {
        Some(heading) => (heading, block.lines),
        None => {
            let mut lines = block.lines;
            if lines.is_empty() {
                return None;
            }
            let first = lines.remove(0);
            (first, lines)
        }
    };

    let (title, company) = split_on_pipe(header).unwrap_or((header.trim(), ""));

    let mut period = String::new();
    if let Some(index) = body.iter().position(|line| italic_text(line).is_some()) {
        period = italic_text(body.remove(index)).unwrap_or_default().to_string();
    }

    Some(ExperienceEntry {
        title: title.to_string(),
        company: company.to_string(),
        period,
        responsibilities: bullets(&body),
    })
}

/// Paragraph-per-entry parsing for sections without `###` markers.
pub(crate) fn parse_heuristic(text: &str) -> Vec<ExperienceEntry> {
    paragraphs(text)
        .iter()
        .map(|lines| heuristic_entry(lines))
        .filter(|entry| !entry.is_blank())
        .collect()
}

fn heuristic_entry(lines: &[&str]) -> ExperienceEntry {
    let joined = lines.join("\n");
    let period = find_date_range(&joined).unwrap_or_default().to_string();
    let is_period_line = |line: &str| !period.is_empty() && bare_text(line) == period;

    let (first, rest) = match lines.split_first() {
        Some((first, rest)) => (*first, rest),
        None => return ExperienceEntry::default(),
    };

    if is_period_line(first) {
        let responsibilities = rest.iter().copied().filter(|line| !is_period_line(*line)).collect::<Vec<_>>();
        return ExperienceEntry {
            period,
            responsibilities: bullets(&responsibilities),
            ..Default::default()
        };
    }

    let header = without_period(strip_bullet(first), &period);
    let (title, company, split) = match split_on_pipe(&header).or_else(|| split_on_employer(&header)) {
        Some((title, company)) => (title.to_string(), company.to_string(), true),
        None => (header.trim_matches('*').trim().to_string(), String::new(), false),
    };

    let remaining = rest.iter().copied().filter(|line| !is_period_line(*line)).collect::<Vec<_>>();
    let responsibilities = bullets(&remaining);

    // A lone line of prose is a bullet, not a heading.
    if responsibilities.is_empty() && !split && !title.is_empty() {
        return ExperienceEntry {
            period,
            responsibilities: vec![title],
            ..Default::default()
        };
    }

    ExperienceEntry {
        title,
        company,
        period,
        responsibilities,
    }
}

/// `Title | Company`, trimmed on both sides. Bold markers around the title are dropped.
pub(crate) fn split_on_pipe(line: &str) -> Option<(&str, &str)> {
    let (left, right) = line.split_once('|')?;
    Some((left.trim().trim_matches('*').trim(), right.trim().trim_matches('*').trim()))
}

fn split_on_employer(line: &str) -> Option<(&str, &str)> {
    let m = EMPLOYER_REGEX.find(line)?;
    let title = line[..m.start()].trim().trim_matches('*').trim();
    let company = line[m.end()..].trim().trim_matches('*').trim();
    if title.is_empty() || company.is_empty() {
        return None;
    }
    Some((title, company))
}

/// Remove an inline period from a header line along with the punctuation around it.
fn without_period(line: &str, period: &str) -> String {
    if period.is_empty() || !line.contains(period) {
        return line.to_string();
    }
    line.replacen(period, "", 1)
        .trim()
        .trim_matches(|c: char| c.is_whitespace() || matches!(c, '|' | '-' | '–' | ',' | '(' | ')' | '*' | '_'))
        .replace("()", "")
        .trim()
        .to_string()
}

pub(crate) fn bullets(lines: &[&str]) -> Vec<String> {
    lines
        .iter()
        .map(|line| strip_bullet(line))
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_structured_entry() {
        let text = "### Dev | Acme\n*2020-2022*\n- Built X\n- Shipped Y\n";
        let entries = parse_experience(text);

        assert_eq!(
            entries,
            vec![ExperienceEntry {
                title: "Dev".to_string(),
                company: "Acme".to_string(),
                period: "2020-2022".to_string(),
                responsibilities: vec!["Built X".to_string(), "Shipped Y".to_string()],
            }]
        );
    }

    #[test]
    fn test_structured_entries_keep_order_and_drop_blank_blocks() {
        let text = "### First\n- a\n\n###\n\n### Second | Corp\n_2019 - Présent_\n* b\n";
        let entries = parse_experience(text);

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].title, "First");
        assert_eq!(entries[0].company, "");
        assert_eq!(entries[1].period, "2019 - Présent");
        assert_eq!(entries[1].responsibilities, vec!["b"]);
    }

    #[test]
    fn test_structured_leading_text_is_its_own_entry() {
        let text = "Freelance | Self\n- consulting\n### Dev | Acme\n- code\n";
        let entries = parse_experience(text);

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].title, "Freelance");
        assert_eq!(entries[0].responsibilities, vec!["consulting"]);
    }

    #[test]
    fn test_only_first_italic_line_is_the_period() {
        let text = "### Dev\n*2020*\n*emphasis*\n";
        let entries = parse_experience(text);

        assert_eq!(entries[0].period, "2020");
        assert_eq!(entries[0].responsibilities, vec!["*emphasis*"]);
    }

    #[test]
    fn test_heuristic_paragraph_with_period_line() {
        let text = "Développeur Backend chez Acme\n2018 - 2021\n- API REST\n- Migration cloud\n";
        let entries = parse_experience(text);

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].title, "Développeur Backend");
        assert_eq!(entries[0].company, "Acme");
        assert_eq!(entries[0].period, "2018 - 2021");
        assert_eq!(entries[0].responsibilities, vec!["API REST", "Migration cloud"]);
    }

    #[test]
    fn test_heuristic_inline_period_is_removed_from_title() {
        let entries = parse_experience("Consultant | Cabinet X (2015-2017)\nAudit\n");

        assert_eq!(entries[0].title, "Consultant");
        assert_eq!(entries[0].company, "Cabinet X");
        assert_eq!(entries[0].period, "2015-2017");
    }

    #[test]
    fn test_single_line_paragraph_is_demoted() {
        let entries = parse_experience("Worked on many internal tools.\n\n");

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].title, "");
        assert_eq!(entries[0].responsibilities, vec!["Worked on many internal tools."]);
    }

    #[test]
    fn test_paragraph_starting_with_period_has_no_title() {
        let entries = parse_experience("2019 - 2020\n- Support\n");

        assert_eq!(entries[0].title, "");
        assert_eq!(entries[0].period, "2019 - 2020");
        assert_eq!(entries[0].responsibilities, vec!["Support"]);
    }

    #[test]
    fn test_no_blank_entries() {
        assert!(parse_experience("").is_empty());
        assert!(parse_experience("\n\n   \n").is_empty());
        assert!(parse_experience("*2020-2021*\n").is_empty());
        for entry in parse_experience("### \n*2020*\n\n### Real\n- a\n") {
            assert!(!(entry.title.is_empty() && entry.company.is_empty() && entry.responsibilities.is_empty()));
        }
    }
}
