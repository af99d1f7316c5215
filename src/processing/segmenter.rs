//! Line-oriented section segmentation
//!
//! Walks a document once, tracking the current section, and buffers the raw text of
//! each section with original line order preserved. Fenced code blocks are copied
//! verbatim and never inspected for headings.

use crate::config::DEFAULT_TITLE;
use crate::processing::contact::{extract_contact, ContactRecord};
use crate::processing::patterns::is_numbered_item;
use crate::processing::sections::{resolve_section, CanonicalSection};
use log::debug;
use std::collections::HashMap;

/// Buffer key: a canonical section, or the lowercased text of an unrecognized heading.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SectionKey {
    Canonical(CanonicalSection),
    AdHoc(String),
}

impl std::fmt::Display for SectionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SectionKey::Canonical(section) => write!(f, "{}", section),
            SectionKey::AdHoc(heading) => write!(f, "{}", heading),
        }
    }
}

impl From<CanonicalSection> for SectionKey {
    fn from(section: CanonicalSection) -> Self {
        SectionKey::Canonical(section)
    }
}

/// Raw per-section text of one document.
///
/// The essential sections are always present, the title is always set and the
/// contact entry always holds a serialized [`ContactRecord`].
#[derive(Debug, Clone)]
pub struct SectionedDocument {
    sections: HashMap<SectionKey, String>,
    preamble: String,
    contact: ContactRecord,
}

impl SectionedDocument {
    /// Raw buffer of a canonical section, empty when the section was never seen.
    pub fn get(&self, section: CanonicalSection) -> &str {
        self.sections
            .get(&SectionKey::Canonical(section))
            .map(String::as_str)
            .unwrap_or("")
    }

    pub fn contains(&self, key: &SectionKey) -> bool {
        self.sections.contains_key(key)
    }

    pub fn title(&self) -> &str {
        self.get(CanonicalSection::Title)
    }

    /// Text found before the first section heading.
    pub fn preamble(&self) -> &str {
        &self.preamble
    }

    pub fn contact(&self) -> &ContactRecord {
        &self.contact
    }

    pub fn sections(&self) -> &HashMap<SectionKey, String> {
        &self.sections
    }

    /// Sections opened by unrecognized `##` headings, sorted by heading.
    pub fn ad_hoc_sections(&self) -> Vec<(&str, &str)> {
        let mut ad_hoc: Vec<(&str, &str)> = self
            .sections
            .iter()
            .filter_map(|(key, text)| match key {
                SectionKey::AdHoc(heading) => Some((heading.as_str(), text.as_str())),
                SectionKey::Canonical(_) => None,
            })
            .collect();
        ad_hoc.sort_by(|a, b| a.0.cmp(b.0));
        ad_hoc
    }
}

enum State {
    AwaitingContent,
    InSection(SectionKey),
}

pub struct Segmenter {
    default_title: String,
}

impl Default for Segmenter {
    fn default() -> Self {
        Self::new(DEFAULT_TITLE)
    }
}

impl Segmenter {
    pub fn new(default_title: impl Into<String>) -> Self {
        Self {
            default_title: default_title.into(),
        }
    }

    pub fn segment(&self, text: &str) -> SectionedDocument {
        let mut sections: HashMap<SectionKey, String> = HashMap::new();
        let mut preamble = String::new();
        let mut state = State::AwaitingContent;
        let mut title: Option<String> = None;
        let mut in_code_block = false;
        let mut previous_blank = true;

        for line in text.lines() {
            let trimmed = line.trim();

            if trimmed.starts_with("```") {
                in_code_block = !in_code_block;
                push_line(buffer(&mut sections, &mut preamble, &state), line);
                previous_blank = false;
                continue;
            }

            if in_code_block {
                push_line(buffer(&mut sections, &mut preamble, &state), line);
                continue;
            }

            if let Some(rest) = line.strip_prefix("# ") {
                debug!("Title heading: {}", rest.trim());
                title = Some(rest.trim().to_string());
                state = State::AwaitingContent;
                previous_blank = false;
                continue;
            }

            if let Some(rest) = line.strip_prefix("## ") {
                let heading = rest.trim().to_lowercase();
                let key = match resolve_section(&heading) {
                    Some(section) => {
                        debug!("Section heading '{}' -> {}", heading, section);
                        SectionKey::Canonical(section)
                    }
                    None => {
                        debug!("Unrecognized section heading '{}', keeping it as is", heading);
                        SectionKey::AdHoc(heading)
                    }
                };
                sections.entry(key.clone()).or_default();
                state = State::InSection(key);
                previous_blank = false;
                continue;
            }

            if trimmed.is_empty() {
                push_line(buffer(&mut sections, &mut preamble, &state), line);
                previous_blank = true;
                continue;
            }

            if previous_blank && is_implicit_heading(trimmed) {
                previous_blank = false;
                match resolve_section(trimmed) {
                    Some(section) => {
                        debug!("Implicit heading '{}' -> {}", trimmed, section);
                        let key = SectionKey::Canonical(section);
                        sections.entry(key.clone()).or_default();
                        state = State::InSection(key);
                        continue;
                    }
                    None => debug!("Implicit heading candidate '{}' not recognized", trimmed),
                }
            }

            previous_blank = false;
            push_line(buffer(&mut sections, &mut preamble, &state), line);
        }

        for section in CanonicalSection::ESSENTIAL {
            sections.entry(SectionKey::Canonical(section)).or_default();
        }

        sections.insert(
            SectionKey::Canonical(CanonicalSection::Title),
            title.unwrap_or_else(|| self.default_title.clone()),
        );

        let contact = extract_contact(text);
        sections.insert(SectionKey::Canonical(CanonicalSection::Contact), contact.to_json());

        SectionedDocument {
            sections,
            preamble,
            contact,
        }
    }
}

/// Segment with the default title placeholder.
pub fn segment(text: &str) -> SectionedDocument {
    Segmenter::default().segment(text)
}

fn buffer<'a>(
    sections: &'a mut HashMap<SectionKey, String>,
    preamble: &'a mut String,
    state: &State,
) -> &'a mut String {
    match state {
        State::AwaitingContent => preamble,
        State::InSection(key) => sections.entry(key.clone()).or_default(),
    }
}

fn push_line(buffer: &mut String, line: &str) {
    buffer.push_str(line);
    buffer.push('\n');
}

/// Upper-case line without markup that may stand for a heading.
fn is_implicit_heading(line: &str) -> bool {
    line.chars().count() > 3
        && !line.starts_with('#')
        && line.chars().any(char::is_alphabetic)
        && line == line.to_uppercase()
        && !is_numbered_item(line)
}
