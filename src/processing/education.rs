//! Education entries
//!
//! The structured path mirrors the experience parser. The heuristic path classifies
//! each paragraph and threads a single open entry through a fold, so that a school
//! or date paragraph can complete the diploma that precedes it.

use crate::processing::experience::{bullets, split_on_pipe};
use crate::processing::patterns::{
    bare_text, is_diploma, is_level3_heading, is_school, is_short_date, italic_text, level3_blocks,
    looks_like_contact, paragraphs, strip_bullet, Block,
};
use log::debug;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EducationEntry {
    pub title: String,
    pub school: String,
    pub period: String,
    pub details: Vec<String>,
}

impl EducationEntry {
    fn is_blank(&self) -> bool {
        self.title.is_empty() && self.details.is_empty()
    }

    /// Move date and school lines out of the details when those fields are still empty.
    fn promote_details(mut self) -> Self {
        let mut details = Vec::with_capacity(self.details.len());
        for detail in std::mem::take(&mut self.details) {
            if self.period.is_empty() && is_short_date(&detail) {
                self.period = bare_text(&detail).to_string();
            } else if self.school.is_empty() && is_school(&detail) {
                self.school = bare_text(&detail).to_string();
            } else {
                details.push(detail);
            }
        }
        self.details = details;
        self
    }
}

pub fn parse_education(text: &str) -> Vec<EducationEntry> {
    if text.lines().any(is_level3_heading) {
        parse_structured(text)
    } else {
        parse_heuristic(text)
    }
}

fn parse_structured(text: &str) -> Vec<EducationEntry> {
    level3_blocks(text)
        .into_iter()
        .filter_map(structured_entry)
        .filter(|entry| !entry.is_blank())
        .collect()
}

fn structured_entry(block: Block<'_>) -> Option<EducationEntry> {
    let mut body: Vec<&str> = block.lines.into_iter().filter(|line| !looks_like_contact(line)).collect();

    let header = match block.heading {
        Some(heading) => heading,
        None => {
            if body.is_empty() {
                return None;
            }
            body.remove(0)
        }
    };

    let (title, school) = split_on_pipe(header).unwrap_or((header.trim(), ""));

    let mut period = String::new();
    if let Some(index) = body.iter().position(|line| italic_text(line).is_some()) {
        period = italic_text(body.remove(index)).unwrap_or_default().to_string();
    }

    Some(EducationEntry {
        title: title.to_string(),
        school: school.to_string(),
        period,
        details: bullets(&body),
    })
}

/// What a paragraph contributes, decided by its first recognizable line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParagraphKind {
    Diploma,
    /// Index of the date line.
    Date(usize),
    /// Index of the institution line.
    Institution(usize),
    Unclassified,
}

fn classify(lines: &[&str]) -> ParagraphKind {
    for (index, line) in lines.iter().enumerate() {
        let line = bare_text(line);
        if is_diploma(line) {
            return ParagraphKind::Diploma;
        }
        if is_short_date(line) {
            return ParagraphKind::Date(index);
        }
        if is_school(line) {
            return ParagraphKind::Institution(index);
        }
    }
    ParagraphKind::Unclassified
}

/// Fold state of the heuristic path.
#[derive(Debug, Default)]
struct Accumulator {
    entries: Vec<EducationEntry>,
    open: Option<EducationEntry>,
}

impl Accumulator {
    fn absorb(mut self, lines: &[&str]) -> Self {
        let Some(first) = lines.first() else {
            return self;
        };

        match (classify(lines), self.open.take()) {
            (ParagraphKind::Diploma, previous) => {
                self.entries.extend(previous);
                self.open = Some(seed_entry(lines));
            }
            (ParagraphKind::Unclassified, previous) if looks_like_title(first) => {
                self.entries.extend(previous);
                self.open = Some(seed_entry(lines));
            }
            (ParagraphKind::Date(index), Some(mut entry)) => {
                entry.period = bare_text(lines[index]).to_string();
                entry.details.extend(bullets(&without(lines, index)));
                self.open = Some(entry);
            }
            (ParagraphKind::Institution(index), Some(mut entry)) => {
                entry.school = bare_text(lines[index]).to_string();
                entry.details.extend(bullets(&without(lines, index)));
                self.open = Some(entry);
            }
            (ParagraphKind::Unclassified, Some(mut entry)) => {
                entry.details.extend(bullets(lines));
                self.open = Some(entry);
            }
            (ParagraphKind::Date(_), None) => {
                debug!("Dropping date paragraph with no diploma to attach to: {}", first);
            }
            (ParagraphKind::Institution(_) | ParagraphKind::Unclassified, None) => {
                self.open = Some(EducationEntry {
                    title: bare_text(first).to_string(),
                    details: bullets(&lines[1..]),
                    ..Default::default()
                });
            }
        }
        self
    }

    fn finish(self) -> Vec<EducationEntry> {
        self.entries
            .into_iter()
            .chain(self.open)
            .map(EducationEntry::promote_details)
            .filter(|entry| !entry.is_blank())
            .collect()
    }
}

/// New entry titled by the first line (`Title | School` is split); later lines are
/// sorted into school, date or details.
fn seed_entry(lines: &[&str]) -> EducationEntry {
    let first = lines.first().map(|line| bare_text(line)).unwrap_or_default();
    let (title, school) = split_on_pipe(first).unwrap_or((first, ""));
    let mut entry = EducationEntry {
        title: title.to_string(),
        school: school.to_string(),
        ..Default::default()
    };

    for line in lines.iter().skip(1) {
        let clean = bare_text(line);
        if is_school(clean) {
            entry.school = clean.to_string();
        } else if is_short_date(clean) {
            entry.period = clean.to_string();
        } else if !clean.is_empty() {
            entry.details.push(strip_bullet(line).to_string());
        }
    }
    entry
}

/// A long capitalized line reads as a diploma name even without a keyword.
fn looks_like_title(line: &str) -> bool {
    let clean = bare_text(line);
    clean.chars().count() > 10 && clean.chars().next().is_some_and(char::is_uppercase)
}

fn without<'a>(lines: &[&'a str], index: usize) -> Vec<&'a str> {
    lines
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != index)
        .map(|(_, line)| *line)
        .collect()
}

/// Paragraph classification path for sections without `###` markers.
pub(crate) fn parse_heuristic(text: &str) -> Vec<EducationEntry> {
    paragraphs(text)
        .iter()
        .filter(|lines| !looks_like_contact(&lines.join("\n")))
        .fold(Accumulator::default(), |acc, lines| acc.absorb(lines))
        .finish()
}
