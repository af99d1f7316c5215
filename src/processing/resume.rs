//! The structured résumé and the parsing pipeline that builds it

use crate::config::ParsingConfig;
use crate::processing::contact::ContactRecord;
use crate::processing::education::{self, parse_education, EducationEntry};
use crate::processing::experience::{self, parse_experience, ExperienceEntry};
use crate::processing::patterns::is_diploma;
use crate::processing::sections::CanonicalSection;
use crate::processing::segmenter::{SectionedDocument, Segmenter};
use crate::processing::skills::{parse_languages, parse_skills, LanguageRecord, SkillRecord};
use log::{debug, warn};
use serde::{Deserialize, Serialize};

/// A section carried through as raw text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtraSection {
    pub heading: String,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resume {
    pub title: String,
    pub contact: ContactRecord,
    pub profile: String,
    pub experience: Vec<ExperienceEntry>,
    pub education: Vec<EducationEntry>,
    pub skills: Vec<SkillRecord>,
    pub languages: Vec<LanguageRecord>,
    pub extra_sections: Vec<ExtraSection>,
}

impl Resume {
    pub fn from_sections(doc: &SectionedDocument) -> Self {
        let experience_text = doc.get(CanonicalSection::Experience);
        let experience = if experience_text.trim().is_empty() {
            experience_from_preamble(doc.preamble())
        } else {
            parse_experience(experience_text)
        };

        let education_text = doc.get(CanonicalSection::Education);
        let education = if education_text.trim().is_empty() {
            education_from_preamble(doc.preamble())
        } else {
            parse_education(education_text)
        };

        let extra_sections: Vec<ExtraSection> = CanonicalSection::EXTRA
            .iter()
            .map(|section| (section.heading(), doc.get(*section)))
            .chain(doc.ad_hoc_sections())
            .filter(|(_, content)| !content.trim().is_empty())
            .map(|(heading, content)| ExtraSection {
                heading: heading.to_string(),
                content: content.trim().to_string(),
            })
            .collect();

        Self {
            title: doc.title().to_string(),
            contact: doc.contact().clone(),
            profile: doc.get(CanonicalSection::Profile).trim().to_string(),
            experience,
            education,
            skills: parse_skills(doc.get(CanonicalSection::Skills)),
            languages: parse_languages(doc.get(CanonicalSection::Languages)),
            extra_sections,
        }
    }

    /// Essential sections that ended up with no content.
    pub fn missing_sections(&self) -> Vec<CanonicalSection> {
        CanonicalSection::ESSENTIAL
            .into_iter()
            .filter(|section| match section {
                CanonicalSection::Profile => self.profile.trim().is_empty(),
                CanonicalSection::Experience => self.experience.is_empty(),
                CanonicalSection::Education => self.education.is_empty(),
                CanonicalSection::Skills => self.skills.is_empty(),
                CanonicalSection::Languages => self.languages.is_empty(),
                _ => false,
            })
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.missing_sections().is_empty()
    }
}

/// Paragraphs outside any section only count as jobs when they carry a period.
fn experience_from_preamble(preamble: &str) -> Vec<ExperienceEntry> {
    let entries: Vec<ExperienceEntry> = experience::parse_heuristic(preamble)
        .into_iter()
        .filter(|entry| !entry.period.is_empty() && !is_diploma(&entry.title))
        .collect();
    if !entries.is_empty() {
        debug!("Recovered {} experience entries from unsectioned text", entries.len());
    }
    entries
}

/// A period alone is not enough here: job paragraphs carry periods too.
fn education_from_preamble(preamble: &str) -> Vec<EducationEntry> {
    let entries: Vec<EducationEntry> = education::parse_heuristic(preamble)
        .into_iter()
        .filter(|entry| is_diploma(&entry.title) || !entry.school.is_empty())
        .collect();
    if !entries.is_empty() {
        debug!("Recovered {} education entries from unsectioned text", entries.len());
    }
    entries
}

/// Runs segmentation and entity extraction over one document.
#[derive(Debug, Clone, Default)]
pub struct ResumeParser {
    config: ParsingConfig,
}

impl ResumeParser {
    pub fn new(config: ParsingConfig) -> Self {
        Self { config }
    }

    pub fn parse(&self, text: &str) -> Resume {
        Resume::from_sections(&self.segment(text))
    }

    pub fn segment(&self, text: &str) -> SectionedDocument {
        let text = self.bounded(text);
        Segmenter::new(self.config.default_title.as_str()).segment(text)
    }

    /// Cut oversized input at the last char boundary under the configured limit.
    fn bounded<'a>(&self, text: &'a str) -> &'a str {
        let limit = self.config.max_input_bytes;
        if text.len() <= limit {
            return text;
        }

        let mut end = limit;
        while !text.is_char_boundary(end) {
            end -= 1;
        }
        warn!("Input is {} bytes, truncating to {} bytes before parsing", text.len(), end);
        &text[..end]
    }
}

/// Parse with the default configuration.
pub fn parse_resume(text: &str) -> Resume {
    ResumeParser::default().parse(text)
}
