//! Markdown serialization of a structured résumé
//!
//! The layout is the one the segmenter reads best: `##` section headings, `###` entry
//! headers with `Title | Company`, an italic period line and bullet lists. Rendering a
//! parsed résumé and parsing the result gives back the same structure.

use crate::processing::contact::ContactRecord;
use crate::processing::education::EducationEntry;
use crate::processing::experience::ExperienceEntry;
use crate::processing::resume::Resume;
use crate::processing::sections::CanonicalSection;
use crate::processing::skills::{LanguageRecord, SkillRecord};
use std::fmt::Write;

pub fn render_markdown(resume: &Resume) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "# {}\n", resume.title);

    section(&mut out, CanonicalSection::Contact);
    render_contact(&mut out, &resume.contact);

    section(&mut out, CanonicalSection::Profile);
    if !resume.profile.is_empty() {
        let _ = writeln!(out, "{}\n", resume.profile);
    }

    section(&mut out, CanonicalSection::Experience);
    for entry in &resume.experience {
        render_experience(&mut out, entry);
    }

    section(&mut out, CanonicalSection::Education);
    for entry in &resume.education {
        render_education(&mut out, entry);
    }

    section(&mut out, CanonicalSection::Skills);
    for skill in &resume.skills {
        let _ = match skill {
            SkillRecord::Flat(label) => writeln!(out, "- {}", label),
            SkillRecord::Group { category, items } => writeln!(out, "- **{}:** {}", category, items.join(", ")),
        };
    }
    out.push('\n');

    section(&mut out, CanonicalSection::Languages);
    for language in &resume.languages {
        render_language(&mut out, language);
    }
    out.push('\n');

    for extra in &resume.extra_sections {
        let _ = writeln!(out, "## {}\n\n{}\n", extra.heading, extra.content);
    }

    out.truncate(out.trim_end().len());
    out.push('\n');
    out
}

fn section(out: &mut String, section: CanonicalSection) {
    let _ = writeln!(out, "## {}\n", section.heading());
}

fn render_contact(out: &mut String, contact: &ContactRecord) {
    let fields = [
        ("Email", &contact.email),
        ("Téléphone", &contact.phone),
        ("LinkedIn", &contact.linkedin),
        ("Site Web", &contact.website),
        ("Adresse", &contact.location),
        ("GitHub", &contact.github),
        ("Twitter", &contact.twitter),
    ];
    for (label, value) in fields.iter().filter(|(_, value)| !value.is_empty()) {
        let _ = writeln!(out, "- **{}:** {}", label, value);
    }
    out.push('\n');
}

fn render_entry(out: &mut String, title: &str, place: &str, period: &str, bullets: &[String]) {
    if place.is_empty() {
        let _ = writeln!(out, "### {}", title);
    } else {
        let _ = writeln!(out, "### {} | {}", title, place);
    }
    if !period.is_empty() {
        let _ = writeln!(out, "*{}*", period);
    }
    for bullet in bullets {
        let _ = writeln!(out, "- {}", bullet);
    }
    out.push('\n');
}

fn render_experience(out: &mut String, entry: &ExperienceEntry) {
    render_entry(out, &entry.title, &entry.company, &entry.period, &entry.responsibilities);
}

fn render_education(out: &mut String, entry: &EducationEntry) {
    render_entry(out, &entry.title, &entry.school, &entry.period, &entry.details);
}

fn render_language(out: &mut String, language: &LanguageRecord) {
    let _ = if language.level.is_empty() {
        writeln!(out, "- {}", language.name)
    } else {
        writeln!(out, "- **{}:** {}", language.name, language.level)
    };
}
