//! Skills and languages, one record per line

use crate::processing::normalizer::normalize;
use crate::processing::patterns::strip_bullet;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

static BOLD_LABEL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\*\*([^:*]+):\*\*\s*(.*)$").expect("valid bold label regex"));

static CEFR_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b([abc])[12]\b").expect("valid CEFR regex"));

/// A skill line: a bare label or a labeled group such as `Langages: Rust, Go`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SkillRecord {
    Flat(String),
    Group { category: String, items: Vec<String> },
}

impl SkillRecord {
    pub fn parse_line(line: &str) -> Option<Self> {
        let line = strip_bullet(line);
        if line.is_empty() || line.starts_with('#') {
            return None;
        }

        if let Some((category, items)) = line.split_once(':') {
            let category = category.trim().trim_matches('*').trim();
            let items = items.trim().trim_start_matches('*').trim();

            // "https://..." and friends are not groups.
            if !category.is_empty() && !items.is_empty() && !items.starts_with("//") {
                let items: Vec<String> = items
                    .split(',')
                    .map(|item| item.trim().trim_matches('*').trim())
                    .filter(|item| !item.is_empty())
                    .map(str::to_string)
                    .collect();
                if !items.is_empty() {
                    return Some(SkillRecord::Group {
                        category: category.to_string(),
                        items,
                    });
                }
            }
        }

        let label = line.trim_matches('*').trim();
        (!label.is_empty()).then(|| SkillRecord::Flat(label.to_string()))
    }

    /// Individual skill names: the label itself, or the items of a group.
    pub fn labels(&self) -> Vec<&str> {
        match self {
            SkillRecord::Flat(label) => vec![label.as_str()],
            SkillRecord::Group { items, .. } => items.iter().map(String::as_str).collect(),
        }
    }
}

impl std::fmt::Display for SkillRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkillRecord::Flat(label) => write!(f, "{}", label),
            SkillRecord::Group { category, items } => write!(f, "{}: {}", category, items.join(", ")),
        }
    }
}

pub fn parse_skills(text: &str) -> Vec<SkillRecord> {
    text.lines().filter_map(SkillRecord::parse_line).collect()
}

/// Ordered proficiency scale, strongest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Proficiency {
    Native,
    Fluent,
    Professional,
    Intermediate,
    Basic,
    Unspecified,
}

const NATIVE_KEYWORDS: &[&str] = &["natif", "native", "maternel", "mother tongue"];
const FLUENT_KEYWORDS: &[&str] = &["courant", "fluent", "couramment", "bilingue", "bilingual"];
const PROFESSIONAL_KEYWORDS: &[&str] = &["professionnel", "professional"];
const INTERMEDIATE_KEYWORDS: &[&str] = &["intermediaire", "intermediate"];
const BASIC_KEYWORDS: &[&str] = &[
    "notions", "basique", "base", "basic", "debutant", "beginner", "elementaire", "elementary",
];

impl Proficiency {
    /// Classify free-form level text in French or English.
    ///
    /// Keywords are checked strongest first; a CEFR code such as `B2` is used only
    /// when no keyword matches.
    pub fn classify(level: &str) -> Self {
        let level = normalize(level);
        let has_any = |keywords: &[&str]| keywords.iter().any(|k| level.contains(k));

        if has_any(NATIVE_KEYWORDS) {
            Proficiency::Native
        } else if has_any(FLUENT_KEYWORDS) {
            Proficiency::Fluent
        } else if has_any(PROFESSIONAL_KEYWORDS) {
            Proficiency::Professional
        } else if has_any(INTERMEDIATE_KEYWORDS) {
            Proficiency::Intermediate
        } else if has_any(BASIC_KEYWORDS) {
            Proficiency::Basic
        } else {
            match CEFR_REGEX.captures(&level).map(|caps| caps[1].to_string()).as_deref() {
                Some("c") => Proficiency::Fluent,
                Some("b") => Proficiency::Intermediate,
                Some("a") => Proficiency::Basic,
                _ => Proficiency::Unspecified,
            }
        }
    }

    /// Display-only bar width in percent.
    pub fn intensity(&self) -> u8 {
        match self {
            Proficiency::Native => 100,
            Proficiency::Fluent => 90,
            Proficiency::Professional => 75,
            Proficiency::Intermediate => 60,
            Proficiency::Basic => 30,
            Proficiency::Unspecified => 70,
        }
    }

    pub fn label_fr(&self) -> &'static str {
        match self {
            Proficiency::Native => "Natif",
            Proficiency::Fluent => "Courant",
            Proficiency::Professional => "Professionnel",
            Proficiency::Intermediate => "Intermédiaire",
            Proficiency::Basic => "Notions",
            Proficiency::Unspecified => "",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageRecord {
    pub name: String,
    /// Level text as written, possibly empty.
    pub level: String,
    pub proficiency: Proficiency,
}

impl LanguageRecord {
    pub fn new(name: impl Into<String>, level: impl Into<String>) -> Self {
        let level = level.into();
        Self {
            name: name.into(),
            proficiency: Proficiency::classify(&level),
            level,
        }
    }

    pub fn parse_line(line: &str) -> Option<Self> {
        let line = strip_bullet(line);
        if line.is_empty() || line.starts_with('#') {
            return None;
        }

        if let Some(caps) = BOLD_LABEL_REGEX.captures(line) {
            return Some(Self::new(caps[1].trim(), caps[2].trim()));
        }

        if let Some((name, level)) = line.split_once(':') {
            let name = name.trim().trim_matches('*').trim();
            if !name.is_empty() {
                return Some(Self::new(name, level.trim().trim_matches('*').trim()));
            }
        }

        let name = line.trim_matches('*').trim();
        (!name.is_empty()).then(|| Self {
            name: name.to_string(),
            level: String::new(),
            proficiency: Proficiency::Unspecified,
        })
    }
}

pub fn parse_languages(text: &str) -> Vec<LanguageRecord> {
    text.lines().filter_map(LanguageRecord::parse_line).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flat_and_grouped_skills() {
        let skills = parse_skills("- Rust\n* **Langages:** Python, Go , \n\n• Git\n");

        assert_eq!(
            skills,
            vec![
                SkillRecord::Flat("Rust".to_string()),
                SkillRecord::Group {
                    category: "Langages".to_string(),
                    items: vec!["Python".to_string(), "Go".to_string()],
                },
                SkillRecord::Flat("Git".to_string()),
            ]
        );
    }

    #[test]
    fn test_urls_and_dangling_colons_stay_flat() {
        assert_eq!(
            SkillRecord::parse_line("- https://crates.io"),
            Some(SkillRecord::Flat("https://crates.io".to_string()))
        );
        assert_eq!(SkillRecord::parse_line("Outils:"), Some(SkillRecord::Flat("Outils:".to_string())));
        assert_eq!(SkillRecord::parse_line("### Heading"), None);
    }

    #[test]
    fn test_labels() {
        let group = SkillRecord::parse_line("Cloud: AWS, GCP").unwrap();
        assert_eq!(group.labels(), vec!["AWS", "GCP"]);
        assert_eq!(group.to_string(), "Cloud: AWS, GCP");
    }

    #[test]
    fn test_language_forms() {
        let languages = parse_languages("- **Français:** Natif\n- Anglais: Courant (C1)\n- Espagnol\n");

        assert_eq!(languages.len(), 3);
        assert_eq!(languages[0].name, "Français");
        assert_eq!(languages[0].level, "Natif");
        assert_eq!(languages[0].proficiency, Proficiency::Native);
        assert_eq!(languages[1].name, "Anglais");
        assert_eq!(languages[1].proficiency, Proficiency::Fluent);
        assert_eq!(languages[2].name, "Espagnol");
        assert_eq!(languages[2].proficiency, Proficiency::Unspecified);
    }

    #[test]
    fn test_proficiency_keywords() {
        assert_eq!(Proficiency::classify("Langue maternelle"), Proficiency::Native);
        assert_eq!(Proficiency::classify("Bilingue"), Proficiency::Fluent);
        assert_eq!(Proficiency::classify("Professional working proficiency"), Proficiency::Professional);
        assert_eq!(Proficiency::classify("INTERMÉDIAIRE"), Proficiency::Intermediate);
        assert_eq!(Proficiency::classify("Débutant"), Proficiency::Basic);
        assert_eq!(Proficiency::classify("B2"), Proficiency::Intermediate);
        assert_eq!(Proficiency::classify("niveau C2"), Proficiency::Fluent);
        assert_eq!(Proficiency::classify("A1"), Proficiency::Basic);
        assert_eq!(Proficiency::classify("lu, écrit"), Proficiency::Unspecified);
    }

    #[test]
    fn test_unrecognized_level_is_kept_verbatim() {
        let record = LanguageRecord::parse_line("Japonais: lu, écrit").unwrap();
        assert_eq!(record.level, "lu, écrit");
        assert_eq!(record.proficiency, Proficiency::Unspecified);
        assert_eq!(record.proficiency.intensity(), 70);
    }

    #[test]
    fn test_intensity_is_monotonic() {
        let scale = [
            Proficiency::Native,
            Proficiency::Fluent,
            Proficiency::Professional,
            Proficiency::Intermediate,
            Proficiency::Basic,
        ];
        assert!(scale.windows(2).all(|pair| pair[0].intensity() > pair[1].intensity()));
    }
}
