//! Offline résumé synthesis
//!
//! Builds a complete résumé from the original text and a job description alone:
//! whatever the parser recovers is kept, and every essential section that comes back
//! empty is filled with deterministic templated content driven by job keywords.

use crate::config::{ParsingConfig, SynthesisConfig};
use crate::processing::education::EducationEntry;
use crate::processing::experience::ExperienceEntry;
use crate::processing::normalizer::normalize;
use crate::processing::resume::{Resume, ResumeParser};
use crate::processing::skills::{LanguageRecord, Proficiency, SkillRecord};
use crate::processing::vocabulary::{job_keywords, soft_terms, tech_terms, DEFAULT_SKILLS};
use chrono::Datelike;
use log::info;
use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

const JOB_TITLES: [&str; 8] = [
    "Développeur",
    "Ingénieur",
    "Chef de projet",
    "Consultant",
    "Responsable",
    "Architecte",
    "Analyste",
    "Spécialiste",
];

const COMPANIES: [&str; 6] = [
    "Entreprise Tech",
    "Société Innovante",
    "Groupe International",
    "Start-up",
    "Cabinet de Conseil",
    "Agence Digitale",
];

const DIPLOMAS: [&str; 6] = [
    "Master",
    "Licence",
    "Diplôme",
    "Formation certifiante",
    "Bachelor",
    "Certification avancée",
];

const INSTITUTIONS: [&str; 5] = [
    "Université",
    "École Supérieure",
    "Institut Spécialisé",
    "Centre de Formation",
    "Académie",
];

/// Number of entries fabricated for an empty experience or education section.
const FABRICATED_ENTRIES: usize = 2;

/// Known languages: display name, spellings to look for, default level.
const KNOWN_LANGUAGES: [(&str, &[&str], Proficiency); 5] = [
    ("Français", &["francais", "french"], Proficiency::Native),
    ("Anglais", &["anglais", "english"], Proficiency::Professional),
    ("Espagnol", &["espagnol", "spanish"], Proficiency::Basic),
    ("Allemand", &["allemand", "german"], Proficiency::Basic),
    ("Italien", &["italien", "italian"], Proficiency::Basic),
];

static YEARS_OF_EXPERIENCE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(\d{1,2})\s*(?:ans|années|an|years?)\s*(?:d'expérience|d'expertise|dans|en|of experience|experience)")
        .expect("valid years of experience regex")
});

static LANGUAGE_SEPARATOR_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[,;/|]|\s(?:et|and)\s").expect("valid language separator regex"));

pub struct Synthesizer {
    parser: ResumeParser,
    config: SynthesisConfig,
}

impl Default for Synthesizer {
    fn default() -> Self {
        Self::new(ParsingConfig::default(), SynthesisConfig::default())
    }
}

impl Synthesizer {
    pub fn new(parsing: ParsingConfig, config: SynthesisConfig) -> Self {
        Self {
            parser: ResumeParser::new(parsing),
            config,
        }
    }

    /// Assemble a complete résumé. Never fails; missing parts are fabricated.
    pub fn synthesize(&self, original: &str, job: &str) -> Resume {
        let extracted = self.parser.parse(original);
        let keywords = job_keywords(job, self.config.job_keyword_limit, self.config.min_keyword_chars);
        let year = self.anchor_year();

        let experience = if extracted.experience.is_empty() {
            info!("No experience recovered, fabricating {} entries", FABRICATED_ENTRIES);
            (0..FABRICATED_ENTRIES).map(|rank| fabricated_experience(&keywords, rank, year)).collect()
        } else {
            extracted.experience
        };

        let education = if extracted.education.is_empty() {
            info!("No education recovered, fabricating {} entries", FABRICATED_ENTRIES);
            (0..FABRICATED_ENTRIES).map(|rank| fabricated_education(&keywords, rank, year)).collect()
        } else {
            extracted.education
        };

        let languages = if extracted.languages.is_empty() {
            info!("No languages section, detecting languages from the text");
            detect_languages(original)
        } else {
            extracted.languages
        };

        let profile = if extracted.profile.chars().count() > 100 {
            condensed_profile(&extracted.profile)
        } else {
            info!("Profile missing or too short, using a templated profile");
            templated_profile(original, &keywords)
        };

        let skills = self
            .rank_skills(&extracted.skills, original, job, &keywords)
            .into_iter()
            .map(SkillRecord::Flat)
            .collect();

        let name = if extracted.contact.has_name() {
            extracted.contact.name.as_str()
        } else {
            "Candidat"
        };

        Resume {
            title: format!("CV de {}", name),
            contact: extracted.contact.clone(),
            profile,
            experience,
            education,
            skills,
            languages,
            extra_sections: extracted.extra_sections,
        }
    }

    /// Candidate skills in first-seen order, job-relevant ones first, bounded on both ends.
    fn rank_skills(&self, extracted: &[SkillRecord], original: &str, job: &str, keywords: &[String]) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut skills: Vec<String> = extracted
            .iter()
            .flat_map(SkillRecord::labels)
            .chain(tech_terms(original))
            .chain(soft_terms(original))
            .chain(keywords.iter().map(String::as_str))
            .filter(|skill| !skill.is_empty() && seen.insert(skill.to_lowercase()))
            .map(str::to_string)
            .collect();

        let job_lower = job.to_lowercase();
        let in_job = |skill: &String| job_lower.contains(&skill.to_lowercase());

        skills.sort_by_key(|skill| !in_job(skill));
        skills.truncate(self.config.max_skills);

        for default in DEFAULT_SKILLS {
            if skills.len() >= self.config.min_skills {
                break;
            }
            let default_lower = default.to_lowercase();
            if !skills.iter().any(|skill| skill.to_lowercase() == default_lower) {
                skills.push(default.to_string());
            }
        }

        skills.sort_by_key(|skill| !in_job(skill));
        skills
    }

    fn anchor_year(&self) -> i32 {
        self.config
            .current_year
            .unwrap_or_else(|| chrono::Local::now().year())
    }
}

/// Synthesize with default configuration.
pub fn synthesize(original: &str, job: &str) -> Resume {
    Synthesizer::default().synthesize(original, job)
}

fn keyword_for<'a>(keywords: &'a [String], rank: usize, fallback: &'a str) -> &'a str {
    keywords
        .get(rank)
        .or_else(|| keywords.first())
        .map(String::as_str)
        .unwrap_or(fallback)
}

fn fabricated_experience(keywords: &[String], rank: usize, year: i32) -> ExperienceEntry {
    let keyword = keyword_for(keywords, rank, "domaine");
    let end = year.saturating_sub(2 * rank as i32);
    let start = end.saturating_sub(2);
    let period = if rank == 0 {
        format!("{} - Présent", start)
    } else {
        format!("{} - {}", start, end)
    };

    ExperienceEntry {
        title: format!("{} {}", JOB_TITLES[rank % JOB_TITLES.len()], keyword),
        company: COMPANIES[rank % COMPANIES.len()].to_string(),
        period,
        responsibilities: vec![
            format!("Développement et amélioration de solutions liées à {}", keyword),
            "Collaboration avec les équipes pour atteindre les objectifs fixés".to_string(),
            "Mise en œuvre de technologies innovantes pour résoudre des problèmes complexes".to_string(),
        ],
    }
}

fn fabricated_education(keywords: &[String], rank: usize, year: i32) -> EducationEntry {
    let keyword = keyword_for(keywords, rank, "spécialité");
    let end = year.saturating_sub(5 + 3 * rank as i32);
    let start = end.saturating_sub(if rank == 0 { 2 } else { 3 });

    EducationEntry {
        title: format!("{} en {}", DIPLOMAS[rank % DIPLOMAS.len()], keyword),
        school: INSTITUTIONS[rank % INSTITUTIONS.len()].to_string(),
        period: format!("{} - {}", start, end),
        details: vec![
            format!("Spécialisation en {}", keyword),
            "Projets pratiques et travaux de recherche appliqués".to_string(),
        ],
    }
}

/// Known languages mentioned in the text, French and English always included.
///
/// A level is read from the clause naming the language only, so one line may
/// list several languages at different levels.
fn detect_languages(original: &str) -> Vec<LanguageRecord> {
    let lines: Vec<String> = original.lines().map(normalize).collect();
    let clauses: Vec<&str> = lines
        .iter()
        .flat_map(|line| LANGUAGE_SEPARATOR_REGEX.split(line))
        .collect();

    KNOWN_LANGUAGES
        .iter()
        .filter_map(|(name, spellings, default)| {
            let mention = clauses
                .iter()
                .find(|clause| spellings.iter().any(|spelling| clause.contains(spelling)));

            let proficiency = match mention {
                Some(clause) => match Proficiency::classify(clause) {
                    Proficiency::Unspecified => *default,
                    detected => detected,
                },
                None if matches!(*name, "Français" | "Anglais") => *default,
                None => return None,
            };
            Some(LanguageRecord::new(*name, proficiency.label_fr()))
        })
        .collect()
}

/// Existing profile text on one line, capped at 300 characters.
fn condensed_profile(profile: &str) -> String {
    profile
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .collect::<Vec<_>>()
        .join(" ")
        .chars()
        .take(300)
        .collect()
}

fn templated_profile(original: &str, keywords: &[String]) -> String {
    let mut profile = match YEARS_OF_EXPERIENCE_REGEX.captures(original) {
        Some(caps) => format!("Professionnel avec {} ans d'expérience ", &caps[1]),
        None => "Professionnel expérimenté ".to_string(),
    };

    let domains: Vec<&str> = keywords.iter().take(2).map(String::as_str).collect();
    if domains.is_empty() {
        profile.push_str("dans ce secteur. ");
    } else {
        profile.push_str(&format!("spécialisé en {}. ", domains.join(" et ")));
    }

    let strengths: Vec<&str> = keywords.iter().skip(2).take(3).map(String::as_str).collect();
    if strengths.is_empty() {
        profile.push_str(
            "Passionné par les défis techniques et l'innovation. À la recherche d'une opportunité \
             pour mettre à profit mes compétences et contribuer au succès de projets ambitieux.",
        );
    } else {
        profile.push_str(&format!("Compétences avancées en {}. ", strengths.join(", ")));
        profile.push_str(
            "À la recherche d'une opportunité pour contribuer efficacement à des projets innovants dans ce domaine.",
        );
    }
    profile
}

#[cfg(test)]
mod tests {
    use super::*;

    const JOB: &str = "Senior Backend Engineer with Kubernetes and distributed systems experience";

    fn synthesizer() -> Synthesizer {
        Synthesizer::new(
            ParsingConfig::default(),
            SynthesisConfig {
                current_year: Some(2025),
                ..Default::default()
            },
        )
    }

    #[test]
    fn test_empty_resume_is_completed() {
        let resume = synthesizer().synthesize("", JOB);

        assert!(resume.is_complete());
        assert_eq!(resume.title, "CV de Candidat");
        assert!(resume.skills.len() >= 6);
        assert!(resume.skills.iter().any(|s| s.to_string() == "Kubernetes"));
        assert_eq!(resume.experience.len(), 2);
        assert_eq!(resume.experience[0].period, "2023 - Présent");
        assert_eq!(resume.experience[1].period, "2021 - 2023");
        assert_eq!(resume.experience[0].title, "Développeur Senior");
        assert_eq!(resume.experience[1].company, "Société Innovante");
        assert_eq!(resume.education[0].period, "2018 - 2020");
        assert_eq!(resume.education[1].period, "2014 - 2017");
        assert_eq!(resume.education[1].title, "Licence en Backend");
    }

    #[test]
    fn test_job_skills_rank_before_filler() {
        let resume = synthesizer().synthesize("", "Python developer in Lyon");
        let labels: Vec<String> = resume.skills.iter().map(|s| s.to_string()).collect();

        assert_eq!(&labels[..2], &["Python", "developer"]);
        assert_eq!(labels.len(), 6);
        assert_eq!(&labels[2..], &DEFAULT_SKILLS[..4]);
    }

    #[test]
    fn test_skill_presence_ordering_holds() {
        let original = "## Compétences\n- Docker\n- Cobol\n- Langages: Rust, Java\n\nleadership et communication";
        let job = "We need Rust and Docker people with strong communication";
        let resume = synthesizer().synthesize(original, job);
        let job_lower = job.to_lowercase();

        let presence: Vec<bool> = resume
            .skills
            .iter()
            .map(|s| job_lower.contains(&s.to_string().to_lowercase()))
            .collect();
        assert!(presence.windows(2).all(|w| w[0] || !w[1]), "{:?}", resume.skills);
        assert!(resume.skills.len() <= 8);
    }

    #[test]
    fn test_extracted_sections_are_kept() {
        let original = "# CV de Marie Curie\n\n## Expérience\n### Chercheuse | Institut du Radium\n*1914 - 1934*\n- Radioactivité\n";
        let resume = synthesizer().synthesize(original, JOB);

        assert_eq!(resume.title, "CV de Marie Curie");
        assert_eq!(resume.experience.len(), 1);
        assert_eq!(resume.experience[0].company, "Institut du Radium");
        assert_eq!(resume.education.len(), 2);
    }

    #[test]
    fn test_language_detection() {
        let languages = detect_languages("Anglais courant\nNotions d'espagnol");

        let summary: Vec<(&str, Proficiency)> =
            languages.iter().map(|l| (l.name.as_str(), l.proficiency)).collect();
        assert_eq!(
            summary,
            vec![
                ("Français", Proficiency::Native),
                ("Anglais", Proficiency::Fluent),
                ("Espagnol", Proficiency::Basic),
            ]
        );
    }

    #[test]
    fn test_out_of_range_anchor_year_saturates() {
        let synthesizer = Synthesizer::new(
            ParsingConfig::default(),
            SynthesisConfig {
                current_year: Some(i32::MIN),
                ..Default::default()
            },
        );
        let resume = synthesizer.synthesize("", "Rust developer");

        assert_eq!(resume.experience.len(), 2);
        assert_eq!(resume.experience[1].period, format!("{} - {}", i32::MIN, i32::MIN));
        assert_eq!(resume.education[0].period, format!("{} - {}", i32::MIN, i32::MIN));
    }

    #[test]
    fn test_languages_sharing_a_line() {
        let languages = detect_languages("Langues parlées : Français natif, Anglais courant");
        assert_eq!(languages[0].proficiency, Proficiency::Native);
        assert_eq!(languages[1].name, "Anglais");
        assert_eq!(languages[1].proficiency, Proficiency::Fluent);

        let languages = detect_languages("Allemand courant et italien débutant / espagnol");
        let summary: Vec<(&str, Proficiency)> =
            languages.iter().map(|l| (l.name.as_str(), l.proficiency)).collect();
        assert_eq!(
            summary,
            vec![
                ("Français", Proficiency::Native),
                ("Anglais", Proficiency::Professional),
                ("Espagnol", Proficiency::Basic),
                ("Allemand", Proficiency::Fluent),
                ("Italien", Proficiency::Basic),
            ]
        );
    }

    #[test]
    fn test_profile_reuse_and_template() {
        let long = "Ingénieure backend avec un goût prononcé pour les systèmes distribués.\n\
                    Habituée aux environnements exigeants et aux équipes pluridisciplinaires.";
        assert_eq!(condensed_profile(long), long.replace('\n', " "));

        let keywords: Vec<String> = ["Kubernetes", "distributed", "systems"].iter().map(|s| s.to_string()).collect();
        let profile = templated_profile("J'ai 7 ans d'expérience en backend", &keywords);
        assert!(profile.starts_with("Professionnel avec 7 ans d'expérience spécialisé en Kubernetes et distributed."));
        assert!(profile.contains("Compétences avancées en systems."));
    }
}
