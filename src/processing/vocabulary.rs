//! Keyword vocabularies and job-description keyword extraction

use crate::error::{CvError, Result};
use aho_corasick::{AhoCorasick, MatchKind};
use std::collections::HashSet;
use std::sync::LazyLock;
use unicode_segmentation::UnicodeSegmentation;

/// Filler skills used when too few were found, in insertion order.
pub const DEFAULT_SKILLS: [&str; 6] = [
    "Développement logiciel",
    "Gestion de projet",
    "Travail d'équipe",
    "Résolution de problèmes",
    "Communication",
    "Adaptabilité",
];

const TECH_TERMS: &[&str] = &[
    "javascript", "typescript", "python", "java", "rust", "react", "node.js", "node", "html", "css",
    "php", "ruby", "c++", "c#", "swift", "kotlin", "sql", "nosql", "mongodb", "mysql", "postgresql",
    "redis", "git", "docker", "kubernetes", "terraform", "ansible", "aws", "azure", "gcp", "cloud",
    "api", "graphql", "microservices", "machine learning", "deep learning", "devops", "ci/cd",
    "linux", "kafka", "spark", "agile", "scrum",
];

const SOFT_TERMS: &[&str] = &[
    "communication", "leadership", "gestion", "équipe", "management", "problem solving", "analyse",
    "organisation", "autonomie", "adaptabilité", "créativité", "coordination", "collaboration",
    "teamwork", "mentoring", "negotiation",
];

/// Frequent job-description words that carry no skill.
const STOPWORDS: &[&str] = &[
    "pour", "dans", "avec", "cette", "nous", "vous", "notre", "votre", "with", "that", "this",
    "their", "which", "within", "should", "would", "looking", "please", "candidate", "opportunity",
];

static TECH_MATCHER: LazyLock<TermMatcher> =
    LazyLock::new(|| TermMatcher::new(TECH_TERMS).expect("valid tech vocabulary"));

static SOFT_MATCHER: LazyLock<TermMatcher> =
    LazyLock::new(|| TermMatcher::new(SOFT_TERMS).expect("valid soft-skill vocabulary"));

static STOPWORD_SET: LazyLock<HashSet<&'static str>> = LazyLock::new(|| STOPWORDS.iter().copied().collect());

/// Whole-word, ASCII case-insensitive matcher over a fixed vocabulary.
pub struct TermMatcher {
    automaton: AhoCorasick,
}

impl TermMatcher {
    pub fn new(terms: &[&str]) -> Result<Self> {
        let automaton = AhoCorasick::builder()
            .ascii_case_insensitive(true)
            .match_kind(MatchKind::LeftmostLongest)
            .build(terms)
            .map_err(|e| CvError::Configuration(format!("Failed to build term matcher: {}", e)))?;

        Ok(Self { automaton })
    }

    /// Vocabulary terms found in `text`, as written there, first occurrence only.
    pub fn find_terms<'t>(&self, text: &'t str) -> Vec<&'t str> {
        let mut seen = HashSet::new();
        let mut found = Vec::new();

        for mat in self.automaton.find_iter(text) {
            if !is_word_boundary(text, mat.start(), mat.end()) {
                continue;
            }
            let term = &text[mat.start()..mat.end()];
            if seen.insert(term.to_lowercase()) {
                found.push(term);
            }
        }
        found
    }
}

fn is_word_boundary(text: &str, start: usize, end: usize) -> bool {
    let before = text[..start].chars().next_back();
    let after = text[end..].chars().next();
    !before.is_some_and(char::is_alphanumeric) && !after.is_some_and(char::is_alphanumeric)
}

pub fn tech_terms(text: &str) -> Vec<&str> {
    TECH_MATCHER.find_terms(text)
}

pub fn soft_terms(text: &str) -> Vec<&str> {
    SOFT_MATCHER.find_terms(text)
}

/// First `limit` distinct words of a job description with at least `min_chars`
/// characters, stopwords excluded.
pub fn job_keywords(job: &str, limit: usize, min_chars: usize) -> Vec<String> {
    let mut seen = HashSet::new();

    job.unicode_words()
        .filter(|word| word.chars().count() >= min_chars)
        .filter(|word| !STOPWORD_SET.contains(word.to_lowercase().as_str()))
        .filter(|word| seen.insert(word.to_lowercase()))
        .take(limit)
        .map(str::to_string)
        .collect()
}
