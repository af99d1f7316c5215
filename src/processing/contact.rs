//! Contact field extraction over a whole document

use crate::processing::patterns::{find_email, find_phone};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

static CV_OF_NAME_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"CV[ \t]+(?:de|of|pour|for)[ \t]+(\p{Lu}\p{Ll}+(?:[ \t]+\p{Lu}\p{Ll}+){1,3})")
        .expect("valid name regex")
});

static TITLE_HEADING_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^#[ \t]+(.+?)\s*$").expect("valid title heading regex"));

static LABELED_LOCATION_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?im)^[\s*•-]*(?:adresse|address|location|localisation)[*\s]*[:.][*\s]*([^\n]+)$")
        .expect("valid labeled location regex")
});

static LOCATION_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?i:à|in|de|from)[ \t]+(\p{Lu}\p{Ll}+(?:[,-][ \t]*\p{Lu}\p{Ll}+)?(?:,?[ \t]*\d{5})?)")
        .expect("valid location regex")
});

static LINKEDIN_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:linkedin\.com/in/|/in/)([a-z0-9_-]+)").expect("valid linkedin regex")
});

static LABELED_WEBSITE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:site(?:\s+web)?|website|portfolio|blog)\W{1,6}(https?://[^\s,)*]+)")
        .expect("valid labeled website regex")
});

static URL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)https?://[^\s,)*]+").expect("valid url regex"));

static GITHUB_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)github\.com/[a-z0-9_-]+").expect("valid github regex"));

static TWITTER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)twitter\.com/[a-z0-9_-]+").expect("valid twitter regex"));

/// Contact details of the résumé owner.
///
/// Every field holds either a matched value or its placeholder, never nothing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactRecord {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub linkedin: String,
    pub website: String,
    pub github: String,
    pub twitter: String,
}

impl Default for ContactRecord {
    fn default() -> Self {
        Self {
            name: "Prénom Nom".to_string(),
            email: "email@example.com".to_string(),
            phone: "+33 6 12 34 56 78".to_string(),
            location: "Paris, France".to_string(),
            linkedin: "linkedin.com/in/example".to_string(),
            website: String::new(),
            github: String::new(),
            twitter: String::new(),
        }
    }
}

impl ContactRecord {
    /// Whether the name was found in the document rather than defaulted.
    pub fn has_name(&self) -> bool {
        self.name != Self::default().name
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}

/// Scan the whole document for contact fields, each field independently.
pub fn extract_contact(text: &str) -> ContactRecord {
    let mut contact = ContactRecord::default();

    if let Some(email) = find_email(text) {
        contact.email = email.to_string();
    }

    if let Some(phone) = find_phone(text) {
        contact.phone = phone.to_string();
    }

    if let Some(name) = extract_name(text) {
        contact.name = name;
    }

    if let Some(location) = extract_location(text) {
        contact.location = location;
    }

    if let Some(caps) = LINKEDIN_REGEX.captures(text) {
        let matched = &caps[0];
        contact.linkedin = if matched.to_lowercase().contains("linkedin.com") {
            matched.to_string()
        } else {
            format!("linkedin.com{}", matched)
        };
    }

    if let Some(website) = extract_website(text) {
        contact.website = website;
    }

    if let Some(m) = GITHUB_REGEX.find(text) {
        contact.github = m.as_str().to_string();
    }

    if let Some(m) = TWITTER_REGEX.find(text) {
        contact.twitter = m.as_str().to_string();
    }

    contact
}

fn extract_name(text: &str) -> Option<String> {
    if let Some(caps) = CV_OF_NAME_REGEX.captures(text) {
        return Some(caps[1].trim().to_string());
    }

    TITLE_HEADING_REGEX
        .captures_iter(text)
        .map(|caps| caps[1].trim().to_string())
        .find(|heading| !heading.is_empty() && !starts_with_cv(heading))
}

fn starts_with_cv(heading: &str) -> bool {
    let mut words = heading.split_whitespace();
    matches!(words.next(), Some(first) if first.eq_ignore_ascii_case("cv"))
}

fn extract_location(text: &str) -> Option<String> {
    // A labeled line is more reliable than a preposition followed by a capitalized word.
    if let Some(caps) = LABELED_LOCATION_REGEX.captures(text) {
        let value = caps[1].trim().trim_matches('*').trim();
        if !value.is_empty() {
            return Some(value.to_string());
        }
    }

    LOCATION_REGEX
        .captures_iter(text)
        .filter(|caps| {
            let start = caps.get(0).map(|m| m.start()).unwrap_or(0);
            !text[..start].trim_end().ends_with("CV")
        })
        .map(|caps| caps[1].trim().to_string())
        .find(|location| !location.is_empty())
}

fn extract_website(text: &str) -> Option<String> {
    if let Some(caps) = LABELED_WEBSITE_REGEX.captures(text) {
        return Some(caps[1].trim_end_matches('.').to_string());
    }

    URL_REGEX
        .find_iter(text)
        .map(|m| m.as_str().trim_end_matches('.'))
        .find(|url| !url.to_lowercase().contains("linkedin.com"))
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_contact_block() {
        let text = "# Jean Dupont\n\n\
                    - **Email:** jean.dupont@mail.fr\n\
                    - **Téléphone:** +33 6 98 76 54 32\n\
                    - **Adresse:** 12 rue des Lilas, Lyon\n\
                    - **LinkedIn:** linkedin.com/in/jeandupont\n\
                    - **Site Web:** https://jeandupont.dev\n\
                    Code on github.com/jdupont and twitter.com/jdupont_dev\n";

        let contact = extract_contact(text);
        assert_eq!(contact.name, "Jean Dupont");
        assert_eq!(contact.email, "jean.dupont@mail.fr");
        assert_eq!(contact.phone, "+33 6 98 76 54 32");
        assert_eq!(contact.location, "12 rue des Lilas, Lyon");
        assert_eq!(contact.linkedin, "linkedin.com/in/jeandupont");
        assert_eq!(contact.website, "https://jeandupont.dev");
        assert_eq!(contact.github, "github.com/jdupont");
        assert_eq!(contact.twitter, "twitter.com/jdupont_dev");
    }

    #[test]
    fn test_phone_without_separators() {
        assert_eq!(extract_contact("Tél : 0612345678").phone, "0612345678");
        assert_eq!(extract_contact("Phone: +33612345678").phone, "+33612345678");
    }

    #[test]
    fn test_missing_fields_keep_placeholders() {
        let contact = extract_contact("Nothing useful here.");
        assert_eq!(contact, ContactRecord::default());
        assert!(!contact.has_name());
    }

    #[test]
    fn test_name_from_cv_phrase_wins_over_heading() {
        let contact = extract_contact("# Curriculum\nCV de Marie Curie\n");
        assert_eq!(contact.name, "Marie Curie");
    }

    #[test]
    fn test_cv_heading_is_not_a_name() {
        let contact = extract_contact("# CV Optimisé\n\n# Alice Martin\n");
        assert_eq!(contact.name, "Alice Martin");
    }

    #[test]
    fn test_location_from_preposition() {
        let contact = extract_contact("Développeuse basée à Bordeaux depuis 2019.");
        assert_eq!(contact.location, "Bordeaux");
    }

    #[test]
    fn test_bare_linkedin_handle_is_prefixed() {
        let contact = extract_contact("profile: /in/jdoe");
        assert_eq!(contact.linkedin, "linkedin.com/in/jdoe");
    }

    #[test]
    fn test_bare_url_skips_linkedin() {
        let contact = extract_contact("https://www.linkedin.com/in/x and https://blog.example.org/me");
        assert_eq!(contact.website, "https://blog.example.org/me");
    }

    #[test]
    fn test_extraction_is_idempotent_on_placeholders() {
        let serialized = ContactRecord::default().to_json();
        assert_eq!(extract_contact(&serialized), ContactRecord::default());
    }
}
