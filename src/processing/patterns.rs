//! Shared line patterns used by the section parsers
//!
//! All regexes are compiled once and shared read-only across threads.

use regex::Regex;
use std::sync::LazyLock;

static BULLET_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[-*•]\s+").expect("valid bullet regex"));

static ITALIC_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:\*([^*\s][^*]*?)\*|_([^_\s][^_]*?)_)$").expect("valid italic regex")
});

static LEVEL3_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*###(?:\s|$)").expect("valid level-3 heading regex"));

/// Year or month/year range, open-ended ranges included.
static DATE_RANGE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?:(?:0?[1-9]|1[0-2])/)?(?:19|20)\d{2}(?:\s*[-–—]\s*|\s+(?:à|to)\s+)(?:(?:(?:0?[1-9]|1[0-2])/)?(?:19|20)\d{2}|présent|present|aujourd'hui|actuelle?|current|now)\b",
    )
    .expect("valid date range regex")
});

static NUMBERED_ITEM_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+\.").expect("valid numbered item regex"));

static SINGLE_YEAR_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:19|20)\d{2}$").expect("valid year regex"));

pub(crate) static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b[A-Z0-9._%+-]+@[A-Z0-9.-]+\.[A-Z]{2,}\b").expect("valid email regex")
});

static PHONE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:\+\d{1,3}[ \t.-]?)?(?:\(\d{1,4}\)[ \t.-]?)?\d{1,4}(?:[ \t.-]?\d{2,4}){1,5}")
        .expect("valid phone regex")
});

static CONTACT_LABEL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\*\*(?:e-?mail|mail|téléphone|telephone|tél|tel|phone|adresse|address|linkedin|site web|website|github|twitter):\*\*",
    )
    .expect("valid contact label regex")
});

static DIPLOMA_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?:master|licence|bachelor|doctorat|phd|mba|diplôme|diploma|degree|baccalauréat|bts|dut|ingénieur|formation|certificat)\b",
    )
    .expect("valid diploma regex")
});

static SCHOOL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?:université|university|école|ecole|school|institut|institute|center|centre|polytechnique|academy|académie|college|collège|lycée)\b",
    )
    .expect("valid school regex")
});

/// Drop a leading `-`, `*` or `•` list marker and surrounding whitespace.
pub fn strip_bullet(line: &str) -> &str {
    let trimmed = line.trim();
    match BULLET_REGEX.find(trimmed) {
        Some(m) => trimmed[m.end()..].trim(),
        None => trimmed,
    }
}

/// Line content without list marker, italic wrapping or bold markers.
pub fn bare_text(line: &str) -> &str {
    let stripped = strip_bullet(line);
    italic_text(stripped).unwrap_or(stripped).trim_matches('*').trim()
}

/// Inner text of a line wrapped in single `*` or `_`.
pub fn italic_text(line: &str) -> Option<&str> {
    let caps = ITALIC_REGEX.captures(line.trim())?;
    caps.get(1).or_else(|| caps.get(2)).map(|m| m.as_str().trim())
}

pub fn is_level3_heading(line: &str) -> bool {
    LEVEL3_REGEX.is_match(line)
}

pub fn strip_level3_marker(line: &str) -> &str {
    line.trim().trim_start_matches('#').trim()
}

pub fn is_numbered_item(line: &str) -> bool {
    NUMBERED_ITEM_REGEX.is_match(line.trim_start())
}

pub fn find_date_range(text: &str) -> Option<&str> {
    DATE_RANGE_REGEX.find(text).map(|m| m.as_str())
}

/// A short line that is essentially a date: a range or a lone year.
pub fn is_short_date(line: &str) -> bool {
    let line = line.trim();
    line.chars().count() < 20 && (DATE_RANGE_REGEX.is_match(line) || SINGLE_YEAR_REGEX.is_match(line))
}

pub fn find_email(text: &str) -> Option<&str> {
    EMAIL_REGEX.find(text).map(|m| m.as_str())
}

/// First phone-shaped run with 8 to 15 digits that is not just a list of years.
pub fn find_phone(text: &str) -> Option<&str> {
    PHONE_REGEX
        .find_iter(text)
        .map(|m| m.as_str().trim())
        .find(|candidate| is_plausible_phone(candidate))
}

fn is_plausible_phone(candidate: &str) -> bool {
    let digits = candidate.chars().filter(|c| c.is_ascii_digit()).count();
    if !(8..=15).contains(&digits) {
        return false;
    }

    let all_years = candidate
        .split(|c: char| !c.is_ascii_digit())
        .filter(|group| !group.is_empty())
        .all(|group| group.len() == 4 && (group.starts_with("19") || group.starts_with("20")));
    !all_years
}

/// Whether a line or paragraph carries contact details rather than content.
pub fn looks_like_contact(text: &str) -> bool {
    CONTACT_LABEL_REGEX.is_match(text) || EMAIL_REGEX.is_match(text) || find_phone(text).is_some()
}

pub fn is_diploma(line: &str) -> bool {
    DIPLOMA_REGEX.is_match(line)
}

pub fn is_school(line: &str) -> bool {
    SCHOOL_REGEX.is_match(line)
}

/// Text between two `###` markers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block<'a> {
    /// Heading text with the marker stripped, `None` for text before the first marker.
    pub heading: Option<&'a str>,
    /// Trimmed non-empty lines after the heading.
    pub lines: Vec<&'a str>,
}

/// Split at every level-3 heading. Leading text before the first heading becomes
/// a block of its own when it has any non-blank line.
pub fn level3_blocks(text: &str) -> Vec<Block<'_>> {
    let mut blocks = Vec::new();
    let mut current = Block {
        heading: None,
        lines: Vec::new(),
    };

    for line in text.lines() {
        if is_level3_heading(line) {
            if current.heading.is_some() || !current.lines.is_empty() {
                blocks.push(current);
            }
            current = Block {
                heading: Some(strip_level3_marker(line)),
                lines: Vec::new(),
            };
        } else if !line.trim().is_empty() {
            current.lines.push(line.trim());
        }
    }

    if current.heading.is_some() || !current.lines.is_empty() {
        blocks.push(current);
    }
    blocks
}

/// Blank-line delimited paragraphs, each as its trimmed non-empty lines.
pub fn paragraphs(text: &str) -> Vec<Vec<&str>> {
    let mut result = Vec::new();
    let mut current = Vec::new();

    for line in text.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            if !current.is_empty() {
                result.push(std::mem::take(&mut current));
            }
        } else {
            current.push(trimmed);
        }
    }

    if !current.is_empty() {
        result.push(current);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_bullet() {
        assert_eq!(strip_bullet("- Built X"), "Built X");
        assert_eq!(strip_bullet("  * Shipped Y "), "Shipped Y");
        assert_eq!(strip_bullet("• Led team"), "Led team");
        assert_eq!(strip_bullet("*2020-2022*"), "*2020-2022*");
        assert_eq!(strip_bullet("**Email:** a@b.co"), "**Email:** a@b.co");
    }

    #[test]
    fn test_bare_text() {
        assert_eq!(bare_text("- *2015-2017*"), "2015-2017");
        assert_eq!(bare_text("**Université Paris**"), "Université Paris");
        assert_eq!(bare_text("plain"), "plain");
    }

    #[test]
    fn test_italic_text() {
        assert_eq!(italic_text("*2020-2022*"), Some("2020-2022"));
        assert_eq!(italic_text("_2018 - Présent_"), Some("2018 - Présent"));
        assert_eq!(italic_text("**Bold**"), None);
        assert_eq!(italic_text("* bullet"), None);
    }

    #[test]
    fn test_level3_heading() {
        assert!(is_level3_heading("### Dev | Acme"));
        assert!(is_level3_heading("###"));
        assert!(!is_level3_heading("#### Deeper"));
        assert!(!is_level3_heading("## Section"));
        assert_eq!(strip_level3_marker("### Dev | Acme"), "Dev | Acme");
    }

    #[test]
    fn test_date_ranges() {
        assert_eq!(find_date_range("Acme 2015-2017 Paris"), Some("2015-2017"));
        assert_eq!(find_date_range("2019 – 2021"), Some("2019 – 2021"));
        assert_eq!(find_date_range("01/2020 - 06/2022"), Some("01/2020 - 06/2022"));
        assert_eq!(find_date_range("2021 - Présent"), Some("2021 - Présent"));
        assert_eq!(find_date_range("2015 à 2017"), Some("2015 à 2017"));
        assert_eq!(find_date_range("since 2019"), None);
    }

    #[test]
    fn test_short_date() {
        assert!(is_short_date("2015-2017"));
        assert!(is_short_date("2011"));
        assert!(!is_short_date("Worked there between 2015-2017 on many things"));
    }

    #[test]
    fn test_phone_detection() {
        assert_eq!(find_phone("Tel: +33 6 12 34 56 78"), Some("+33 6 12 34 56 78"));
        assert_eq!(find_phone("call 06.12.34.56.78 now"), Some("06.12.34.56.78"));
        assert_eq!(find_phone("(555) 123-4567"), Some("(555) 123-4567"));
        assert_eq!(find_phone("Tél : 0612345678"), Some("0612345678"));
        assert_eq!(find_phone("Phone: +33612345678"), Some("+33612345678"));
        assert_eq!(find_phone("2019 - 2023\n06 11 22 33 44"), Some("06 11 22 33 44"));
        assert_eq!(find_phone("depuis 2019"), None);
        assert_eq!(find_phone("2015-2017"), None);
        assert_eq!(find_phone("2015 - 2017"), None);
        assert_eq!(find_phone("Master Informatique"), None);
    }

    #[test]
    fn test_contact_lines() {
        assert!(looks_like_contact("- **Email:** jean@example.com"));
        assert!(looks_like_contact("jean.dupont@mail.fr"));
        assert!(looks_like_contact("+33 6 12 34 56 78"));
        assert!(!looks_like_contact("Université Paris"));
        assert!(!looks_like_contact("2015-2017"));
    }

    #[test]
    fn test_paragraphs() {
        let text = "a\nb\n\n  \nc\n\n";
        assert_eq!(paragraphs(text), vec![vec!["a", "b"], vec!["c"]]);
        assert!(paragraphs("\n\n").is_empty());
    }

    #[test]
    fn test_level3_blocks() {
        let text = "intro line\n### A | B\n*2020*\n\n- x\n### C\n";
        let blocks = level3_blocks(text);

        assert_eq!(blocks.len(), 3);
        assert_eq!(blocks[0], Block { heading: None, lines: vec!["intro line"] });
        assert_eq!(blocks[1], Block { heading: Some("A | B"), lines: vec!["*2020*", "- x"] });
        assert_eq!(blocks[2], Block { heading: Some("C"), lines: vec![] });
        assert!(level3_blocks("\n\n### Only\n")[0].heading.is_some());
        assert_eq!(level3_blocks("\n\n### Only\n").len(), 1);
    }

    #[test]
    fn test_diploma_and_school() {
        assert!(is_diploma("Master Informatique"));
        assert!(is_diploma("Diplôme d'ingénieur"));
        assert!(!is_diploma("Mastermind"));
        assert!(is_school("Université Paris"));
        assert!(is_school("École Polytechnique"));
        assert!(!is_school("Acme Corp"));
    }
}
