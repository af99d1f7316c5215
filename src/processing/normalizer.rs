//! Comparison-only text normalization
//!
//! Folds case and strips diacritics so that "Expérience", "EXPERIENCE" and
//! "experience" compare equal. Stored text is never passed through here.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Lowercase and strip combining marks.
pub fn normalize(text: &str) -> String {
    text.to_lowercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect()
}

/// Normalized, whitespace-collapsed form used for heading comparison.
pub fn normalize_heading(text: &str) -> String {
    normalize(text).split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_folds_case_and_accents() {
        assert_eq!(normalize("Expérience"), "experience");
        assert_eq!(normalize("COMPÉTENCES"), "competences");
        assert_eq!(normalize("Études"), "etudes");
        assert_eq!(normalize("à propos"), "a propos");
    }

    #[test]
    fn test_plain_ascii_is_only_lowercased() {
        assert_eq!(normalize("Work Experience"), "work experience");
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn test_heading_whitespace_collapsed() {
        assert_eq!(normalize_heading("  Expérience   Professionnelle "), "experience professionnelle");
    }
}
