//! Canonical resume sections and the heading alias resolver

use crate::processing::normalizer::normalize_heading;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// Fixed resume categories.
///
/// Declaration order is the resolver's tie-break: when a heading matches aliases of
/// several sections, the one declared first wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CanonicalSection {
    Title,
    Profile,
    Experience,
    Education,
    Skills,
    Languages,
    Contact,
    Projects,
    Interests,
    Certifications,
    Achievements,
    References,
}

impl CanonicalSection {
    pub const ALL: [CanonicalSection; 12] = [
        CanonicalSection::Title,
        CanonicalSection::Profile,
        CanonicalSection::Experience,
        CanonicalSection::Education,
        CanonicalSection::Skills,
        CanonicalSection::Languages,
        CanonicalSection::Contact,
        CanonicalSection::Projects,
        CanonicalSection::Interests,
        CanonicalSection::Certifications,
        CanonicalSection::Achievements,
        CanonicalSection::References,
    ];

    /// Sections guaranteed to exist after segmentation.
    pub const ESSENTIAL: [CanonicalSection; 5] = [
        CanonicalSection::Profile,
        CanonicalSection::Experience,
        CanonicalSection::Education,
        CanonicalSection::Skills,
        CanonicalSection::Languages,
    ];

    /// Sections carried through verbatim as raw text.
    pub const EXTRA: [CanonicalSection; 5] = [
        CanonicalSection::Projects,
        CanonicalSection::Interests,
        CanonicalSection::Certifications,
        CanonicalSection::Achievements,
        CanonicalSection::References,
    ];

    /// Known spellings of the section heading, French and English.
    ///
    /// No normalized alias may appear under two sections.
    pub fn aliases(&self) -> &'static [&'static str] {
        match self {
            CanonicalSection::Title => &[],
            CanonicalSection::Profile => &[
                "profil", "profile", "présentation", "about", "à propos", "résumé", "resume",
                "summary", "introduction", "bio", "biographie",
            ],
            CanonicalSection::Experience => &[
                "expérience", "experiences", "expériences", "experience",
                "parcours professionnel", "expérience professionnelle",
                "professional experience", "work experience", "emplois", "jobs", "career",
                "carrière",
            ],
            CanonicalSection::Education => &[
                "formation", "education", "éducation", "formations", "études", "etudes",
                "parcours académique", "academic background", "scolarité", "diplômes",
                "qualifications", "cursus",
            ],
            CanonicalSection::Skills => &[
                "compétences", "competences", "skills", "compétence", "competence",
                "savoir-faire", "technologies", "expertises", "technical skills",
                "compétences techniques", "outils", "tools",
            ],
            CanonicalSection::Languages => &[
                "langues", "languages", "langue", "language", "compétences linguistiques",
                "language skills", "idiomas", "foreign languages",
            ],
            CanonicalSection::Contact => &[
                "contact", "coordonnées", "informations personnelles",
                "informations de contact", "personal information", "contact details",
                "contact info", "coordinates",
            ],
            CanonicalSection::Projects => &[
                "projets", "projects", "portfolio", "travaux", "projets personnels",
                "side projects", "projets significatifs", "significant projects",
            ],
            CanonicalSection::Interests => &[
                "intérêts", "interests", "loisirs", "hobbies", "centres d'intérêt",
                "activités", "extracurricular", "périscolaire", "passions", "passetemps",
            ],
            CanonicalSection::Certifications => &[
                "certifications", "certificates", "accréditations",
                "certifications professionnelles", "professional certifications", "licences",
            ],
            CanonicalSection::Achievements => &[
                "réalisations", "achievements", "accomplishments", "succès", "distinctions",
                "prix", "awards", "recognitions", "reconnaissances", "honors", "honours",
            ],
            CanonicalSection::References => &[
                "références", "references", "recommandations", "témoignages",
                "testimonials", "recommendation",
            ],
        }
    }

    /// Heading written by the markdown serializer.
    pub fn heading(&self) -> &'static str {
        match self {
            CanonicalSection::Title => "Titre",
            CanonicalSection::Profile => "Profil",
            CanonicalSection::Experience => "Expérience",
            CanonicalSection::Education => "Formation",
            CanonicalSection::Skills => "Compétences",
            CanonicalSection::Languages => "Langues",
            CanonicalSection::Contact => "Informations personnelles",
            CanonicalSection::Projects => "Projets",
            CanonicalSection::Interests => "Intérêts",
            CanonicalSection::Certifications => "Certifications",
            CanonicalSection::Achievements => "Réalisations",
            CanonicalSection::References => "Références",
        }
    }

    pub fn is_essential(&self) -> bool {
        Self::ESSENTIAL.contains(self)
    }
}

impl std::fmt::Display for CanonicalSection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            CanonicalSection::Title => "Title",
            CanonicalSection::Profile => "Profile",
            CanonicalSection::Experience => "Experience",
            CanonicalSection::Education => "Education",
            CanonicalSection::Skills => "Skills",
            CanonicalSection::Languages => "Languages",
            CanonicalSection::Contact => "Contact",
            CanonicalSection::Projects => "Projects",
            CanonicalSection::Interests => "Interests",
            CanonicalSection::Certifications => "Certifications",
            CanonicalSection::Achievements => "Achievements",
            CanonicalSection::References => "References",
        };
        write!(f, "{}", name)
    }
}

/// Normalized alias table, built once.
static NORMALIZED_ALIASES: LazyLock<Vec<(CanonicalSection, Vec<String>)>> = LazyLock::new(|| {
    CanonicalSection::ALL
        .iter()
        .map(|section| {
            let aliases = section.aliases().iter().map(|a| normalize_heading(a)).collect();
            (*section, aliases)
        })
        .collect()
});

/// Map a heading to its canonical section.
///
/// An exact normalized match anywhere in the table wins first, so a heading that is
/// itself a known alias always lands in its own section. Otherwise the first section
/// (in declaration order) with an alias contained in the heading, or containing the
/// heading, is returned.
pub fn resolve_section(heading: &str) -> Option<CanonicalSection> {
    let candidate = normalize_heading(heading);
    if candidate.is_empty() {
        return None;
    }

    let table = &*NORMALIZED_ALIASES;

    table
        .iter()
        .find(|(_, aliases)| aliases.iter().any(|alias| *alias == candidate))
        .or_else(|| {
            table.iter().find(|(_, aliases)| {
                aliases
                    .iter()
                    .any(|alias| candidate.contains(alias.as_str()) || alias.contains(candidate.as_str()))
            })
        })
        .map(|(section, _)| *section)
}
