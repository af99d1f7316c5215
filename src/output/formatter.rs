//! Output formatters for structured résumés and raw section maps

use crate::config::{OutputConfig, OutputFormat};
use crate::error::Result;
use crate::output::markdown::render_markdown;
use crate::processing::resume::Resume;
use crate::processing::sections::CanonicalSection;
use crate::processing::segmenter::{SectionKey, SectionedDocument};
use crate::processing::skills::SkillRecord;
use colored::{Color, Colorize};
use serde_json::{json, Map, Value};
use std::path::{Path, PathBuf};

pub trait OutputFormatter {
    fn format_resume(&self, resume: &Resume) -> Result<String>;
    fn format_sections(&self, doc: &SectionedDocument) -> Result<String>;
    fn supports_format(&self) -> OutputFormat;
}

/// Terminal rendering with optional colors and proficiency bars.
pub struct ConsoleFormatter {
    use_colors: bool,
}

pub struct JsonFormatter {
    pretty: bool,
}

pub struct MarkdownFormatter;

/// Formatter matching the configured output format.
pub fn formatter_for(config: &OutputConfig) -> Box<dyn OutputFormatter> {
    match config.format {
        OutputFormat::Console => Box::new(ConsoleFormatter::new(config.color_output)),
        OutputFormat::Json => Box::new(JsonFormatter::new(true)),
        OutputFormat::Markdown => Box::new(MarkdownFormatter),
    }
}

/// Sections in canonical order, then ad hoc sections by heading.
fn ordered_sections(doc: &SectionedDocument) -> Vec<(String, &str)> {
    let canonical = CanonicalSection::ALL
        .into_iter()
        .filter(|section| doc.contains(&SectionKey::Canonical(*section)))
        .map(|section| (section.to_string(), doc.get(section)));

    let ad_hoc = doc
        .ad_hoc_sections()
        .into_iter()
        .map(|(heading, text)| (heading.to_string(), text));

    canonical.chain(ad_hoc).collect()
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool) -> Self {
        Self { use_colors }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str, level: u8) -> String {
        let (prefix, color) = match level {
            1 => ("█", Color::Blue),
            2 => ("▓", Color::Green),
            _ => ("▒", Color::Yellow),
        };

        if self.use_colors {
            format!("\n{} {}\n", prefix.color(color).bold(), title.color(color).bold())
        } else {
            format!("\n{} {}\n", prefix, title)
        }
    }

    /// Ten-cell bar for a percentage.
    fn format_bar(&self, percent: u8) -> String {
        let filled = usize::from(percent.min(100)) / 10;
        let bar = format!("{}{}", "■".repeat(filled), "□".repeat(10 - filled));
        let color = match percent {
            90..=100 => Color::Green,
            60..=89 => Color::Yellow,
            _ => Color::Red,
        };
        self.colorize(&bar, color)
    }

    fn format_entry(&self, title: &str, place: &str, period: &str, bullets: &[String]) -> String {
        let mut output = format!("  {}", self.colorize(title, Color::White));
        if !place.is_empty() {
            output.push_str(&format!(" @ {}", self.colorize(place, Color::Cyan)));
        }
        if !period.is_empty() {
            output.push_str(&format!(" {}", self.colorize(&format!("({})", period), Color::BrightBlack)));
        }
        output.push('\n');
        for bullet in bullets {
            output.push_str(&format!("    • {}\n", bullet));
        }
        output
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_resume(&self, resume: &Resume) -> Result<String> {
        let mut output = String::new();

        output.push_str(&self.format_header(&resume.title, 1));

        let contact = &resume.contact;
        let fields = [
            ("Email", &contact.email),
            ("Phone", &contact.phone),
            ("Location", &contact.location),
            ("LinkedIn", &contact.linkedin),
            ("Website", &contact.website),
            ("GitHub", &contact.github),
            ("Twitter", &contact.twitter),
        ];
        for (label, value) in fields.iter().filter(|(_, value)| !value.is_empty()) {
            output.push_str(&format!("{}: {}\n", self.colorize(label, Color::Cyan), value));
        }

        if !resume.profile.is_empty() {
            output.push_str(&self.format_header("Profile", 2));
            output.push_str(&format!("{}\n", resume.profile));
        }

        if !resume.experience.is_empty() {
            output.push_str(&self.format_header("Experience", 2));
            for entry in &resume.experience {
                output.push_str(&self.format_entry(&entry.title, &entry.company, &entry.period, &entry.responsibilities));
            }
        }

        if !resume.education.is_empty() {
            output.push_str(&self.format_header("Education", 2));
            for entry in &resume.education {
                output.push_str(&self.format_entry(&entry.title, &entry.school, &entry.period, &entry.details));
            }
        }

        if !resume.skills.is_empty() {
            output.push_str(&self.format_header("Skills", 2));
            for skill in &resume.skills {
                match skill {
                    SkillRecord::Flat(label) => output.push_str(&format!("  • {}\n", label)),
                    SkillRecord::Group { category, items } => output.push_str(&format!(
                        "  • {} {}\n",
                        self.colorize(&format!("{}:", category), Color::Cyan),
                        items.join(", ")
                    )),
                }
            }
        }

        if !resume.languages.is_empty() {
            output.push_str(&self.format_header("Languages", 2));
            for language in &resume.languages {
                output.push_str(&format!(
                    "  {:<12} {} {}\n",
                    language.name,
                    self.format_bar(language.proficiency.intensity()),
                    language.level
                ));
            }
        }

        for extra in &resume.extra_sections {
            output.push_str(&self.format_header(&extra.heading, 3));
            output.push_str(&format!("{}\n", extra.content));
        }

        let missing = resume.missing_sections();
        if !missing.is_empty() {
            let names: Vec<String> = missing.iter().map(ToString::to_string).collect();
            output.push_str(&format!(
                "\n{} {}\n",
                self.colorize("Missing sections:", Color::Red),
                names.join(", ")
            ));
        }

        Ok(output)
    }

    fn format_sections(&self, doc: &SectionedDocument) -> Result<String> {
        let mut output = self.format_header(doc.title(), 1);

        for (name, text) in ordered_sections(doc) {
            output.push_str(&self.format_header(&name, 2));
            if text.trim().is_empty() {
                output.push_str(&format!("{}\n", self.colorize("(empty)", Color::BrightBlack)));
            } else {
                output.push_str(&format!("{}\n", text.trim_end()));
            }
        }

        if !doc.preamble().trim().is_empty() {
            output.push_str(&self.format_header("Unsectioned text", 3));
            output.push_str(&format!("{}\n", doc.preamble().trim_end()));
        }

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Console
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }

    fn render(&self, value: &impl serde::Serialize) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(value)?)
        } else {
            Ok(serde_json::to_string(value)?)
        }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_resume(&self, resume: &Resume) -> Result<String> {
        self.render(resume)
    }

    fn format_sections(&self, doc: &SectionedDocument) -> Result<String> {
        let sections: Map<String, Value> = ordered_sections(doc)
            .into_iter()
            .map(|(name, text)| (name, Value::String(text.to_string())))
            .collect();

        self.render(&json!({
            "title": doc.title(),
            "sections": sections,
            "preamble": doc.preamble(),
            "contact": doc.contact(),
        }))
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Json
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_resume(&self, resume: &Resume) -> Result<String> {
        Ok(render_markdown(resume))
    }

    fn format_sections(&self, doc: &SectionedDocument) -> Result<String> {
        let mut output = format!("# {}\n", doc.title());
        for (name, text) in ordered_sections(doc) {
            output.push_str(&format!("\n## {}\n\n{}\n", name, text.trim()));
        }
        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Markdown
    }
}

pub fn save_output_to_file(content: &str, file_path: &Path) -> Result<()> {
    use std::fs;
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(file_path, content)?;
    Ok(())
}

/// `<stem>_structured.<ext>`, optionally timestamped.
pub fn suggest_filename(format: OutputFormat, input_name: &str, timestamp: bool) -> String {
    let stem = Path::new(input_name)
        .file_stem()
        .unwrap_or_default()
        .to_string_lossy();

    let suffix = if timestamp {
        format!("_{}", chrono::Local::now().format("%Y%m%d_%H%M%S"))
    } else {
        String::new()
    };

    let extension = match format {
        OutputFormat::Console => "txt",
        OutputFormat::Json => "json",
        OutputFormat::Markdown => "md",
    };
    format!("{}_structured{}.{}", stem, suffix, extension)
}

/// Where `--save` writes: a directory gets a name derived from the input file.
pub fn resolve_save_path(save: &Path, format: OutputFormat, input: &Path) -> PathBuf {
    if save.is_dir() {
        save.join(suggest_filename(format, &input.to_string_lossy(), false))
    } else {
        save.to_path_buf()
    }
}
