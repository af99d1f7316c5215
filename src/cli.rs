//! CLI interface for the CV structurer

use crate::config::OutputFormat;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "cv-structurer")]
#[command(about = "Turn free-form resume text into a structured resume")]
#[command(long_about = "Segment resume text into canonical sections, extract experience, education, skills, \
languages and contact details, and synthesize a complete resume against a job description without any network access")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Parse a resume into its structured form
    Parse {
        /// Path to resume file (TXT, MD)
        input: PathBuf,

        /// Output format: console, json, markdown
        #[arg(short, long)]
        output: Option<String>,

        /// Save output to file, or into a directory as <input>_structured.<ext>
        #[arg(short, long)]
        save: Option<PathBuf>,
    },

    /// Show the raw text of each detected section
    Sections {
        /// Path to resume file (TXT, MD)
        input: PathBuf,

        /// Output format: console, json, markdown
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Build a complete resume for a job description, filling missing sections
    Synthesize {
        /// Path to the original resume (TXT, MD); omit to start from nothing
        #[arg(short, long)]
        resume: Option<PathBuf>,

        /// Path to job description file (TXT, MD)
        #[arg(short, long)]
        job: PathBuf,

        /// Anchor year for generated periods
        #[arg(long, value_parser = clap::value_parser!(i32).range(1900..=2100))]
        year: Option<i32>,

        /// Output format: console, json, markdown
        #[arg(short, long)]
        output: Option<String>,

        /// Save output to file, or into a directory as <input>_structured.<ext>
        #[arg(short, long)]
        save: Option<PathBuf>,
    },

    /// Show configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Reset configuration to defaults
    Reset,

    /// Print the configuration file location
    Path,
}

/// Parse and validate output format
pub fn parse_output_format(format: &str) -> Result<OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "console" => Ok(OutputFormat::Console),
        "json" => Ok(OutputFormat::Json),
        "markdown" | "md" => Ok(OutputFormat::Markdown),
        _ => Err(format!("Invalid output format: {}. Supported: console, json, markdown", format)),
    }
}

/// Validate file extension
pub fn validate_file_extension(path: &Path, allowed_extensions: &[&str]) -> Result<(), String> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => {
            if allowed_extensions.contains(&ext.to_lowercase().as_str()) {
                Ok(())
            } else {
                Err(format!(
                    "Unsupported file extension: .{}. Allowed: {}",
                    ext,
                    allowed_extensions.join(", ")
                ))
            }
        }
        None => Err("File has no extension".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_synthesize_arguments() {
        let cli = Cli::try_parse_from(["cv-structurer", "synthesize", "--job", "job.md", "--year", "2025", "-v"]).unwrap();
        assert!(cli.verbose);
        match cli.command {
            Commands::Synthesize { resume, job, year, .. } => {
                assert!(resume.is_none());
                assert_eq!(job, PathBuf::from("job.md"));
                assert_eq!(year, Some(2025));
            }
            _ => panic!("expected synthesize"),
        }
    }

    #[test]
    fn test_year_outside_calendar_range_is_rejected() {
        for year in ["0", "-2147483648", "2101"] {
            let result = Cli::try_parse_from(["cv-structurer", "synthesize", "--job", "job.md", "--year", year]);
            assert!(result.is_err(), "accepted --year {}", year);
        }
    }

    #[test]
    fn test_output_format_and_extension() {
        assert_eq!(parse_output_format("MD"), Ok(OutputFormat::Markdown));
        assert!(parse_output_format("pdf").is_err());
        assert!(validate_file_extension(Path::new("cv.md"), &["txt", "md"]).is_ok());
        assert!(validate_file_extension(Path::new("cv.pdf"), &["txt", "md"]).is_err());
        assert!(validate_file_extension(Path::new("cv"), &["txt", "md"]).is_err());
    }
}
