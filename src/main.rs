//! CV structurer: turn free-form resume text into a structured resume

use anyhow::{Context, Result};
use clap::Parser;
use cv_structurer::cli::{self, Cli, Commands, ConfigAction};
use cv_structurer::config::{Config, OutputFormat};
use cv_structurer::input::InputManager;
use cv_structurer::output::{formatter_for, resolve_save_path, save_output_to_file};
use cv_structurer::processing::{ResumeParser, Synthesizer};
use log::{error, info};
use std::path::{Path, PathBuf};
use std::process;

const INPUT_EXTENSIONS: [&str; 4] = ["txt", "text", "md", "markdown"];

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {:#}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run_command(cli.command, config, cli.config).await {
        error!("Command failed: {:#}", e);
        process::exit(1);
    }
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load_from(path).with_context(|| format!("reading {}", path.display())),
        None => Ok(Config::load()?),
    }
}

async fn run_command(command: Commands, mut config: Config, config_path: Option<PathBuf>) -> Result<()> {
    let mut input_manager = InputManager::new();

    match command {
        Commands::Parse { input, output, save } => {
            let format = resolve_format(output.as_deref(), &config)?;
            let text = read_input(&mut input_manager, &input).await?;

            info!("Parsing {}", input.display());
            let resume = ResumeParser::new(config.parsing.clone()).parse(&text);
            for section in resume.missing_sections() {
                info!("No content found for {}", section);
            }

            config.output.format = format;
            let rendered = formatter_for(&config.output).format_resume(&resume)?;
            emit(&rendered, save.as_deref(), format, &input)?;
        }

        Commands::Sections { input, output } => {
            let format = resolve_format(output.as_deref(), &config)?;
            let text = read_input(&mut input_manager, &input).await?;

            let doc = ResumeParser::new(config.parsing.clone()).segment(&text);
            config.output.format = format;
            println!("{}", formatter_for(&config.output).format_sections(&doc)?);
        }

        Commands::Synthesize {
            resume,
            job,
            year,
            output,
            save,
        } => {
            let format = resolve_format(output.as_deref(), &config)?;
            let original = match &resume {
                Some(path) => read_input(&mut input_manager, path).await?,
                None => String::new(),
            };
            let job_text = read_input(&mut input_manager, &job).await?;

            if year.is_some() {
                config.synthesis.current_year = year;
            }

            info!("Synthesizing resume for {}", job.display());
            let synthesizer = Synthesizer::new(config.parsing.clone(), config.synthesis.clone());
            let structured = synthesizer.synthesize(&original, &job_text);

            config.output.format = format;
            let rendered = formatter_for(&config.output).format_resume(&structured)?;
            emit(&rendered, save.as_deref(), format, resume.as_deref().unwrap_or(job.as_path()))?;
        }

        Commands::Config { action } => {
            let path = config_path.unwrap_or_else(Config::config_path);
            match action {
                Some(ConfigAction::Show) | None => {
                    let content = toml::to_string_pretty(&config).context("serializing configuration")?;
                    println!("# {}\n{}", path.display(), content);
                }

                Some(ConfigAction::Reset) => {
                    Config::default()
                        .save_to(&path)
                        .with_context(|| format!("writing {}", path.display()))?;
                    println!("Configuration reset: {}", path.display());
                }

                Some(ConfigAction::Path) => {
                    println!("{}", path.display());
                }
            }
        }
    }

    Ok(())
}

fn resolve_format(requested: Option<&str>, config: &Config) -> Result<OutputFormat> {
    match requested {
        Some(format) => cli::parse_output_format(format).map_err(anyhow::Error::msg),
        None => Ok(config.output.format),
    }
}

async fn read_input(manager: &mut InputManager, path: &Path) -> Result<String> {
    cli::validate_file_extension(path, &INPUT_EXTENSIONS)
        .map_err(|e| anyhow::anyhow!("{}: {}", path.display(), e))?;

    manager
        .extract_text(path)
        .await
        .with_context(|| format!("reading {}", path.display()))
}

fn emit(rendered: &str, save: Option<&Path>, format: OutputFormat, input: &Path) -> Result<()> {
    match save {
        Some(target) => {
            let path = resolve_save_path(target, format, input);
            save_output_to_file(rendered, &path).with_context(|| format!("writing {}", path.display()))?;
            info!("Saved output to {}", path.display());
        }
        None => println!("{}", rendered),
    }
    Ok(())
}
