//! skillgap: resume and job description alignment from the command line

use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info, warn};
use skillgap::cli::{Cli, Commands, ConfigAction, InputSource, SkillsAction};
use skillgap::config::{Config, OutputFormat};
use skillgap::input::InputManager;
use skillgap::llm::{ChatCompletionsGenerator, FeedbackGenerator, FeedbackRequest};
use skillgap::output::{save_report_to_file, AnalysisReport, ReportGenerator, SourceInfo};
use skillgap::processing::analyzer::AlignmentEngine;
use skillgap::processing::skills::install_global;
use skillgap::{AlignmentResult, Document, Result, SkillGapError};
use std::path::{Path, PathBuf};
use std::process;
use std::time::Duration;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run_command(cli.command, config, cli.config).await {
        error!("Command failed: {}", e);
        process::exit(1);
    }
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
}

async fn run_command(
    command: Commands,
    config: Config,
    config_path: Option<PathBuf>,
) -> Result<()> {
    match command {
        Commands::Align {
            resume,
            resume_text,
            job,
            job_text,
            format,
            detailed,
            save,
            feedback,
        } => {
            let resume_source = InputSource::from_args(resume, resume_text).ok_or_else(|| {
                SkillGapError::InvalidInput("Provide --resume or --resume-text".to_string())
            })?;
            let job_source = InputSource::from_args(job, job_text).ok_or_else(|| {
                SkillGapError::InvalidInput("Provide --job or --job-text".to_string())
            })?;

            let output_format = match format {
                Some(format) => format.parse::<OutputFormat>()?,
                None => config.output.format,
            };
            let detailed = detailed || config.output.detailed;

            let vocabulary = install_global(config.skill_vocabulary()?)?;
            info!("Loaded skill vocabulary with {} phrases", vocabulary.len());

            let mut input_manager = InputManager::new().with_limits(config.limits);
            let resume_text = read_source(&mut input_manager, &resume_source).await?;
            let job_text = read_source(&mut input_manager, &job_source).await?;

            let mut engine =
                AlignmentEngine::new(vocabulary).with_options(config.analysis_options());
            let result = engine.analyze(&resume_text, &job_text)?;
            info!("Alignment score: {:.2} ({})", result.score, result.band());

            let advice = if feedback || config.feedback.enabled {
                request_feedback(&config, &resume_text, &job_text, &result).await
            } else {
                None
            };

            let report = AnalysisReport::new(
                result,
                SourceInfo::new(resume_source.describe(), &resume_text),
                SourceInfo::new(job_source.describe(), &job_text),
                vocabulary.len(),
            )
            .with_feedback(advice);

            let use_colors = config.output.color_output && save.is_none();
            let generator = ReportGenerator::with_options(use_colors, detailed);
            let rendered = generator.generate_report(&report, output_format)?;

            match save {
                Some(path) => {
                    save_report_to_file(&rendered, &path)?;
                    println!("Report saved to {}", path.display());
                }
                None => println!("{}", rendered),
            }
        }

        Commands::Skills { action } => match action {
            SkillsAction::List => {
                let vocabulary = config.skill_vocabulary()?;
                println!("Skill vocabulary ({} phrases)\n", vocabulary.len());
                for (i, phrase) in vocabulary.phrases().iter().enumerate() {
                    println!("  {:>3}. {}", i + 1, phrase);
                }
            }
        },

        Commands::Config { action } => {
            let path = config_path.unwrap_or_else(Config::config_path);
            match action {
                Some(ConfigAction::Show) | None => {
                    println!("Configuration: {}\n", path.display());
                    println!(
                        "Skill vocabulary: {} phrases ({} extra)",
                        config.skills.vocabulary.len(),
                        config.skills.extra.len()
                    );
                    println!("Stop words: {:?}", config.scoring.stop_words);
                    println!("Missing keyword limit: {}", config.scoring.missing_keyword_limit);
                    println!("\nLimits:");
                    println!("  Max document size: {} bytes", config.limits.max_document_bytes);
                    println!("  Max PDF pages: {}", config.limits.max_pdf_pages);
                    println!("  Max DOCX body size: {} bytes", config.limits.max_docx_xml_bytes);
                    println!("\nFeedback:");
                    println!("  Enabled by default: {}", config.feedback.enabled);
                    println!("  Endpoint: {}", config.feedback.endpoint);
                    println!("  Model: {}", config.feedback.model);
                    println!("  API key variable: {}", config.feedback.api_key_env);
                    println!("\nOutput format: {:?}", config.output.format);
                }

                Some(ConfigAction::Path) => println!("{}", path.display()),

                Some(ConfigAction::Reset) => {
                    Config::default().save_to(&path)?;
                    println!("Configuration reset: {}", path.display());
                }
            }
        }
    }

    Ok(())
}

async fn read_source(manager: &mut InputManager, source: &InputSource) -> Result<String> {
    match source {
        InputSource::File(path) => manager.extract_text(path).await,
        InputSource::Text(text) => manager.extract_document(&Document::from_text(text.as_str())),
    }
}

/// Feedback is advisory: any failure is logged and the report goes out
/// without it.
async fn request_feedback(
    config: &Config,
    resume_text: &str,
    job_text: &str,
    result: &AlignmentResult,
) -> Option<String> {
    let api_key = match std::env::var(&config.feedback.api_key_env) {
        Ok(key) => key,
        Err(_) => {
            warn!(
                "Skipping feedback: environment variable {} is not set",
                config.feedback.api_key_env
            );
            return None;
        }
    };

    let generator = match ChatCompletionsGenerator::new(&config.feedback, api_key) {
        Ok(generator) => generator,
        Err(e) => {
            warn!("Skipping feedback: {}", e);
            return None;
        }
    };

    let request = FeedbackRequest::new(resume_text, job_text, result);

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(format!("Generating feedback with {}...", generator.model()));
    spinner.enable_steady_tick(Duration::from_millis(120));

    let outcome = generator.generate(&request).await;
    spinner.finish_and_clear();

    match outcome {
        Ok(text) => Some(text),
        Err(e) => {
            warn!("Feedback generation failed: {}", e);
            None
        }
    }
}
