//! CLI interface for the skill gap analyzer

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "skillgap")]
#[command(about = "Score how well a resume aligns with a job description")]
#[command(long_about = "Compare a resume against a job description: cosine match score, skill gap against a curated vocabulary, missing keywords, and optional LLM feedback")]
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
    /// Align resume with job description
    Align {
        /// Path to resume file (PDF, DOCX, TXT, MD)
        #[arg(short, long, required_unless_present = "resume_text", conflicts_with = "resume_text")]
        resume: Option<PathBuf>,

        /// Resume text pasted directly
        #[arg(long)]
        resume_text: Option<String>,

        /// Path to job description file (PDF, DOCX, TXT, MD)
        #[arg(short, long, required_unless_present = "job_text", conflicts_with = "job_text")]
        job: Option<PathBuf>,

        /// Job description text pasted directly
        #[arg(long)]
        job_text: Option<String>,

        /// Output format: console, json, markdown
        #[arg(short, long)]
        format: Option<String>,

        /// Include input previews and report metadata
        #[arg(short, long)]
        detailed: bool,

        /// Save output to file
        #[arg(short, long)]
        save: Option<PathBuf>,

        /// Ask the configured LLM endpoint for written feedback
        #[arg(long)]
        feedback: bool,
    },

    /// Skill vocabulary commands
    Skills {
        #[command(subcommand)]
        action: SkillsAction,
    },

    /// Show configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum SkillsAction {
    /// List the configured skill vocabulary
    List,
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Print the configuration file location
    Path,

    /// Reset configuration to defaults
    Reset,
}

/// Where one side of the comparison comes from
#[derive(Debug, Clone, PartialEq)]
pub enum InputSource {
    File(PathBuf),
    Text(String),
}

impl InputSource {
    /// Resolve the file/text pair produced by clap; clap guarantees exactly one
    pub fn from_args(path: Option<PathBuf>, text: Option<String>) -> Option<Self> {
        match (path, text) {
            (Some(path), _) => Some(InputSource::File(path)),
            (None, Some(text)) => Some(InputSource::Text(text)),
            (None, None) => None,
        }
    }

    pub fn describe(&self) -> String {
        match self {
            InputSource::File(path) => path.display().to_string(),
            InputSource::Text(_) => "pasted text".to_string(),
        }
    }
}
