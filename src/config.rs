//! Configuration management for the skill gap analyzer

use crate::error::{Result, SkillGapError};
use crate::input::text_extractor::ExtractionLimits;
use crate::processing::analyzer::{AnalysisOptions, DEFAULT_MISSING_KEYWORD_LIMIT};
use crate::processing::normalizer::StopWords;
use crate::processing::skills::{default_skill_phrases, SkillVocabulary};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub skills: SkillsConfig,
    pub scoring: ScoringConfig,
    pub limits: ExtractionLimits,
    pub feedback: FeedbackConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillsConfig {
    pub vocabulary: Vec<String>,
    #[serde(default)]
    pub extra: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub stop_words: StopWords,
    pub missing_keyword_limit: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackConfig {
    pub enabled: bool,
    pub endpoint: String,
    pub model: String,
    /// Name of the environment variable holding the API key
    pub api_key_env: String,
    pub timeout_secs: u64,
    pub max_tokens: u32,
    pub temperature: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub detailed: bool,
    pub color_output: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Console,
    Json,
    Markdown,
}

impl std::str::FromStr for OutputFormat {
    type Err = SkillGapError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "console" => Ok(OutputFormat::Console),
            "json" => Ok(OutputFormat::Json),
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            _ => Err(SkillGapError::InvalidInput(format!(
                "Invalid output format: {}. Supported: console, json, markdown",
                s
            ))),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            skills: SkillsConfig {
                vocabulary: default_skill_phrases(),
                extra: Vec::new(),
            },
            scoring: ScoringConfig {
                stop_words: StopWords::None,
                missing_keyword_limit: DEFAULT_MISSING_KEYWORD_LIMIT,
            },
            limits: ExtractionLimits::default(),
            feedback: FeedbackConfig {
                enabled: false,
                endpoint: "https://api.openai.com/v1/chat/completions".to_string(),
                model: "gpt-4o-mini".to_string(),
                api_key_env: "OPENAI_API_KEY".to_string(),
                timeout_secs: 60,
                max_tokens: 700,
                temperature: 0.4,
            },
            output: OutputConfig {
                format: OutputFormat::Console,
                detailed: false,
                color_output: true,
            },
        }
    }
}

impl Config {
    /// Load from the default location, writing defaults on first run
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            let config = Self::default();
            config.save()?;
            Ok(config)
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| SkillGapError::Configuration(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| {
                SkillGapError::Configuration(format!("Failed to serialize config: {}", e))
            })?;

        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("skillgap")
            .join("config.toml")
    }

    pub fn validate(&self) -> Result<()> {
        if self.scoring.missing_keyword_limit == 0 {
            return Err(SkillGapError::Configuration(
                "scoring.missing_keyword_limit must be at least 1".to_string(),
            ));
        }
        if self.limits.max_document_bytes == 0
            || self.limits.max_pdf_pages == 0
            || self.limits.max_docx_xml_bytes == 0
        {
            return Err(SkillGapError::Configuration(
                "limits must all be greater than zero".to_string(),
            ));
        }
        if !(0.0..=2.0).contains(&self.feedback.temperature) {
            return Err(SkillGapError::Configuration(format!(
                "feedback.temperature must be within 0.0..=2.0, got {}",
                self.feedback.temperature
            )));
        }
        Ok(())
    }

    /// Build the immutable skill vocabulary from `[skills]`
    pub fn skill_vocabulary(&self) -> Result<SkillVocabulary> {
        SkillVocabulary::new(self.skills.vocabulary.iter().chain(self.skills.extra.iter()))
    }

    pub fn analysis_options(&self) -> AnalysisOptions {
        AnalysisOptions {
            stop_words: self.scoring.stop_words,
            missing_keyword_limit: self.scoring.missing_keyword_limit,
        }
    }
}
