//! Error handling for the skill gap analyzer

use crate::processing::document::DocumentKind;
use std::fmt;
use thiserror::Error;

/// Which side of an analysis an input belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputRole {
    Resume,
    JobDescription,
}

impl fmt::Display for InputRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputRole::Resume => write!(f, "resume"),
            InputRole::JobDescription => write!(f, "job description"),
        }
    }
}

#[derive(Error, Debug)]
pub enum SkillGapError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse {kind} document: {reason}")]
    DocumentParse { kind: DocumentKind, reason: String },

    #[error("{kind} document too large: {actual} {unit} exceeds limit of {limit} {unit}")]
    DocumentTooLarge {
        kind: DocumentKind,
        actual: usize,
        limit: usize,
        unit: &'static str,
    },

    #[error("Insufficient input: {0} text is empty")]
    InsufficientInput(InputRole),

    #[error("File format not supported: {0}")]
    UnsupportedFormat(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Skill vocabulary error: {0}")]
    Vocabulary(String),

    #[error("Feedback generation error: {0}")]
    Feedback(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Output formatting error: {0}")]
    OutputFormatting(String),
}

impl SkillGapError {
    pub(crate) fn parse(kind: DocumentKind, reason: impl fmt::Display) -> Self {
        SkillGapError::DocumentParse {
            kind,
            reason: reason.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, SkillGapError>;

/// Convert HTTP client errors to feedback errors
impl From<reqwest::Error> for SkillGapError {
    fn from(err: reqwest::Error) -> Self {
        SkillGapError::Feedback(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_names_kind() {
        let err = SkillGapError::parse(DocumentKind::Docx, "missing word/document.xml");
        assert_eq!(
            err.to_string(),
            "Failed to parse DOCX document: missing word/document.xml"
        );
    }

    #[test]
    fn test_insufficient_input_names_role() {
        let err = SkillGapError::InsufficientInput(InputRole::JobDescription);
        assert_eq!(err.to_string(), "Insufficient input: job description text is empty");
    }
}
