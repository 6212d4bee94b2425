//! Report structures wrapping an alignment result for presentation

use crate::processing::analyzer::{AlignmentResult, MatchBand};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use unicode_segmentation::UnicodeSegmentation;

const PREVIEW_GRAPHEMES: usize = 300;

/// Everything a formatter needs to render one analysis
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// The alignment result itself
    pub result: AlignmentResult,

    /// Score band (strong / moderate / weak)
    pub band: MatchBand,

    /// Free-form advice, when a feedback generator was used
    pub feedback: Option<String>,

    pub metadata: ReportMetadata,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub generated_at: DateTime<Utc>,
    pub version: String,
    pub resume: SourceInfo,
    pub job: SourceInfo,
    pub vocabulary_size: usize,
}

/// Where an input came from and a short excerpt of it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceInfo {
    /// File path, or "pasted text"
    pub origin: String,
    pub characters: usize,
    pub preview: String,
}

impl SourceInfo {
    pub fn new(origin: impl Into<String>, text: &str) -> Self {
        Self {
            origin: origin.into(),
            characters: text.chars().count(),
            preview: preview(text, PREVIEW_GRAPHEMES),
        }
    }
}

impl AnalysisReport {
    pub fn new(
        result: AlignmentResult,
        resume: SourceInfo,
        job: SourceInfo,
        vocabulary_size: usize,
    ) -> Self {
        Self {
            band: result.band(),
            result,
            feedback: None,
            metadata: ReportMetadata {
                generated_at: Utc::now(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                resume,
                job,
                vocabulary_size,
            },
        }
    }

    pub fn with_feedback(mut self, feedback: Option<String>) -> Self {
        self.feedback = feedback;
        self
    }

    /// One-line reading of the band
    pub fn verdict(&self) -> &'static str {
        match self.band {
            MatchBand::Strong => "Strong match: the resume covers most of what the posting asks for",
            MatchBand::Moderate => "Moderate match: tailor the resume toward the missing skills",
            MatchBand::Weak => "Weak match: significant gaps against this posting",
        }
    }
}

/// Cut `text` to at most `max_graphemes`, backing off to the last space,
/// with whitespace runs flattened to single spaces.
pub fn preview(text: &str, max_graphemes: usize) -> String {
    let flat = text.split_whitespace().collect::<Vec<_>>().join(" ");
    let graphemes: Vec<&str> = flat.graphemes(true).collect();
    if graphemes.len() <= max_graphemes {
        return flat;
    }

    let cut = graphemes[..max_graphemes].concat();
    let cut = match cut.rfind(' ') {
        Some(idx) if idx > 0 => cut[..idx].to_string(),
        _ => cut,
    };
    format!("{}...", cut)
}
