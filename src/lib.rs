//! Skill gap library: resume / job description alignment scoring

pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod llm;
pub mod output;
pub mod processing;

pub use config::Config;
pub use error::{InputRole, Result, SkillGapError};
pub use processing::analyzer::{build_report, AlignmentEngine, AlignmentResult, MatchBand};
pub use processing::document::{Document, DocumentKind};
pub use processing::normalizer::{normalize, NormalizedText};
pub use processing::similarity::score;
pub use processing::skills::{extract_skills, SkillSet, SkillVocabulary};
