//! Alignment report builder: composes normalization, scoring and skill
//! matching into one immutable result per analysis.

use crate::error::{InputRole, Result, SkillGapError};
use crate::processing::normalizer::{normalize, NormalizedText, StopWords};
use crate::processing::similarity::SimilarityScorer;
use crate::processing::skills::{self, SkillSet, SkillVocabulary};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::hash::{Hash, Hasher};
use twox_hash::XxHash64;

/// Number of missing keywords kept for display by default
pub const DEFAULT_MISSING_KEYWORD_LIMIT: usize = 15;

/// Outcome of comparing one resume against one job description
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlignmentResult {
    pub score: f64,
    pub matching_skills: SkillSet,
    pub missing_skills: SkillSet,
    pub matching_keyword_count: usize,
    pub missing_keywords: Vec<String>,
}

impl AlignmentResult {
    pub fn band(&self) -> MatchBand {
        MatchBand::from_score(self.score)
    }
}

/// Coarse reading of a score that callers may rely on:
/// above 70 is strong, above 40 is moderate, anything else is weak.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchBand {
    Strong,
    Moderate,
    Weak,
}

impl MatchBand {
    pub fn from_score(score: f64) -> Self {
        if score > 70.0 {
            MatchBand::Strong
        } else if score > 40.0 {
            MatchBand::Moderate
        } else {
            MatchBand::Weak
        }
    }
}

impl fmt::Display for MatchBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchBand::Strong => write!(f, "strong"),
            MatchBand::Moderate => write!(f, "moderate"),
            MatchBand::Weak => write!(f, "weak"),
        }
    }
}

/// Tunables for a report build
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalysisOptions {
    pub stop_words: StopWords,
    pub missing_keyword_limit: usize,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            stop_words: StopWords::None,
            missing_keyword_limit: DEFAULT_MISSING_KEYWORD_LIMIT,
        }
    }
}

/// Build a report with default options
pub fn build_report(
    resume: &str,
    job: &str,
    vocabulary: &SkillVocabulary,
) -> Result<AlignmentResult> {
    build_report_with(resume, job, vocabulary, &AnalysisOptions::default())
}

/// Build a report.
///
/// Fails with `InsufficientInput` when either text is empty after trimming.
/// Skill matching runs on the raw texts; scoring and the keyword gap run on
/// the normalized texts.
pub fn build_report_with(
    resume: &str,
    job: &str,
    vocabulary: &SkillVocabulary,
    options: &AnalysisOptions,
) -> Result<AlignmentResult> {
    if resume.trim().is_empty() {
        return Err(SkillGapError::InsufficientInput(InputRole::Resume));
    }
    if job.trim().is_empty() {
        return Err(SkillGapError::InsufficientInput(InputRole::JobDescription));
    }

    let resume_norm = normalize(resume);
    let job_norm = normalize(job);
    let score = SimilarityScorer::new(options.stop_words).score(&resume_norm, &job_norm);

    let resume_skills = vocabulary.extract_skills(resume);
    let job_skills = vocabulary.extract_skills(job);
    let matching_skills = skills::matching(&resume_skills, &job_skills);
    let missing_skills = skills::missing(&resume_skills, &job_skills);

    let gap = KeywordGap::between(&resume_norm, &job_norm, options.stop_words);
    let missing_keywords = gap.missing.into_iter().take(options.missing_keyword_limit).collect();

    debug!(
        "score={:.2} matching_skills={} missing_skills={} shared_keywords={}",
        score,
        matching_skills.len(),
        missing_skills.len(),
        gap.shared
    );

    Ok(AlignmentResult {
        score,
        matching_skills,
        missing_skills,
        matching_keyword_count: gap.shared,
        missing_keywords,
    })
}

/// Plain-token comparison independent of the skill vocabulary
struct KeywordGap {
    shared: usize,
    // Lexically ordered so the capped prefix is reproducible
    missing: BTreeSet<String>,
}

impl KeywordGap {
    fn between(resume: &NormalizedText, job: &NormalizedText, stop_words: StopWords) -> Self {
        let resume_tokens: BTreeSet<&str> = stop_words.filter(resume).collect();
        let job_tokens: BTreeSet<&str> = stop_words.filter(job).collect();

        Self {
            shared: job_tokens.intersection(&resume_tokens).count(),
            missing: job_tokens
                .difference(&resume_tokens)
                .map(|t| t.to_string())
                .collect(),
        }
    }
}

/// Reusable analysis entry point bound to one vocabulary.
///
/// With caching enabled, results are memoised by a fingerprint of both raw
/// texts; a cached result is identical to a fresh one.
pub struct AlignmentEngine<'v> {
    vocabulary: &'v SkillVocabulary,
    options: AnalysisOptions,
    cache: HashMap<u64, AlignmentResult>,
    enable_cache: bool,
}

impl<'v> AlignmentEngine<'v> {
    pub fn new(vocabulary: &'v SkillVocabulary) -> Self {
        Self {
            vocabulary,
            options: AnalysisOptions::default(),
            cache: HashMap::new(),
            enable_cache: false,
        }
    }

    pub fn with_options(mut self, options: AnalysisOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_cache(mut self, enable: bool) -> Self {
        self.enable_cache = enable;
        self
    }

    pub fn analyze(&mut self, resume: &str, job: &str) -> Result<AlignmentResult> {
        if !self.enable_cache {
            return build_report_with(resume, job, self.vocabulary, &self.options);
        }

        let key = fingerprint(resume, job);
        if let Some(cached) = self.cache.get(&key) {
            info!("Using cached alignment result");
            return Ok(cached.clone());
        }

        let result = build_report_with(resume, job, self.vocabulary, &self.options)?;
        self.cache.insert(key, result.clone());
        Ok(result)
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }
}

fn fingerprint(resume: &str, job: &str) -> u64 {
    let mut hasher = XxHash64::with_seed(0);
    resume.hash(&mut hasher);
    job.hash(&mut hasher);
    hasher.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vocab() -> SkillVocabulary {
        SkillVocabulary::new(["python", "sql", "docker"]).unwrap()
    }

    #[test]
    fn test_report_skill_gap() {
        let result = build_report(
            "Experienced Python developer using Docker daily",
            "Looking for SQL and Docker expert",
            &vocab(),
        )
        .unwrap();

        assert_eq!(result.matching_skills.to_vec(), vec!["docker"]);
        assert_eq!(result.missing_skills.to_vec(), vec!["sql"]);
        assert!(result.score > 0.0 && result.score < 100.0);
    }

    #[test]
    fn test_empty_resume_is_insufficient() {
        let err = build_report("", "some JD text", &vocab()).unwrap_err();
        assert!(matches!(err, SkillGapError::InsufficientInput(InputRole::Resume)));
    }

    #[test]
    fn test_whitespace_job_is_insufficient() {
        let err = build_report("resume text", " \n\t ", &vocab()).unwrap_err();
        assert!(matches!(
            err,
            SkillGapError::InsufficientInput(InputRole::JobDescription)
        ));
    }

    #[test]
    fn test_punctuation_only_input_scores_zero() {
        let result = build_report("!!!", "Docker engineer", &vocab()).unwrap();
        assert_eq!(result.score, 0.0);
        assert_eq!(result.matching_keyword_count, 0);
    }

    #[test]
    fn test_keyword_gap_sorted_and_capped() {
        let job = "zeta yankee xray whiskey victor uniform tango sierra romeo quebec papa oscar november mike lima kilo juliet";
        let options = AnalysisOptions {
            stop_words: StopWords::None,
            missing_keyword_limit: 5,
        };
        let result = build_report_with("alpha", job, &vocab(), &options).unwrap();

        assert_eq!(
            result.missing_keywords,
            vec!["juliet", "kilo", "lima", "mike", "november"]
        );
    }

    #[test]
    fn test_keyword_counts() {
        let result = build_report(
            "Rust engineer, Rust services",
            "Rust engineer for payments services team",
            &vocab(),
        )
        .unwrap();

        assert_eq!(result.matching_keyword_count, 3);
        assert_eq!(result.missing_keywords, vec!["for", "payments", "team"]);
    }

    #[test]
    fn test_keyword_gap_respects_stop_words() {
        let options = AnalysisOptions {
            stop_words: StopWords::English,
            ..AnalysisOptions::default()
        };
        let result = build_report_with("rust", "rust for the team", &vocab(), &options).unwrap();
        assert_eq!(result.missing_keywords, vec!["team"]);
    }

    #[test]
    fn test_default_cap_is_fifteen() {
        let job: Vec<String> = (0..40).map(|i| format!("term{:02}", i)).collect();
        let result = build_report("unrelated", &job.join(" "), &vocab()).unwrap();
        assert_eq!(result.missing_keywords.len(), DEFAULT_MISSING_KEYWORD_LIMIT);
        assert_eq!(result.missing_keywords[0], "term00");
    }

    #[test]
    fn test_band_thresholds() {
        assert_eq!(MatchBand::from_score(100.0), MatchBand::Strong);
        assert_eq!(MatchBand::from_score(70.01), MatchBand::Strong);
        assert_eq!(MatchBand::from_score(70.0), MatchBand::Moderate);
        assert_eq!(MatchBand::from_score(40.01), MatchBand::Moderate);
        assert_eq!(MatchBand::from_score(40.0), MatchBand::Weak);
        assert_eq!(MatchBand::from_score(0.0), MatchBand::Weak);
    }

    #[test]
    fn test_engine_cache_returns_identical_result() {
        let v = vocab();
        let mut engine = AlignmentEngine::new(&v).with_cache(true);

        let first = engine.analyze("python sql", "sql docker").unwrap();
        assert_eq!(engine.cache_size(), 1);

        let second = engine.analyze("python sql", "sql docker").unwrap();
        assert_eq!(first, second);
        assert_eq!(engine.cache_size(), 1);

        engine.analyze("sql docker", "python sql").unwrap();
        assert_eq!(engine.cache_size(), 2);

        engine.clear_cache();
        assert_eq!(engine.cache_size(), 0);
    }

    #[test]
    fn test_engine_without_cache_stores_nothing() {
        let v = vocab();
        let mut engine = AlignmentEngine::new(&v);
        engine.analyze("python", "python").unwrap();
        assert_eq!(engine.cache_size(), 0);
    }

    #[test]
    fn test_engine_does_not_cache_errors() {
        let v = vocab();
        let mut engine = AlignmentEngine::new(&v).with_cache(true);
        assert!(engine.analyze("", "job").is_err());
        assert_eq!(engine.cache_size(), 0);
    }

    #[test]
    fn test_result_serializes_camel_case() {
        let result = build_report("python", "python sql", &vocab()).unwrap();
        let json = serde_json::to_value(&result).unwrap();

        assert!(json.get("matchingSkills").is_some());
        assert!(json.get("missingSkills").is_some());
        assert!(json.get("matchingKeywordCount").is_some());
        assert_eq!(json["missingSkills"], serde_json::json!(["sql"]));
    }
}
