//! Integration tests for the skill gap analyzer

use skillgap::config::Config;
use skillgap::input::manager::InputManager;
use skillgap::llm::{FeedbackGenerator, FeedbackRequest};
use skillgap::output::{AnalysisReport, ReportGenerator, SourceInfo};
use skillgap::processing::analyzer::{build_report_with, AnalysisOptions};
use skillgap::processing::normalizer::StopWords;
use skillgap::processing::skills::{global_vocabulary, install_global};
use skillgap::{
    build_report, normalize, score, AlignmentEngine, InputRole, MatchBand, Result, SkillGapError,
    SkillVocabulary,
};
use std::path::Path;

fn default_vocabulary() -> SkillVocabulary {
    SkillVocabulary::builtin().unwrap()
}

async fn fixture_text(name: &str) -> String {
    let mut manager = InputManager::new();
    manager
        .extract_text(&Path::new("tests/fixtures").join(name))
        .await
        .unwrap()
}

#[tokio::test]
async fn test_text_extraction_from_txt() {
    let mut manager = InputManager::new();
    let path = Path::new("tests/fixtures/sample_resume.txt");

    let result = manager.extract_text(path).await;
    assert!(result.is_ok());

    let text = result.unwrap();
    assert!(text.contains("John Doe"));
    assert!(text.contains("Software Engineer"));
    assert!(text.contains("Kubernetes"));
}

#[tokio::test]
async fn test_text_extraction_from_markdown() {
    let mut manager = InputManager::new();
    let path = Path::new("tests/fixtures/sample_resume.md");

    let text = manager.extract_text(path).await.unwrap();
    assert!(text.contains("John Doe"));
    assert!(text.contains("Software Engineer"));
    assert!(text.contains("six years"));
    assert!(!text.contains("**"));
    assert!(!text.contains("##"));
    assert!(!text.contains('`'));
}

#[tokio::test]
async fn test_caching_functionality() {
    let mut manager = InputManager::new();
    let path = Path::new("tests/fixtures/sample_resume.txt");

    let text1 = manager.extract_text(path).await.unwrap();
    assert_eq!(manager.cache_size(), 1);

    let text2 = manager.extract_text(path).await.unwrap();
    assert_eq!(text1, text2);
    assert_eq!(manager.cache_size(), 1);

    manager.clear_cache();
    assert_eq!(manager.cache_size(), 0);
}

#[tokio::test]
async fn test_cache_disabled() {
    let mut manager = InputManager::new().with_cache(false);
    let path = Path::new("tests/fixtures/sample_job.txt");

    manager.extract_text(path).await.unwrap();
    assert_eq!(manager.cache_size(), 0);
}

#[tokio::test]
async fn test_unsupported_file_type() {
    let mut manager = InputManager::new();
    let path = Path::new("tests/fixtures/unsupported.xyz");

    let err = manager.extract_text(path).await.unwrap_err();
    assert!(matches!(err, SkillGapError::UnsupportedFormat(_)));
}

#[tokio::test]
async fn test_nonexistent_file() {
    let mut manager = InputManager::new();
    let path = Path::new("tests/fixtures/nonexistent.txt");

    let result = manager.extract_text(path).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_fixture_alignment() {
    let resume = fixture_text("sample_resume.txt").await;
    let job = fixture_text("sample_job.txt").await;
    let vocabulary = default_vocabulary();

    let result = build_report(&resume, &job, &vocabulary).unwrap();

    assert!(result.score > 0.0 && result.score < 100.0);
    for skill in ["python", "sql", "docker", "kubernetes", "aws"] {
        assert!(result.matching_skills.contains(skill), "expected match: {}", skill);
    }
    for skill in ["terraform", "gcp", "airflow", "communication", "leadership"] {
        assert!(result.missing_skills.contains(skill), "expected gap: {}", skill);
    }
    assert!(result.missing_keywords.len() <= 15);
    assert!(result.matching_keyword_count > 0);
}

#[test]
fn test_identical_texts_score_full() {
    let text = "Rust developer. Built services with Docker & Kubernetes!";
    let result = build_report(text, text, &default_vocabulary()).unwrap();

    assert_eq!(result.score, 100.0);
    assert!(result.missing_skills.is_empty());
    assert!(result.missing_keywords.is_empty());
    assert_eq!(result.band(), MatchBand::Strong);
}

#[test]
fn test_score_is_symmetric() {
    let a = normalize("Python engineer with SQL, Airflow and some Spark");
    let b = normalize("We need Spark, Python, python and more PYTHON");
    assert_eq!(score(&a, &b), score(&b, &a));
}

#[test]
fn test_score_bounded_and_rounded() {
    let pairs = [
        ("rust go", "rust"),
        ("a b c", "c d e f"),
        ("alpha", "beta"),
        ("x x x y", "x y y y"),
    ];
    for (left, right) in pairs {
        let s = score(&normalize(left), &normalize(right));
        assert!((0.0..=100.0).contains(&s));
        assert_eq!((s * 100.0).round() / 100.0, s);
    }
}

#[test]
fn test_no_shared_tokens_scores_zero() {
    let result = build_report("cooking baking", "welding plumbing", &default_vocabulary()).unwrap();
    assert_eq!(result.score, 0.0);
    assert_eq!(result.matching_keyword_count, 0);
    assert_eq!(result.band(), MatchBand::Weak);
}

#[test]
fn test_punctuation_only_resume_scores_zero() {
    let result = build_report("!!! ... ???", "Rust engineer", &default_vocabulary()).unwrap();
    assert_eq!(result.score, 0.0);
    assert_eq!(result.missing_keywords, vec!["engineer", "rust"]);
}

#[test]
fn test_empty_inputs_rejected() {
    let vocabulary = default_vocabulary();

    let err = build_report("   \n", "Rust engineer", &vocabulary).unwrap_err();
    assert!(matches!(err, SkillGapError::InsufficientInput(InputRole::Resume)));

    let err = build_report("Rust engineer", "", &vocabulary).unwrap_err();
    assert!(matches!(
        err,
        SkillGapError::InsufficientInput(InputRole::JobDescription)
    ));
}

#[test]
fn test_missing_keywords_sorted_and_capped() {
    let vocabulary = default_vocabulary();
    let options = AnalysisOptions {
        missing_keyword_limit: 3,
        ..AnalysisOptions::default()
    };

    let job = "delta alpha charlie bravo echo zeta";
    let result = build_report_with("zeta", job, &vocabulary, &options).unwrap();
    assert_eq!(result.missing_keywords, vec!["alpha", "bravo", "charlie"]);
    assert_eq!(result.matching_keyword_count, 1);
}

#[test]
fn test_stop_words_change_keyword_gap() {
    let vocabulary = default_vocabulary();
    let options = AnalysisOptions {
        stop_words: StopWords::English,
        ..AnalysisOptions::default()
    };

    let plain = build_report("rust", "the rust and the team", &vocabulary).unwrap();
    assert!(plain.missing_keywords.contains(&"the".to_string()));

    let filtered =
        build_report_with("rust", "the rust and the team", &vocabulary, &options).unwrap();
    assert_eq!(filtered.missing_keywords, vec!["team"]);
}

#[test]
fn test_engine_cache_matches_fresh_result() {
    let vocabulary = default_vocabulary();
    let mut engine = AlignmentEngine::new(&vocabulary).with_cache(true);

    let first = engine.analyze("Python and SQL", "SQL, Python, Tableau").unwrap();
    let second = engine.analyze("Python and SQL", "SQL, Python, Tableau").unwrap();

    assert_eq!(first, second);
    assert_eq!(engine.cache_size(), 1);
    assert_eq!(first, build_report("Python and SQL", "SQL, Python, Tableau", &vocabulary).unwrap());
}

#[test]
fn test_global_vocabulary_installs_once() {
    let installed = install_global(SkillVocabulary::new(["rust", "sql"]).unwrap()).unwrap();
    assert_eq!(installed.len(), 2);
    assert_eq!(global_vocabulary().map(SkillVocabulary::len), Some(2));

    let err = install_global(default_vocabulary()).unwrap_err();
    assert!(matches!(err, SkillGapError::Vocabulary(_)));
    assert_eq!(global_vocabulary().map(SkillVocabulary::len), Some(2));
}

#[test]
fn test_config_vocabulary_includes_extra_phrases() {
    let mut config = Config::default();
    config.skills.extra = vec!["Bevy".to_string()];

    let vocabulary = config.skill_vocabulary().unwrap();
    let result = build_report("Game dev with Bevy", "Bevy and Rust", &vocabulary).unwrap();
    assert!(result.matching_skills.contains("bevy"));
    assert!(result.missing_skills.contains("rust"));
}

struct CannedFeedback;

impl FeedbackGenerator for CannedFeedback {
    async fn generate(&self, request: &FeedbackRequest<'_>) -> Result<String> {
        Ok(format!("Score {:.2}: add Terraform to your resume", request.score))
    }
}

struct FailingFeedback;

impl FeedbackGenerator for FailingFeedback {
    async fn generate(&self, _request: &FeedbackRequest<'_>) -> Result<String> {
        Err(SkillGapError::Feedback("endpoint unavailable".to_string()))
    }
}

fn render(generated: Option<String>) -> String {
    let vocabulary = default_vocabulary();
    let resume = "Python, Docker";
    let job = "Python, Docker, Terraform";
    let result = build_report(resume, job, &vocabulary).unwrap();

    let report = AnalysisReport::new(
        result,
        SourceInfo::new("resume.txt", resume),
        SourceInfo::new("job.txt", job),
        vocabulary.len(),
    )
    .with_feedback(generated);

    ReportGenerator::with_options(false, false)
        .generate_report(&report, skillgap::config::OutputFormat::Markdown)
        .unwrap()
}

#[tokio::test]
async fn test_feedback_generator_is_optional() {
    let vocabulary = default_vocabulary();
    let result = build_report("Python, Docker", "Python, Docker, Terraform", &vocabulary).unwrap();
    let request = FeedbackRequest::new("Python, Docker", "Python, Docker, Terraform", &result);

    let advice = CannedFeedback.generate(&request).await.ok();
    let with_advice = render(advice);
    assert!(with_advice.contains("add Terraform to your resume"));

    let failed = FailingFeedback.generate(&request).await;
    assert!(failed.is_err());
    let without_advice = render(failed.ok());
    assert!(without_advice.contains("terraform"));
    assert!(!without_advice.contains("add Terraform"));
}
