//! Skill vocabulary and substring-based skill detection

use crate::error::{Result, SkillGapError};
use aho_corasick::{AhoCorasick, MatchKind};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::OnceLock;

/// Fixed, ordered set of known skill phrases.
///
/// Phrases are stored lower-cased and trimmed, duplicates dropped on first
/// occurrence. There is no way to add or remove phrases after construction.
pub struct SkillVocabulary {
    phrases: Vec<String>,
    matcher: AhoCorasick,
}

impl SkillVocabulary {
    pub fn new<I, S>(phrases: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = HashSet::new();
        let phrases: Vec<String> = phrases
            .into_iter()
            .map(|p| p.as_ref().trim().to_lowercase())
            .filter(|p| !p.is_empty())
            .filter(|p| seen.insert(p.clone()))
            .collect();

        // Standard semantics so overlapping search reports every phrase
        let matcher = AhoCorasick::builder()
            .match_kind(MatchKind::Standard)
            .build(&phrases)
            .map_err(|e| {
                SkillGapError::Vocabulary(format!("Failed to build skill matcher: {}", e))
            })?;

        Ok(Self { phrases, matcher })
    }

    /// Vocabulary shipped with the default configuration
    pub fn builtin() -> Result<Self> {
        Self::new(default_skill_phrases())
    }

    pub fn phrases(&self) -> &[String] {
        &self.phrases
    }

    pub fn len(&self) -> usize {
        self.phrases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.phrases.is_empty()
    }

    /// Every vocabulary phrase occurring as a contiguous substring of the
    /// lower-cased text.
    ///
    /// Matching ignores token boundaries: "aws" is found inside
    /// "dawson".
    pub fn extract_skills(&self, text: &str) -> SkillSet {
        let lowered = text.to_lowercase();
        let mut found = vec![false; self.phrases.len()];

        for mat in self.matcher.find_overlapping_iter(lowered.as_str()) {
            found[mat.pattern().as_usize()] = true;
        }

        let skills: Vec<String> = self
            .phrases
            .iter()
            .zip(found)
            .filter_map(|(phrase, hit)| hit.then(|| phrase.clone()))
            .collect();

        debug!("Matched {} of {} vocabulary skills", skills.len(), self.phrases.len());
        SkillSet { skills }
    }
}

impl std::fmt::Debug for SkillVocabulary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SkillVocabulary")
            .field("phrases", &self.phrases)
            .finish()
    }
}

/// Free-function form of [`SkillVocabulary::extract_skills`]
pub fn extract_skills(text: &str, vocabulary: &SkillVocabulary) -> SkillSet {
    vocabulary.extract_skills(text)
}

/// Vocabulary phrases found in some text.
///
/// Iteration follows vocabulary order; membership is all that matters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SkillSet {
    skills: Vec<String>,
}

impl SkillSet {
    pub fn contains(&self, skill: &str) -> bool {
        self.skills.iter().any(|s| s == skill)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.skills.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.skills.len()
    }

    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.skills.clone()
    }

    /// Skills present in both sets
    pub fn intersection(&self, other: &SkillSet) -> SkillSet {
        let other: HashSet<&str> = other.iter().collect();
        SkillSet {
            skills: self
                .skills
                .iter()
                .filter(|s| other.contains(s.as_str()))
                .cloned()
                .collect(),
        }
    }

    /// Skills in `self` that are absent from `other`
    pub fn difference(&self, other: &SkillSet) -> SkillSet {
        let other: HashSet<&str> = other.iter().collect();
        SkillSet {
            skills: self
                .skills
                .iter()
                .filter(|s| !other.contains(s.as_str()))
                .cloned()
                .collect(),
        }
    }
}

/// Resume skills also required by the job
pub fn matching(resume_skills: &SkillSet, job_skills: &SkillSet) -> SkillSet {
    resume_skills.intersection(job_skills)
}

/// Job skills the resume does not show
pub fn missing(resume_skills: &SkillSet, job_skills: &SkillSet) -> SkillSet {
    job_skills.difference(resume_skills)
}

static GLOBAL_VOCABULARY: OnceLock<SkillVocabulary> = OnceLock::new();

/// Install the process-wide vocabulary. Succeeds once; later calls fail.
pub fn install_global(vocabulary: SkillVocabulary) -> Result<&'static SkillVocabulary> {
    GLOBAL_VOCABULARY
        .set(vocabulary)
        .map_err(|_| {
            SkillGapError::Vocabulary("Global skill vocabulary is already installed".to_string())
        })?;
    GLOBAL_VOCABULARY
        .get()
        .ok_or_else(|| {
            SkillGapError::Vocabulary("Global skill vocabulary missing after install".to_string())
        })
}

/// The installed process-wide vocabulary, if any
pub fn global_vocabulary() -> Option<&'static SkillVocabulary> {
    GLOBAL_VOCABULARY.get()
}

/// Default skill phrases.
///
/// Very short names such as "r", "c" or "go" are left out because substring
/// matching would find them inside most words.
pub fn default_skill_phrases() -> Vec<String> {
    [
        // Programming languages
        "python", "java", "javascript", "typescript", "rust", "golang", "c++", "c#", "ruby",
        "php", "swift", "kotlin", "scala", "matlab", "sql",
        // Web
        "react", "angular", "vue", "node.js", "html", "css", "django", "flask", "spring",
        "graphql", "rest api",
        // Infrastructure
        "aws", "azure", "gcp", "docker", "kubernetes", "terraform", "ansible", "jenkins",
        "ci/cd", "linux", "git", "microservices",
        // Data
        "postgresql", "mysql", "mongodb", "redis", "elasticsearch", "kafka", "spark", "hadoop",
        "airflow", "excel", "tableau", "power bi", "data analysis", "data visualization",
        "statistics",
        // Machine learning
        "machine learning", "deep learning", "nlp", "computer vision", "tensorflow", "pytorch",
        "scikit-learn", "pandas", "numpy",
        // Practices and soft skills
        "agile", "scrum", "testing", "communication", "leadership", "teamwork",
        "problem solving", "project management",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}
