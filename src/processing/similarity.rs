//! Bag-of-words cosine similarity between normalized texts

use crate::processing::normalizer::{NormalizedText, StopWords};
use std::collections::HashMap;

/// Scores two normalized texts on a 0-100 scale
#[derive(Debug, Clone, Copy, Default)]
pub struct SimilarityScorer {
    stop_words: StopWords,
}

impl SimilarityScorer {
    pub fn new(stop_words: StopWords) -> Self {
        Self { stop_words }
    }

    /// Cosine similarity of the term-frequency vectors, times 100, rounded
    /// to two decimals. Returns 0 when either side has no tokens.
    pub fn score(&self, resume: &NormalizedText, job: &NormalizedText) -> f64 {
        let resume_tf = self.term_frequencies(resume);
        let job_tf = self.term_frequencies(job);
        round_percentage(cosine(&resume_tf, &job_tf))
    }

    fn term_frequencies<'a>(&self, text: &'a NormalizedText) -> HashMap<&'a str, u64> {
        let mut frequencies = HashMap::new();
        for token in text.tokens().filter(|t| !self.stop_words.is_stop_word(t)) {
            *frequencies.entry(token).or_insert(0) += 1;
        }
        frequencies
    }
}

/// Score with no stop-word filtering
pub fn score(resume: &NormalizedText, job: &NormalizedText) -> f64 {
    SimilarityScorer::default().score(resume, job)
}

// Integer dot product and norms keep the result exactly symmetric.
fn cosine(a: &HashMap<&str, u64>, b: &HashMap<&str, u64>) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    let (small, large) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    let dot: u64 = small
        .iter()
        .filter_map(|(term, count)| large.get(term).map(|other| count * other))
        .sum();

    if dot == 0 {
        return 0.0;
    }

    let norm_a: u64 = a.values().map(|c| c * c).sum();
    let norm_b: u64 = b.values().map(|c| c * c).sum();
    let denominator = (norm_a as f64 * norm_b as f64).sqrt();

    (dot as f64 / denominator).clamp(0.0, 1.0)
}

fn round_percentage(similarity: f64) -> f64 {
    ((similarity * 100.0 * 100.0).round() / 100.0).clamp(0.0, 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::normalizer::normalize;

    #[test]
    fn test_identical_texts_score_hundred() {
        let text = normalize("Senior Rust engineer building distributed systems in Rust");
        assert_eq!(score(&text, &text), 100.0);
    }

    #[test]
    fn test_empty_side_scores_zero() {
        assert_eq!(score(&normalize(""), &normalize("anything")), 0.0);
        assert_eq!(score(&normalize("anything"), &normalize("")), 0.0);
        assert_eq!(score(&normalize("   "), &normalize("")), 0.0);
    }

    #[test]
    fn test_disjoint_vocabularies_score_zero() {
        let a = normalize("python django postgres");
        let b = normalize("welding forklift safety");
        assert_eq!(score(&a, &b), 0.0);
    }

    #[test]
    fn test_score_is_symmetric() {
        let pairs = [
            ("rust rust go", "go python rust"),
            ("data analyst sql excel tableau", "sql sql sql analyst"),
            ("a b c d e f g", "g"),
        ];
        for (a, b) in pairs {
            let (a, b) = (normalize(a), normalize(b));
            assert_eq!(score(&a, &b), score(&b, &a));
        }
    }

    #[test]
    fn test_known_value() {
        // tf(a) = {rust: 1, go: 1}, tf(b) = {rust: 1}: cos = 1/sqrt(2)
        let a = normalize("rust go");
        let b = normalize("rust");
        assert_eq!(score(&a, &b), 70.71);
    }

    #[test]
    fn test_repetition_does_not_change_direction() {
        let a = normalize("sql python");
        let b = normalize("sql python sql python sql python");
        assert_eq!(score(&a, &b), 100.0);
    }

    #[test]
    fn test_stop_words_excluded_when_enabled() {
        let scorer = SimilarityScorer::new(StopWords::English);
        let a = normalize("the and of rust");
        let b = normalize("the and of java");
        assert_eq!(scorer.score(&a, &b), 0.0);
        assert!(score(&a, &b) > 0.0);
    }

    #[test]
    fn test_only_stop_words_scores_zero() {
        let scorer = SimilarityScorer::new(StopWords::English);
        let a = normalize("the and");
        assert_eq!(scorer.score(&a, &a), 0.0);
    }
}
