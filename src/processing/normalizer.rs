//! Text normalization and tokenization

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// Lower-cased text in which every run of non-word characters has been
/// collapsed to a single space.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NormalizedText(String);

impl NormalizedText {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whitespace-delimited tokens; empty fragments are skipped
    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        self.0.split_whitespace()
    }

    /// True when the text carries no tokens at all
    pub fn is_blank(&self) -> bool {
        self.tokens().next().is_none()
    }
}

impl AsRef<str> for NormalizedText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

fn non_word_regex() -> &'static Regex {
    static NON_WORD: OnceLock<Regex> = OnceLock::new();
    NON_WORD.get_or_init(|| Regex::new(r"[^\p{L}\p{N}_]+").expect("Invalid non-word regex"))
}

/// Lower-case `text` and collapse each run of characters that are not a
/// letter, digit or underscore into one space.
///
/// Leading and trailing runs become a single space rather than being
/// trimmed; tokenization discards them.
pub fn normalize(text: &str) -> NormalizedText {
    let lowered = text.to_lowercase();
    NormalizedText(non_word_regex().replace_all(&lowered, " ").into_owned())
}

/// Stop-word policy applied to tokens before vectorization
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StopWords {
    #[default]
    None,
    English,
}

impl StopWords {
    pub fn is_stop_word(&self, token: &str) -> bool {
        match self {
            StopWords::None => false,
            StopWords::English => ENGLISH_STOP_WORDS.binary_search(&token).is_ok(),
        }
    }

    /// Tokens of `text` with stop words removed
    pub fn filter<'a>(&'a self, text: &'a NormalizedText) -> impl Iterator<Item = &'a str> + 'a {
        text.tokens().filter(move |token| !self.is_stop_word(token))
    }
}

// Sorted; looked up with binary search.
const ENGLISH_STOP_WORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "all", "also", "am", "an", "and", "any",
    "are", "as", "at", "be", "because", "been", "before", "being", "below", "between", "both",
    "but", "by", "can", "could", "did", "do", "does", "doing", "down", "during", "each", "etc",
    "few", "for", "from", "further", "had", "has", "have", "having", "he", "her", "here", "hers",
    "herself", "him", "himself", "his", "how", "i", "if", "in", "into", "is", "it", "its",
    "itself", "just", "me", "more", "most", "must", "my", "myself", "no", "nor", "not", "of",
    "off", "on", "once", "only", "or", "other", "our", "ours", "ourselves", "out", "over", "own",
    "same", "she", "should", "so", "some", "such", "than", "that", "the", "their", "theirs",
    "them", "themselves", "then", "there", "these", "they", "this", "those", "through", "to",
    "too", "under", "until", "up", "us", "very", "was", "we", "were", "what", "when", "where",
    "which", "while", "who", "whom", "why", "will", "with", "would", "you", "your", "yours",
    "yourself", "yourselves",
];
