use lazy_static::lazy_static;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;
use std::collections::HashSet;

lazy_static! {
    static ref RE: Regex = Regex::new(r"\S+").expect("valid regex");
}

pub const DEFAULT_STOP_WORDS: &[&str] = &["the", "is", "and", "of", "to", "in", "on", "for", "with", "a", "an"];

/// Longest normalized word kept in the index, in characters. Longer words are truncated.
pub const DEFAULT_MAX_WORD_LEN: usize = 99;

/// Whitespace-separated raw tokens, before any cleaning.
pub fn raw_tokens(text: &str) -> impl Iterator<Item = &str> {
    RE.find_iter(text).map(|m| m.as_str())
}

/// NFKC, lowercase, then drop everything that is not a letter or digit.
pub fn clean(raw: &str) -> String {
    raw.nfkc()
        .flat_map(char::to_lowercase)
        .filter(|c| c.is_alphanumeric())
        .collect()
}

/// Strip one of "ing", "ed" or "s" (in that priority) from words longer than 3 characters.
pub fn stem(word: &str) -> &str {
    if word.chars().count() <= 3 {
        return word;
    }
    word.strip_suffix("ing")
        .or_else(|| word.strip_suffix("ed"))
        .or_else(|| word.strip_suffix('s'))
        .unwrap_or(word)
}

/// Turns raw text into index terms. The same instance must be used at
/// index time and query time so both sides agree on every term.
#[derive(Debug, Clone)]
pub struct Normalizer {
    stop_words: HashSet<String>,
    max_word_len: usize,
}

impl Default for Normalizer {
    fn default() -> Self { Self::new(DEFAULT_STOP_WORDS.iter().copied(), DEFAULT_MAX_WORD_LEN) }
}

impl Normalizer {
    pub fn new<I, S>(stop_words: I, max_word_len: usize) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let stop_words = stop_words
            .into_iter()
            .map(|w| stem(&clean(w.as_ref())).to_string())
            .filter(|w| !w.is_empty())
            .collect();
        Self { stop_words, max_word_len: max_word_len.max(1) }
    }

    pub fn is_stop_word(&self, word: &str) -> bool { self.stop_words.contains(word) }

    /// Normalize one raw token. `None` when it cleans to nothing or is a stop word.
    pub fn normalize(&self, raw: &str) -> Option<String> {
        let cleaned = clean(raw);
        let mut word = stem(&cleaned).to_string();
        if let Some((cut, _)) = word.char_indices().nth(self.max_word_len) {
            word.truncate(cut);
        }
        if word.is_empty() || self.is_stop_word(&word) {
            return None;
        }
        Some(word)
    }

    /// Every surviving term of `text`, in order, duplicates included.
    pub fn tokenize<'a>(&'a self, text: &'a str) -> impl Iterator<Item = String> + 'a {
        raw_tokens(text).filter_map(move |raw| self.normalize(raw))
    }
}
