use crate::query::QueryLimits;
use crate::tokenizer::{raw_tokens, Normalizer, DEFAULT_MAX_WORD_LEN, DEFAULT_STOP_WORDS};
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

pub const DEFAULT_MAX_QUERY_TERMS: usize = 20;
pub const DEFAULT_MAX_RESULTS: usize = 500;

/// Tunables shared by every front end.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    pub max_query_terms: usize,
    pub max_results: usize,
    pub max_word_len: usize,
    pub stop_words: Vec<String>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_query_terms: DEFAULT_MAX_QUERY_TERMS,
            max_results: DEFAULT_MAX_RESULTS,
            max_word_len: DEFAULT_MAX_WORD_LEN,
            stop_words: DEFAULT_STOP_WORDS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl SearchConfig {
    pub fn normalizer(&self) -> Normalizer { Normalizer::new(&self.stop_words, self.max_word_len) }

    pub fn limits(&self) -> QueryLimits {
        QueryLimits { max_terms: self.max_query_terms, max_results: self.max_results }
    }
}

/// Read a whitespace-separated stop-word list.
pub fn load_stop_words<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read stop-word file {}", path.display()))?;
    Ok(raw_tokens(&text).map(str::to_string).collect())
}
