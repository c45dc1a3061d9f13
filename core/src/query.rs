//! Conjunctive query resolution with additive term-frequency scoring.
//!
//! Every usable term must be present in the index; the result keeps only
//! the documents common to all of their posting lists, and each document's
//! score is the sum of its occurrence counts over the terms.

use crate::config::{DEFAULT_MAX_QUERY_TERMS, DEFAULT_MAX_RESULTS};
use crate::error::{IndexError, Result};
use crate::index::{DocId, InvertedIndex, Posting};
use crate::rank::{rank, SearchHit};
use crate::tokenizer::{raw_tokens, Normalizer};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryLimits {
    /// Raw terms considered per query; the rest are ignored.
    pub max_terms: usize,
    /// Ranked hits returned per query; lower-ranked matches are dropped.
    pub max_results: usize,
}

impl Default for QueryLimits {
    fn default() -> Self { Self { max_terms: DEFAULT_MAX_QUERY_TERMS, max_results: DEFAULT_MAX_RESULTS } }
}

/// Per-query `(document, aggregate score)` pairs. Owns its storage and
/// never borrows from the index.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ResultSet {
    entries: Vec<(DocId, u64)>,
}

impl ResultSet {
    pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    pub fn len(&self) -> usize { self.entries.len() }

    pub fn iter(&self) -> impl Iterator<Item = (DocId, u64)> + '_ { self.entries.iter().copied() }

    fn seed(postings: &[Posting]) -> Result<Self> {
        let mut entries = Vec::new();
        entries
            .try_reserve_exact(postings.len())
            .map_err(|_| IndexError::ResourceExhausted { what: "result set" })?;
        entries.extend(postings.iter().map(|p| (p.doc, u64::from(p.count))));
        Ok(Self { entries })
    }

    fn intersect(&mut self, postings: &[Posting]) -> Result<()> {
        let mut counts: HashMap<DocId, u32> = HashMap::new();
        counts
            .try_reserve(postings.len())
            .map_err(|_| IndexError::ResourceExhausted { what: "intersection" })?;
        counts.extend(postings.iter().map(|p| (p.doc, p.count)));
        self.entries.retain_mut(|(doc, score)| match counts.get(doc) {
            Some(&count) => {
                *score += u64::from(count);
                true
            }
            None => false,
        });
        Ok(())
    }
}

impl IntoIterator for ResultSet {
    type Item = (DocId, u64);
    type IntoIter = std::vec::IntoIter<(DocId, u64)>;

    fn into_iter(self) -> Self::IntoIter { self.entries.into_iter() }
}

/// Read-only view over a built index answering AND queries.
pub struct QueryEngine<'a> {
    index: &'a InvertedIndex,
    normalizer: &'a Normalizer,
    limits: QueryLimits,
}

impl<'a> QueryEngine<'a> {
    pub fn new(index: &'a InvertedIndex, normalizer: &'a Normalizer, limits: QueryLimits) -> Self {
        Self { index, normalizer, limits }
    }

    /// Usable normalized terms of `query`, in query order, repeats kept.
    pub fn terms(&self, query: &str) -> Vec<String> {
        let mut raw = raw_tokens(query);
        let considered: Vec<&str> = raw.by_ref().take(self.limits.max_terms).collect();
        let ignored = raw.count();
        if ignored > 0 {
            tracing::warn!(ignored, max_terms = self.limits.max_terms, "query term limit reached");
        }
        considered.into_iter().filter_map(|t| self.normalizer.normalize(t)).collect()
    }

    pub fn resolve(&self, query: &str) -> Result<ResultSet> {
        let terms = self.terms(query);
        tracing::debug!(?terms, "resolving query");
        self.resolve_terms(&terms)
    }

    /// Resolve already-normalized terms. Empty and stop-word terms are skipped.
    pub fn resolve_terms<S: AsRef<str>>(&self, terms: &[S]) -> Result<ResultSet> {
        let mut usable = terms
            .iter()
            .map(|t| t.as_ref())
            .filter(|t| !t.is_empty() && !self.normalizer.is_stop_word(t));

        let Some(first) = usable.next() else {
            return Ok(ResultSet::default());
        };
        let postings = self.index.lookup(first);
        if postings.is_empty() {
            tracing::debug!(term = first, "term not indexed");
            return Ok(ResultSet::default());
        }
        let mut set = ResultSet::seed(postings)?;

        for term in usable {
            let postings = self.index.lookup(term);
            if postings.is_empty() {
                tracing::debug!(term, "term not indexed");
                return Ok(ResultSet::default());
            }
            set.intersect(postings)?;
            if set.is_empty() {
                break;
            }
        }
        Ok(set)
    }

    /// Resolve, rank, and keep the best `max_results` hits.
    pub fn search(&self, query: &str) -> Result<Vec<SearchHit>> {
        let mut hits = rank(self.index, self.resolve(query)?);
        if hits.len() > self.limits.max_results {
            tracing::debug!(dropped = hits.len() - self.limits.max_results, cap = self.limits.max_results, "result cap reached");
            hits.truncate(self.limits.max_results);
        }
        Ok(hits)
    }
}
