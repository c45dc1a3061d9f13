use crate::error::{IndexError, Result};
use std::collections::{BTreeMap, HashMap};

pub type DocId = u32;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Posting {
    pub doc: DocId,
    pub count: u32, // occurrences of the word in `doc`, always >= 1
}

/// Postings for one word, in the order documents first contributed it.
#[derive(Debug, Default)]
pub struct WordEntry {
    postings: Vec<Posting>,
}

impl WordEntry {
    pub fn postings(&self) -> &[Posting] { &self.postings }

    fn record(&mut self, doc: DocId) -> Result<()> {
        // The builder feeds one document at a time, so repeats land on the tail.
        if let Some(last) = self.postings.last_mut() {
            if last.doc == doc {
                last.count = last.count.saturating_add(1);
                return Ok(());
            }
        }
        if let Some(p) = self.postings.iter_mut().find(|p| p.doc == doc) {
            p.count = p.count.saturating_add(1);
            return Ok(());
        }
        self.postings
            .try_reserve(1)
            .map_err(|_| IndexError::ResourceExhausted { what: "posting" })?;
        self.postings.push(Posting { doc, count: 1 });
        Ok(())
    }
}

/// Counts reported by [`InvertedIndex::teardown`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TeardownStats {
    pub words: usize,
    pub postings: usize,
    pub documents: usize,
}

/// Word-keyed ordered map of posting lists plus the document table the
/// postings point into. Mutated only during the build phase.
#[derive(Debug, Default)]
pub struct InvertedIndex {
    words: BTreeMap<String, WordEntry>,
    documents: Vec<String>,
    doc_ids: HashMap<String, DocId>,
}

impl InvertedIndex {
    pub fn new() -> Self { Self::default() }

    /// Record one occurrence of `word` in `document`.
    pub fn insert(&mut self, word: &str, document: &str) -> Result<()> {
        let doc = self.intern(document)?;
        if let Some(entry) = self.words.get_mut(word) {
            return entry.record(doc);
        }
        let mut key = String::new();
        key.try_reserve_exact(word.len())
            .map_err(|_| IndexError::ResourceExhausted { what: "word entry" })?;
        key.push_str(word);
        let mut entry = WordEntry::default();
        entry.record(doc)?;
        self.words.insert(key, entry);
        Ok(())
    }

    /// Exact-match retrieval; an unknown word yields an empty slice.
    pub fn lookup(&self, word: &str) -> &[Posting] {
        self.words.get(word).map(WordEntry::postings).unwrap_or(&[])
    }

    pub fn document(&self, doc: DocId) -> Option<&str> {
        self.documents.get(doc as usize).map(String::as_str)
    }

    /// Words in lexicographic order with their postings.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &[Posting])> + '_ {
        self.words.iter().map(|(w, e)| (w.as_str(), e.postings()))
    }

    pub fn word_count(&self) -> usize { self.words.len() }

    pub fn document_count(&self) -> usize { self.documents.len() }

    pub fn posting_count(&self) -> usize {
        self.words.values().map(|e| e.postings.len()).sum()
    }

    pub fn is_empty(&self) -> bool { self.words.is_empty() }

    /// Release every word entry and posting exactly once.
    pub fn teardown(self) -> TeardownStats {
        let mut stats = TeardownStats { documents: self.documents.len(), ..TeardownStats::default() };
        for (_word, entry) in self.words {
            stats.words += 1;
            stats.postings += entry.postings.len();
        }
        tracing::debug!(words = stats.words, postings = stats.postings, "index released");
        stats
    }

    fn intern(&mut self, document: &str) -> Result<DocId> {
        if let Some(&id) = self.doc_ids.get(document) {
            return Ok(id);
        }
        let id = DocId::try_from(self.documents.len())
            .map_err(|_| IndexError::ResourceExhausted { what: "document id" })?;
        self.documents
            .try_reserve(1)
            .map_err(|_| IndexError::ResourceExhausted { what: "document table" })?;
        self.documents.push(document.to_owned());
        self.doc_ids.insert(document.to_owned(), id);
        Ok(id)
    }
}
