use crate::discovery::{discover, Document};
use crate::error::{IndexError, Result};
use crate::index::InvertedIndex;
use crate::tokenizer::Normalizer;
use std::path::Path;

/// Drives [`InvertedIndex::insert`] once per token occurrence. Owns the
/// index for the whole build phase; [`IndexBuilder::finish`] hands it over
/// for read-only querying.
pub struct IndexBuilder<'n> {
    index: InvertedIndex,
    normalizer: &'n Normalizer,
    tokens: u64,
}

impl<'n> IndexBuilder<'n> {
    pub fn new(normalizer: &'n Normalizer) -> Self {
        Self { index: InvertedIndex::new(), normalizer, tokens: 0 }
    }

    /// Insert an already-normalized word.
    pub fn add_token(&mut self, word: &str, document: &str) -> Result<()> {
        self.index.insert(word, document)?;
        self.tokens += 1;
        Ok(())
    }

    pub fn add_tokens<I, S>(&mut self, document: &str, words: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for word in words {
            self.add_token(word.as_ref(), document)?;
        }
        Ok(())
    }

    /// Normalize `text` and insert every surviving term. Returns how many were inserted.
    pub fn add_text(&mut self, document: &str, text: &str) -> Result<usize> {
        let mut inserted = 0;
        for word in self.normalizer.tokenize(text) {
            self.index.insert(&word, document)?;
            inserted += 1;
        }
        self.tokens += inserted as u64;
        Ok(inserted)
    }

    pub fn add_document(&mut self, doc: &Document) -> Result<usize> {
        let inserted = self.add_text(&doc.id, &doc.text)?;
        if inserted == 0 {
            tracing::debug!(document = %doc.id, "document has no indexable terms");
        }
        Ok(inserted)
    }

    pub fn finish(self) -> InvertedIndex {
        tracing::info!(
            tokens = self.tokens,
            words = self.index.word_count(),
            documents = self.index.document_count(),
            "index build complete"
        );
        self.index
    }
}

/// Discover every document under `root` and index it. Errors when nothing
/// could be discovered or nothing survived normalization; a partial index
/// is never returned.
pub fn build_index(root: &Path, normalizer: &Normalizer) -> Result<InvertedIndex> {
    let docs = discover(root)?;
    let mut builder = IndexBuilder::new(normalizer);
    for doc in &docs {
        builder.add_document(doc)?;
    }
    let index = builder.finish();
    if index.is_empty() {
        return Err(IndexError::EmptyIndex);
    }
    Ok(index)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_occurrence_counts() {
        let n = Normalizer::default();
        let mut b = IndexBuilder::new(&n);
        assert_eq!(b.add_text("a.txt", "cat dog cat").unwrap(), 3);
        b.add_tokens("b.txt", ["dog", "dog"]).unwrap();
        let index = b.finish();
        assert_eq!(index.lookup("cat")[0].count, 2);
        let dog: Vec<u32> = index.lookup("dog").iter().map(|p| p.count).collect();
        assert_eq!(dog, vec![1, 2]);
    }

    #[test]
    fn stop_words_never_reach_the_index() {
        let n = Normalizer::default();
        let mut b = IndexBuilder::new(&n);
        assert_eq!(b.add_text("a.txt", "The cat and the hat").unwrap(), 2);
        let index = b.finish();
        assert!(index.lookup("the").is_empty());
        assert!(index.lookup("and").is_empty());
    }

    #[test]
    fn empty_text_leaves_index_empty() {
        let n = Normalizer::default();
        let mut b = IndexBuilder::new(&n);
        b.add_document(&Document { id: "blank.txt".into(), text: " \n\t of the ".into() }).unwrap();
        assert!(b.finish().is_empty());
    }
}
