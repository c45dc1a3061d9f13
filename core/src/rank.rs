use crate::index::InvertedIndex;
use crate::query::ResultSet;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchHit {
    pub filename: String,
    pub score: u64,
}

/// Highest score first; equal scores ordered by document name ascending.
pub fn rank(index: &InvertedIndex, results: ResultSet) -> Vec<SearchHit> {
    let mut hits: Vec<SearchHit> = results
        .into_iter()
        .filter_map(|(doc, score)| {
            index.document(doc).map(|name| SearchHit { filename: name.to_string(), score })
        })
        .collect();
    hits.sort_by(|a, b| b.score.cmp(&a.score).then_with(|| a.filename.cmp(&b.filename)));
    hits
}
