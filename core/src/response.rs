//! JSON payloads written by the command line and HTTP front ends.

use crate::rank::SearchHit;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum SearchResponse {
    /// Ranked hits; an empty array when the query matched nothing.
    Hits(Vec<SearchHit>),
    Error { error: String },
    Message { message: String },
}

impl SearchResponse {
    pub fn error(msg: impl Into<String>) -> Self { SearchResponse::Error { error: msg.into() } }

    pub fn message(msg: impl Into<String>) -> Self { SearchResponse::Message { message: msg.into() } }

    pub fn to_json(&self, pretty: bool) -> String {
        let res = if pretty { serde_json::to_string_pretty(self) } else { serde_json::to_string(self) };
        // Only strings and integers inside; serialization cannot fail.
        res.unwrap_or_else(|_| String::from("[]"))
    }
}

impl From<Vec<SearchHit>> for SearchResponse {
    fn from(hits: Vec<SearchHit>) -> Self { SearchResponse::Hits(hits) }
}

/// One line of the index listing.
#[derive(Debug, Serialize)]
pub struct DumpEntry<'a> {
    pub word: &'a str,
    pub postings: Vec<DumpPosting<'a>>,
}

#[derive(Debug, Serialize)]
pub struct DumpPosting<'a> {
    pub filename: &'a str,
    pub count: u32,
}
