pub mod builder;
pub mod config;
pub mod discovery;
pub mod error;
pub mod index;
pub mod query;
pub mod rank;
pub mod response;
pub mod tokenizer;

pub use builder::{build_index, IndexBuilder};
pub use config::SearchConfig;
pub use discovery::{discover, Document};
pub use error::{IndexError, Result};
pub use index::{DocId, InvertedIndex, Posting, TeardownStats};
pub use query::{QueryEngine, QueryLimits, ResultSet};
pub use rank::{rank, SearchHit};
pub use response::SearchResponse;
pub use tokenizer::Normalizer;
