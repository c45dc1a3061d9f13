//! Error types for index construction and querying.

use std::path::PathBuf;

/// Errors raised while discovering documents, building the index, or
/// resolving a query.
#[derive(Debug, thiserror::Error)]
pub enum IndexError {
    /// An allocation for index or result storage could not be satisfied.
    #[error("resource exhausted while allocating {what}")]
    ResourceExhausted { what: &'static str },

    /// The document root could not be read.
    #[error("could not open document directory {}: {source}", .path.display())]
    Discovery {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The document root was readable but held no files.
    #[error("no documents found under {}", .path.display())]
    NoDocuments { path: PathBuf },

    /// Every document normalized to nothing.
    #[error("index is empty, nothing to search")]
    EmptyIndex,
}

impl IndexError {
    /// Setup failures short-circuit the pipeline and map to exit code 1.
    pub fn is_setup_failure(&self) -> bool {
        matches!(
            self,
            IndexError::Discovery { .. } | IndexError::NoDocuments { .. } | IndexError::EmptyIndex
        )
    }
}

pub type Result<T> = std::result::Result<T, IndexError>;
