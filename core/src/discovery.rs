//! Enumerate documents under a root directory.
//!
//! Files directly under the root are identified by their file name; files
//! one subdirectory down are identified as `<subdirectory>/<filename>` so
//! that equal names in different subdirectories stay distinct. Deeper
//! levels are not visited.

use crate::error::{IndexError, Result};
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub id: String,
    pub text: String,
}

/// Read every discoverable document under `root`, sorted by path.
///
/// Fails when `root` cannot be opened or yields no readable file. Files
/// that cannot be read are skipped with a warning.
pub fn discover(root: &Path) -> Result<Vec<Document>> {
    fs::read_dir(root).map_err(|source| IndexError::Discovery { path: root.to_path_buf(), source })?;

    let mut docs = Vec::new();
    let walker = WalkDir::new(root).min_depth(1).max_depth(2).sort_by_file_name();
    for entry in walker {
        let entry = match entry {
            Ok(e) => e,
            Err(err) => {
                tracing::warn!(error = %err, "skipping unreadable entry");
                continue;
            }
        };
        let p = entry.path();
        if !p.is_file() { continue; }
        let Some(id) = document_id(root, p) else {
            tracing::warn!(path = %p.display(), "skipping file with non-UTF-8 name");
            continue;
        };
        match fs::read(p) {
            Ok(bytes) => docs.push(Document { id, text: String::from_utf8_lossy(&bytes).into_owned() }),
            Err(err) => tracing::warn!(path = %p.display(), error = %err, "error opening document"),
        }
    }

    if docs.is_empty() {
        return Err(IndexError::NoDocuments { path: root.to_path_buf() });
    }
    tracing::info!(root = %root.display(), documents = docs.len(), "discovered documents");
    Ok(docs)
}

fn document_id(root: &Path, path: &Path) -> Option<String> {
    let rel = path.strip_prefix(root).ok()?;
    let parts = rel
        .components()
        .map(|c| c.as_os_str().to_str())
        .collect::<Option<Vec<_>>>()?;
    Some(parts.join("/"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_relative_with_forward_slashes() {
        let root = Path::new("/docs");
        assert_eq!(document_id(root, Path::new("/docs/a.txt")).as_deref(), Some("a.txt"));
        assert_eq!(document_id(root, Path::new("/docs/news/a.txt")).as_deref(), Some("news/a.txt"));
    }
}
