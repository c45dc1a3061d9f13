use docfind_core::{build_index, discover, IndexError, Normalizer, QueryEngine, QueryLimits};
use std::fs;
use tempfile::tempdir;

#[test]
fn walks_two_levels_and_prefixes_subdirectories() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a.txt"), "cat dog cat").unwrap();
    fs::create_dir_all(dir.path().join("news/deeper")).unwrap();
    fs::write(dir.path().join("news/a.txt"), "dog").unwrap();
    fs::write(dir.path().join("news/deeper/hidden.txt"), "dog").unwrap();

    let docs = discover(dir.path()).unwrap();
    let ids: Vec<&str> = docs.iter().map(|d| d.id.as_str()).collect();
    assert_eq!(ids, vec!["a.txt", "news/a.txt"]);
}

#[test]
fn missing_root_is_a_setup_failure() {
    let dir = tempdir().unwrap();
    let err = discover(&dir.path().join("nope")).unwrap_err();
    assert!(matches!(err, IndexError::Discovery { .. }));
    assert!(err.is_setup_failure());
}

#[test]
fn empty_root_reports_no_documents() {
    let dir = tempdir().unwrap();
    let err = build_index(dir.path(), &Normalizer::default()).unwrap_err();
    assert!(matches!(err, IndexError::NoDocuments { .. }));
}

#[test]
fn stop_word_only_corpus_is_an_empty_index() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a.txt"), "the and of a").unwrap();
    let err = build_index(dir.path(), &Normalizer::default()).unwrap_err();
    assert!(matches!(err, IndexError::EmptyIndex));
}

#[test]
fn non_utf8_bytes_are_decoded_lossily() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("bin.txt"), b"caf\xff rocket").unwrap();
    let n = Normalizer::default();
    let index = build_index(dir.path(), &n).unwrap();
    let engine = QueryEngine::new(&index, &n, QueryLimits::default());
    assert_eq!(engine.search("rocket").unwrap().len(), 1);
    assert_eq!(engine.search("caf").unwrap().len(), 1);
}
