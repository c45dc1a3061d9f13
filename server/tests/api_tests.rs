use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use docfind_core::SearchConfig;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use std::fs;
use tempfile::tempdir;
use tower::ServiceExt;

fn build_tiny_corpus(dir: &std::path::Path) {
    fs::write(dir.join("a.txt"), "cat dog cat").unwrap();
    fs::write(dir.join("b.txt"), "dog dog").unwrap();
}

async fn call(app: Router, uri: &str) -> (StatusCode, Value) {
    let req = Request::get(uri).body(Body::empty()).unwrap();
    let resp = app.oneshot(req).await.unwrap();
    let status = resp.status();
    let body = resp.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&body).unwrap())
}

#[tokio::test]
async fn search_returns_ranked_results() {
    let dir = tempdir().unwrap();
    build_tiny_corpus(dir.path());
    let app = docfind_server::build_app(dir.path(), &SearchConfig::default()).unwrap();

    let (status, json) = call(app.clone(), "/api/search?query=dog").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, json!([{"filename": "b.txt", "score": 2}, {"filename": "a.txt", "score": 1}]));

    let (status, json) = call(app, "/api/search?query=cat%20dog").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, json!([{"filename": "a.txt", "score": 3}]));
}

#[tokio::test]
async fn unmatched_query_is_an_empty_array() {
    let dir = tempdir().unwrap();
    build_tiny_corpus(dir.path());
    let app = docfind_server::build_app(dir.path(), &SearchConfig::default()).unwrap();

    let (status, json) = call(app.clone(), "/api/search?query=the").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, json!([]));

    let (status, json) = call(app, "/api/search?query=cat%20unicorn").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, json!([]));
}

#[tokio::test]
async fn missing_or_invalid_query_is_rejected() {
    let dir = tempdir().unwrap();
    build_tiny_corpus(dir.path());
    let app = docfind_server::build_app(dir.path(), &SearchConfig::default()).unwrap();

    let (status, json) = call(app.clone(), "/api/search").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json, json!({"error": "Missing search query parameter."}));

    let (status, json) = call(app, "/api/search?query=%21%3F%21").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json, json!({"error": "Query contains only invalid characters or stop words."}));
}

#[test]
fn empty_corpus_fails_at_startup() {
    let dir = tempdir().unwrap();
    let err = docfind_server::build_app(dir.path(), &SearchConfig::default()).unwrap_err();
    assert!(format!("{err:#}").contains("no documents found"));
}

#[tokio::test]
async fn health_answers_with_cors_headers() {
    let dir = tempdir().unwrap();
    build_tiny_corpus(dir.path());
    let app = docfind_server::build_app(dir.path(), &SearchConfig::default()).unwrap();

    let req = Request::get("/health")
        .header("origin", "http://localhost:3000")
        .body(Body::empty())
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.headers().contains_key("access-control-allow-origin"));
    let body = resp.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&body[..], b"ok");
}

#[tokio::test]
async fn decomposed_query_matches_composed_text() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("menu.txt"), "caf\u{e9} menu").unwrap();
    let app = docfind_server::build_app(dir.path(), &SearchConfig::default()).unwrap();

    // "cafe" followed by U+0301 COMBINING ACUTE ACCENT
    let (status, json) = call(app.clone(), "/api/search?query=cafe%CC%81").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, json!([{"filename": "menu.txt", "score": 1}]));

    let (_, json) = call(app, "/api/search?query=cafe").await;
    assert_eq!(json, json!([]));
}
