use anyhow::{Context, Result};
use axum::{extract::{Query, State}, http::StatusCode, routing::get, Json, Router};
use docfind_core::{build_index, InvertedIndex, Normalizer, QueryEngine, QueryLimits, SearchConfig, SearchResponse};
use lazy_static::lazy_static;
use regex::Regex;
use serde::Deserialize;
use std::path::Path;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

lazy_static! {
    // Combining marks are kept; the normalizer composes them.
    static ref DISALLOWED: Regex = Regex::new(r"[^\p{L}\p{M}\p{N}\s]").expect("valid regex");
}

#[derive(Deserialize)]
pub struct SearchParams {
    pub query: Option<String>,
}

/// Built once at startup and never mutated afterwards.
#[derive(Clone)]
pub struct AppState {
    pub index: Arc<InvertedIndex>,
    pub normalizer: Arc<Normalizer>,
    pub limits: QueryLimits,
}

pub fn build_state<P: AsRef<Path>>(docs_dir: P, config: &SearchConfig) -> Result<AppState> {
    let docs_dir = docs_dir.as_ref();
    let normalizer = config.normalizer();
    let index = build_index(docs_dir, &normalizer)
        .with_context(|| format!("failed to build index from {}", docs_dir.display()))?;
    tracing::info!(words = index.word_count(), documents = index.document_count(), "index ready");
    Ok(AppState { index: Arc::new(index), normalizer: Arc::new(normalizer), limits: config.limits() })
}

pub fn build_app<P: AsRef<Path>>(docs_dir: P, config: &SearchConfig) -> Result<Router> {
    let app_state = build_state(docs_dir, config)?;

    // CORS: read CORS_ALLOW_ORIGIN (comma-separated) or allow Any by default
    let cors = match std::env::var("CORS_ALLOW_ORIGIN") {
        Ok(val) => {
            let origins: Vec<_> = val
                .split(',')
                .filter_map(|s| s.trim().parse().ok())
                .collect();
            if origins.is_empty() {
                CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any)
            } else {
                CorsLayer::new().allow_origin(AllowOrigin::list(origins)).allow_methods(Any).allow_headers(Any)
            }
        }
        Err(_) => CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any),
    };

    let app = Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/api/search", get(search_handler))
        .with_state(app_state)
        .layer(TraceLayer::new_for_http())
        .layer(cors);
    Ok(app)
}

type ApiError = (StatusCode, Json<SearchResponse>);

fn bad_request(msg: &str) -> ApiError {
    (StatusCode::BAD_REQUEST, Json(SearchResponse::error(msg)))
}

pub async fn search_handler(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchResponse>, ApiError> {
    let query = match params.query.as_deref().map(str::trim) {
        Some(q) if !q.is_empty() => q,
        _ => return Err(bad_request("Missing search query parameter.")),
    };

    let sanitized = DISALLOWED.replace_all(query, "");
    let sanitized = sanitized.trim();
    if sanitized.is_empty() {
        return Err(bad_request("Query contains only invalid characters or stop words."));
    }

    let engine = QueryEngine::new(&state.index, &state.normalizer, state.limits);
    match engine.search(sanitized) {
        Ok(hits) => {
            tracing::debug!(query = sanitized, hits = hits.len(), "search served");
            Ok(Json(hits.into()))
        }
        Err(err) => {
            tracing::error!(error = %err, "search failed");
            Err((StatusCode::INTERNAL_SERVER_ERROR, Json(SearchResponse::error(err.to_string()))))
        }
    }
}
