use anyhow::Result;
use axum::{extract::{Path, Query, State}, http::{HeaderMap, HeaderValue, StatusCode}, routing::{get, post}, Json, Router};
use lse_core::loader::build_from_files;
use lse_core::{OccurrenceList, SearchEngine};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Where the corpus is read from, kept so the index can be rebuilt.
#[derive(Debug, Clone)]
pub struct IndexSources {
    pub docs: PathBuf,
    pub noise: PathBuf,
}

#[derive(Deserialize)]
pub struct SearchParams {
    pub kw1: Option<String>,
    pub kw2: Option<String>,
}

#[derive(Serialize)]
pub struct SearchResponse {
    pub kw1: Option<String>,
    pub kw2: Option<String>,
    pub took_s: f64,
    pub results: Vec<String>,
}

#[derive(Serialize)]
pub struct KeywordResponse {
    pub keyword: String,
    pub occurrences: OccurrenceList,
}

#[derive(Serialize)]
pub struct ReloadResponse {
    pub num_docs: usize,
    pub num_keywords: usize,
}

#[derive(Clone)]
pub struct AppState {
    /// Current snapshot. Reload swaps the `Arc`; a built engine is never mutated.
    pub engine: Arc<RwLock<Arc<SearchEngine>>>,
    pub sources: Arc<IndexSources>,
    pub admin_token: Option<String>,
}

impl AppState {
    fn snapshot(&self) -> Arc<SearchEngine> { self.engine.read().clone() }
}

/// Build the index from `sources` and assemble the router. Reads `ADMIN_TOKEN`
/// and `CORS_ALLOW_ORIGIN` from the environment.
pub fn build_app(sources: IndexSources) -> Result<Router> {
    let admin_token = std::env::var("ADMIN_TOKEN").ok();
    build_app_with_token(sources, admin_token)
}

pub fn build_app_with_token(sources: IndexSources, admin_token: Option<String>) -> Result<Router> {
    let engine = build_from_files(&sources.docs, &sources.noise)?;
    let app_state = AppState {
        engine: Arc::new(RwLock::new(Arc::new(engine))),
        sources: Arc::new(sources),
        admin_token,
    };

    let cors = cors_layer(std::env::var("CORS_ALLOW_ORIGIN").ok().as_deref());
    let app = Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/search", get(search_handler))
        .route("/keywords/:keyword", get(keyword_handler))
        .route("/index/reload", post(reload_handler))
        .with_state(app_state)
        .layer(cors)
        .layer(TraceLayer::new_for_http());
    Ok(app)
}

/// Allowed origins are a comma-separated list; an unset or fully unparsable
/// list allows any origin.
fn cors_layer(allowed: Option<&str>) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed
        .unwrap_or_default()
        .split(',')
        .filter_map(|s| HeaderValue::from_str(s.trim()).ok())
        .filter(|v| !v.is_empty())
        .collect();
    let base = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if origins.is_empty() {
        base.allow_origin(Any)
    } else {
        base.allow_origin(AllowOrigin::list(origins))
    }
}

pub async fn search_handler(State(state): State<AppState>, Query(params): Query<SearchParams>) -> Json<SearchResponse> {
    let start = std::time::Instant::now();
    let engine = state.snapshot();
    let results = engine.top5_search(params.kw1.as_deref(), params.kw2.as_deref());
    let elapsed = start.elapsed();
    tracing::debug!(kw1 = ?params.kw1, kw2 = ?params.kw2, hits = results.len(), "search");
    Json(SearchResponse { kw1: params.kw1, kw2: params.kw2, took_s: elapsed.as_secs_f64(), results })
}

pub async fn keyword_handler(State(state): State<AppState>, Path(keyword): Path<String>) -> Result<Json<KeywordResponse>, (StatusCode, String)> {
    let engine = state.snapshot();
    let keyword = keyword.trim().to_lowercase();
    let Some(list) = engine.index().get(&keyword) else {
        return Err((StatusCode::NOT_FOUND, format!("keyword {keyword} not indexed")));
    };
    let occurrences = list.clone();
    Ok(Json(KeywordResponse { keyword, occurrences }))
}

pub async fn reload_handler(State(state): State<AppState>, headers: HeaderMap) -> Result<Json<ReloadResponse>, (StatusCode, String)> {
    authorize(&state, &headers)?;
    let sources = state.sources.clone();
    let engine = tokio::task::spawn_blocking(move || build_from_files(&sources.docs, &sources.noise))
        .await
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?
        .map_err(|e| {
            tracing::warn!(error = %e, "index reload failed");
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        })?;
    let resp = ReloadResponse { num_docs: engine.document_count(), num_keywords: engine.index().len() };
    *state.engine.write() = Arc::new(engine);
    tracing::info!(num_docs = resp.num_docs, num_keywords = resp.num_keywords, "index reloaded");
    Ok(Json(resp))
}

/// Reload is refused outright when no `ADMIN_TOKEN` is configured.
fn authorize(state: &AppState, headers: &HeaderMap) -> Result<(), (StatusCode, String)> {
    let Some(expected) = state.admin_token.as_deref() else {
        return Err((StatusCode::UNAUTHORIZED, "reload disabled: ADMIN_TOKEN not set".into()));
    };
    match headers.get("X-ADMIN-TOKEN").map(|v| v.to_str()) {
        Some(Ok(given)) if given == expected => Ok(()),
        Some(_) => Err((StatusCode::UNAUTHORIZED, "invalid admin token".into())),
        None => Err((StatusCode::UNAUTHORIZED, "missing X-ADMIN-TOKEN header".into())),
    }
}
