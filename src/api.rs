// src/api.rs
// Thin HTTP surface over the library entry points. The dashboard (served
// elsewhere) talks to these routes, so CORS stays permissive.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use serde_json::json;
use tower_http::cors::CorsLayer;

use crate::bridge::{BridgeGenerator, ItemInput};
use crate::feeds::watcher::FeedWatcher;
use crate::submit::SubmitEngine;

#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<SubmitEngine>,
    pub watcher: Arc<FeedWatcher>,
    pub bridge: Arc<BridgeGenerator>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "OK" }))
        .route("/api/submit", post(submit))
        .route("/api/boost", post(boost))
        .route("/api/feed", post(add_feed))
        .route("/api/feeds", get(list_feeds))
        .route("/api/history", get(history))
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}

#[derive(serde::Deserialize)]
struct UrlReq {
    #[serde(default)]
    url: String,
}

#[derive(serde::Deserialize)]
struct BoostReq {
    #[serde(default)]
    urls: Vec<ItemInput>,
}

async fn submit(State(state): State<AppState>, Json(req): Json<UrlReq>) -> impl IntoResponse {
    if req.url.trim().is_empty() {
        return (StatusCode::BAD_REQUEST, Json(json!({ "error": "URL required" })))
            .into_response();
    }
    let result = state.engine.submit(&req.url).await;
    Json(result).into_response()
}

async fn boost(State(state): State<AppState>, Json(req): Json<BoostReq>) -> impl IntoResponse {
    if req.urls.is_empty() {
        return (StatusCode::BAD_REQUEST, Json(json!({ "error": "URLs array required" })))
            .into_response();
    }
    let count = req.urls.len();

    match state.bridge.boost(req.urls).await {
        Ok(result) => Json(json!({
            "success": true,
            "bridgeUrl": result.url,
            "message": format!("Created bridge page with {count} links and submitted it for indexing."),
        }))
        .into_response(),
        Err(e) => {
            tracing::warn!(error = %e, "bridge page generation failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": e.to_string() })),
            )
                .into_response()
        }
    }
}

async fn add_feed(State(state): State<AppState>, Json(req): Json<UrlReq>) -> impl IntoResponse {
    if req.url.trim().is_empty() {
        return (StatusCode::BAD_REQUEST, Json(json!({ "error": "URL required" })))
            .into_response();
    }
    state.watcher.add_feed(&req.url).await;
    let feeds = state.watcher.registry().list().await;
    Json(json!({ "success": true, "feeds": feeds })).into_response()
}

async fn list_feeds(State(state): State<AppState>) -> impl IntoResponse {
    let feeds = state.watcher.registry().list().await;
    Json(json!({ "feeds": feeds }))
}

async fn history(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.engine.history().snapshot().await)
}
