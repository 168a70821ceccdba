use axum::{
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    services::{ServeDir, ServeFile},
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use common::types::Health;

use crate::state::ServerState;

pub mod collections;
pub mod notify;

pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

async fn metrics() -> (StatusCode, String) {
    match common::metrics::encode_metrics() {
        Ok(text) => (StatusCode::OK, text),
        Err(e) => (StatusCode::INTERNAL_SERVER_ERROR, e),
    }
}

/// Build the full application router: JSON API, health/metrics and the static UI bundle
pub fn build_router(state: ServerState, cors: CorsLayer, frontend_dir: &str) -> Router {
    let index = format!("{}/index.html", frontend_dir.trim_end_matches('/'));
    let static_dir = ServeDir::new(frontend_dir).fallback(ServeFile::new(index));

    let ops = Router::new()
        .route("/health", get(health))
        .route("/metrics", get(metrics));

    let store_routes = Router::new()
        .route(
            "/api/collections/:name",
            get(collections::get_collection)
                .put(collections::put_collection)
                .delete(collections::delete_collection),
        )
        .route("/api/store", delete(collections::clear_store));

    let notify_routes = Router::new()
        .route("/api/notify/config", get(notify::get_config).put(notify::put_config))
        .route("/api/notify/status", get(notify::status))
        .route("/api/notify/send", post(notify::send));

    ops.merge(store_routes)
        .merge(notify_routes)
        .with_state(state)
        .fallback_service(static_dir)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
