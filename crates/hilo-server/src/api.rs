use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use hilo_core::{LatestSnapshot, Variant};
use hilo_session::{HistoryView, VariantCoordinator};
use tower_http::cors::{Any, CorsLayer};

/// Shared handler state.
pub type AppState = Arc<VariantCoordinator>;

/// Text served at `/`.
pub const BANNER: &str = "hilo prediction service. \
Endpoints: /health, /api/taixiu, /api/taixiumd5, /api/history, /api/history/{variant}";

/// Build the read-only API over a shared coordinator.
pub fn create_router(coordinator: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(handle_index))
        .route("/health", get(handle_health_check))
        .route("/api/taixiu", get(handle_classic_snapshot))
        .route("/api/taixiumd5", get(handle_md5_snapshot))
        .route("/api/history", get(handle_history))
        .route("/api/history/{variant}", get(handle_variant_history))
        .layer(cors)
        .with_state(coordinator)
}

fn error_response(status: StatusCode, msg: &str) -> (StatusCode, Json<serde_json::Value>) {
    (status, Json(serde_json::json!({ "error": msg })))
}

// ---- handlers ----

async fn handle_index() -> &'static str {
    BANNER
}

async fn handle_health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "OK" }))
}

async fn handle_classic_snapshot(State(coordinator): State<AppState>) -> Json<LatestSnapshot> {
    Json(coordinator.snapshot(Variant::Classic))
}

async fn handle_md5_snapshot(State(coordinator): State<AppState>) -> Json<LatestSnapshot> {
    Json(coordinator.snapshot(Variant::Md5))
}

async fn handle_history(State(coordinator): State<AppState>) -> Json<HistoryView> {
    Json(coordinator.histories())
}

async fn handle_variant_history(
    State(coordinator): State<AppState>,
    Path(name): Path<String>,
) -> impl IntoResponse {
    match Variant::parse(&name) {
        Ok(variant) => Json(coordinator.history(variant)).into_response(),
        Err(e) => error_response(StatusCode::NOT_FOUND, &e.to_string()).into_response(),
    }
}
