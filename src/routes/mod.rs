//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! The dashboard front end is a static bundle; everything it charts comes
//! from the JSON endpoints below. When `STATIC_DIR` is configured the
//! bundle is served at `/` behind the API routes.

pub mod dashboard;
pub mod process;
pub mod session;

use axum::Router;
use axum::http::StatusCode;
use axum::response::Json;
use axum::routing::get;
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Error half of every JSON handler: a status plus `{"error": "..."}`.
pub type ApiError = (StatusCode, Json<serde_json::Value>);

pub(crate) fn api_error(status: StatusCode, message: impl std::fmt::Display) -> ApiError {
    (status, Json(serde_json::json!({ "error": message.to_string() })))
}

/// API routes plus the optional static front end.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);
    let static_dir = state.config.static_dir.clone();

    let router = Router::new()
        .route("/api/views", get(dashboard::list_views))
        .route("/api/views/{slug}", get(dashboard::view))
        .route("/api/stockpiles/filling", get(dashboard::stockpile_filling))
        .route("/api/mill/throughput", get(dashboard::mill_throughput))
        .route("/api/mill/feed", get(dashboard::mill_feed))
        .route("/api/mill/prediction", get(dashboard::mill_prediction))
        .route("/api/process/delays", get(process::get_delays).post(process::confirm_delays))
        .route(
            "/api/database/config",
            get(dashboard::database_config).post(dashboard::confirm_database_config),
        )
        .route("/healthz", get(healthz))
        .layer(cors)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    match static_dir {
        Some(dir) => router.fallback_service(ServeDir::new(dir).append_index_html_on_directories(true)),
        None => router,
    }
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}
