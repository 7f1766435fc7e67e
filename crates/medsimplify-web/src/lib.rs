use std::sync::Arc;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::http::{Method, header};
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub mod handlers;
pub mod models;
pub mod state;
pub mod upload;

pub use state::AppState;

/// Build the `/api` router.
///
/// Any origin may call the API; the front end is served separately.
pub fn router(state: Arc<AppState>, max_upload_bytes: usize) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    Router::new()
        .route("/api/simplify", post(handlers::simplify::simplify))
        .route("/api/upload", post(handlers::upload::upload))
        .route("/api/health", get(handlers::health::health))
        .fallback(handlers::not_found)
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
