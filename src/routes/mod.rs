// src/routes/mod.rs
pub mod chat;

use std::path::Path;

use crate::state::SharedState;
use axum::{
    Router,
    routing::{get, post},
};
use chat::chat_handler;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

pub fn create_router(static_dir: impl AsRef<Path>) -> Router<SharedState> {
    let api_routes = Router::new()
        .route("/chat", post(chat_handler))
        .layer(CorsLayer::permissive());

    Router::new()
        .nest("/api", api_routes)
        .route("/health", get(|| async { "OK" }))
        .fallback_service(ServeDir::new(static_dir))
        .layer(TraceLayer::new_for_http())
}
