pub mod config;
pub mod error;
pub mod handlers;
pub mod identity;
pub mod store;
pub mod validation;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use store::DocumentStore;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn DocumentStore>,
}

/// Build the full application router over an injected document store.
/// Tests pass a `MemoryStore`; the binary connects a `PostgresStore`.
pub fn app(store: Arc<dyn DocumentStore>) -> Router {
    let state = AppState { store };

    Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        // Flashcard set mutations (authenticated calls)
        .route(
            "/api/flashcards",
            post(handlers::flashcard::create).put(handlers::flashcard::update),
        )
        // Platform events
        .route("/hooks/signup", post(handlers::user::signup))
        // Global middleware
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn root() -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Json(json!({
        "success": true,
        "data": {
            "name": "Flashcards API",
            "version": version,
            "endpoints": {
                "home": "/ (public)",
                "health": "/health (public)",
                "flashcards": "POST|PUT /api/flashcards (authenticated)",
                "signup_hook": "POST /hooks/signup (platform event)",
            }
        }
    }))
}

async fn health() -> Json<Value> {
    Json(json!({
        "success": true,
        "data": {
            "status": "ok",
            "timestamp": chrono::Utc::now(),
        }
    }))
}
