use std::sync::Arc;

use flashcards_api::{app, config, store::PostgresStore};

#[tokio::main]
async fn main() {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    let config = config::config();
    tracing::info!("Starting Flashcards API in {:?} mode", config.environment);

    let store = PostgresStore::connect(&config.database.url, config.database.max_connections)
        .await
        .unwrap_or_else(|e| panic!("failed to connect document store: {}", e));

    let app = app(Arc::new(store));

    let bind_addr = format!("0.0.0.0:{}", config.server.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {}: {}", bind_addr, e));

    tracing::info!("Flashcards API listening on http://{}", bind_addr);

    axum::serve(listener, app).await.expect("server");
}
