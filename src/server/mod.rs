mod handlers;
mod types;

pub use handlers::AppState;

use crate::{Result, config::Config, ollama::OllamaClient};
use axum::{
    Router,
    routing::{get, post},
};
use std::net::SocketAddr;
use tower_http::trace::TraceLayer;
use tracing::info;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/api/settings", get(handlers::settings))
        .route("/api/models", get(handlers::models))
        .route("/api/generate", post(handlers::generate))
        .route("/api/pull", post(handlers::pull))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run(config: Config) -> Result<()> {
    let client = OllamaClient::new(&config.ollama)?;
    info!("Using model server at {}", client.base_url());

    let app = router(AppState::new(client, config.ollama.clone()));

    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);

    info!("Starting HiOllama UI on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
