pub mod handlers;
pub mod types;

use crate::{
    Result,
    config::Config,
    inference::{HuggingFaceClient, RetryPolicy},
};
use axum::{Router, routing::post};
use handlers::AppState;
use std::{net::SocketAddr, path::Path};
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};
use tracing::{info, warn};

/// `POST /api/chat` plus static files from `static_dir` for every other
/// request, including other methods on `/api/chat`.
pub fn router(state: AppState, static_dir: impl AsRef<Path>) -> Router {
    let static_files = ServeDir::new(static_dir);

    Router::new()
        .route(
            "/api/chat",
            post(handlers::chat).fallback_service(static_files.clone()),
        )
        .with_state(state)
        .fallback_service(static_files)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

pub async fn run(config: Config) -> Result<()> {
    if config.inference.api_key.is_empty() {
        warn!("HF_API_KEY is not set, provider calls will be unauthenticated");
    }

    let client = HuggingFaceClient::new(&config.inference, RetryPolicy::from(&config.retry))?;
    info!("Relaying chat requests to {}", client.url());

    let app = router(AppState::new(client), &config.server.static_dir);

    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);

    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
