pub mod handlers;
pub mod types;

use crate::{
    Result,
    config::Config,
    llm::{GeminiClient, LlmClient},
    relay::Relay,
};
use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use std::{net::SocketAddr, sync::Arc};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

/// Room for the non-file form fields on top of the image limit.
const FORM_OVERHEAD_BYTES: usize = 1024 * 1024;

pub fn router(state: handlers::AppState, cors: bool) -> Router {
    let body_limit = state.upload.max_size_bytes().saturating_add(FORM_OVERHEAD_BYTES);

    let app = Router::new()
        .route("/api/interpret", post(handlers::interpret))
        .route("/api/prompt", post(handlers::prompt))
        .route("/health", get(handlers::health))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    if cors {
        app.layer(CorsLayer::permissive())
    } else {
        app
    }
}

/// Builds application state around the given provider client.
pub fn app_state(config: &Config, client: Arc<dyn LlmClient>) -> handlers::AppState {
    handlers::AppState {
        relay: Arc::new(Relay::new(client, config.llm.api_key.clone())),
        upload: Arc::new(config.upload.clone()),
        default_model: config.llm.default_model,
    }
}

pub async fn run(config: Config) -> Result<()> {
    let client: Arc<dyn LlmClient> = Arc::new(GeminiClient::new(&config.llm));
    let state = app_state(&config, client);

    if config.llm.api_key.is_none() {
        info!("No fallback API key configured; callers must supply apiKey");
    }

    let app = router(state, config.server.cors);

    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);

    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
