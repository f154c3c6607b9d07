use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::controllers::{health, tts::TtsController};
use crate::domain::tts::TtsService;
use crate::infrastructure::config::Config;
use crate::infrastructure::engine::EngineHandle;

/// Snapshot reported by the status endpoint
pub struct ServerStatus {
    pub model_loaded: bool,
    pub device: String,
}

/// Assemble the application router.
///
/// Split out of [`start_http_server`] so tests can drive the router
/// in-process without binding a socket.
pub fn app(
    status: Arc<ServerStatus>,
    tts_controller: Arc<TtsController>,
    max_upload_bytes: usize,
) -> Router {
    let tts_routes = Router::new()
        .route("/generate-tts", post(TtsController::generate))
        .with_state(tts_controller)
        .layer(DefaultBodyLimit::max(max_upload_bytes));

    Router::new()
        .route("/", get(health::status))
        .with_state(status)
        .merge(tts_routes)
        // The browser front-end is served from another origin in development
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// Start the HTTP server with all routes configured
pub async fn start_http_server(
    config: Arc<Config>,
    engine: Option<EngineHandle>,
) -> Result<(), Box<dyn std::error::Error>> {
    let status = Arc::new(ServerStatus {
        model_loaded: engine.is_some(),
        device: engine
            .as_ref()
            .map(|e| e.device().to_string())
            .unwrap_or_else(|| config.device.clone()),
    });

    let tts_service = Arc::new(TtsService::new(engine));
    let tts_controller = Arc::new(TtsController::new(tts_service));

    let app = app(status, tts_controller, config.max_upload_bytes);

    let listener =
        tokio::net::TcpListener::bind(format!("{}:{}", config.host, config.port)).await?;

    tracing::info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
