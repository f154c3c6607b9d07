use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use voicebox_backend::infrastructure::config::{Config, LogFormat};
use voicebox_backend::infrastructure::engine::load_engine;
use voicebox_backend::infrastructure::http::start_http_server;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    init_logging(&config);

    tracing::info!(
        "Starting Voicebox backend on {}:{}",
        config.host,
        config.port
    );

    // One-time engine initialization; a high-latency operation for real
    // backends, so it happens before the listener binds. The target device is
    // passed explicitly through construction.
    tracing::info!(device = %config.device, "Initializing TTS engine");
    let engine = load_engine(&config);

    match &engine {
        Some(engine) => tracing::info!(
            device = engine.device(),
            sample_rate = engine.sample_rate(),
            "TTS engine loaded successfully"
        ),
        None => tracing::warn!("TTS engine not loaded; /generate-tts will return 503"),
    }

    let config = Arc::new(config);

    // Start HTTP server with all routes
    start_http_server(config, engine).await?;

    Ok(())
}

fn init_logging(config: &Config) {
    if config.log_format == LogFormat::Json {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "voicebox_backend=debug,tower_http=debug".into()),
            )
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "voicebox_backend=debug,tower_http=debug".into()),
            )
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }
}
